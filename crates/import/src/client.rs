//! HTTP lookup of external recipes by name.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{FetchError, FetchResult};
use crate::ingredients::IngredientsPayload;

pub const DEFAULT_API_URL: &str = "https://api.api-ninjas.com/v1/recipe";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One record of the recipe API. Every field is optional on the wire.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FetchedRecipe {
    #[serde(default)]
    pub title: Option<String>,
    /// Free text such as "4 servings".
    #[serde(default)]
    pub servings: Option<String>,
    #[serde(default)]
    pub ingredients: Option<IngredientsPayload>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Anything that can look recipes up by name.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn fetch(&self, name: &str) -> FetchResult<Vec<FetchedRecipe>>;
}

#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub limit: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            limit: 1,
        }
    }
}

/// Client for the API Ninjas recipe endpoint
#[derive(Debug, Clone)]
pub struct ApiNinjasClient {
    client: reqwest::Client,
    settings: ClientSettings,
}

impl ApiNinjasClient {
    pub fn new(settings: ClientSettings) -> FetchResult<Self> {
        if settings.api_url.trim().is_empty() {
            return Err(FetchError::Config("api_url is empty".to_string()));
        }
        if settings.limit == 0 {
            return Err(FetchError::Config("limit must be at least 1".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

#[async_trait]
impl RecipeSource for ApiNinjasClient {
    async fn fetch(&self, name: &str) -> FetchResult<Vec<FetchedRecipe>> {
        debug!(recipe = name, url = %self.settings.api_url, "fetching recipe");

        let mut request = self.client.get(&self.settings.api_url).query(&[
            ("query", name.to_string()),
            ("limit", self.settings.limit.to_string()),
        ]);
        if let Some(api_key) = self.settings.api_key.as_deref().filter(|key| !key.is_empty()) {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let recipes: Vec<FetchedRecipe> = serde_json::from_str(&body)?;

        info!(recipe = name, count = recipes.len(), "fetched recipes");
        Ok(recipes)
    }
}
