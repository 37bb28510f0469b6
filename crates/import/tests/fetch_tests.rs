use std::time::Duration;

use serde_json::json;
use tajine_import::{
    ApiNinjasClient, ClientSettings, FetchError, IngredientsPayload, PopulateOutcome,
    RecipeSource, populate_if_empty,
};
use tajine_recipe::{Recipe, Unit};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: Option<&str>) -> ApiNinjasClient {
    ApiNinjasClient::new(ClientSettings {
        api_url: format!("{}/v1/recipe", server.uri()),
        api_key: api_key.map(str::to_string),
        timeout: Duration::from_secs(2),
        limit: 1,
    })
    .unwrap()
}

fn paella_payload() -> serde_json::Value {
    json!([{
        "title": "Seafood Paella",
        "servings": "Serves 4-6",
        "ingredients": "=== Rice ===|1 1/2 cups rice|2 cloves garlic\n500 g shrimp|salt",
        "instructions": "Fry the garlic. Add the rice and stock! Simmer until done."
    }])
}

#[tokio::test]
async fn test_fetch_sends_query_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/recipe"))
        .and(query_param("query", "paella"))
        .and(query_param("limit", "1"))
        .and(header("X-Api-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paella_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server, Some("secret")).fetch("paella").await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title.as_deref(), Some("Seafood Paella"));
    assert!(matches!(records[0].ingredients, Some(IngredientsPayload::Text(_))));
}

#[tokio::test]
async fn test_fetch_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server, None).fetch("paella").await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 502 }));
}

#[tokio::test]
async fn test_fetch_reports_bad_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server, None).fetch("paella").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paella_payload())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = ApiNinjasClient::new(ClientSettings {
        api_url: format!("{}/v1/recipe", server.uri()),
        timeout: Duration::from_millis(200),
        ..Default::default()
    })
    .unwrap();

    let err = client.fetch("paella").await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}

#[tokio::test]
async fn test_populate_from_prose_instructions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/recipe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paella_payload()))
        .mount(&server)
        .await;
    let client = client_for(&server, None);

    let mut recipe = Recipe::named("paella");
    let outcome = populate_if_empty(&mut recipe, &client).await;

    assert_eq!(outcome, PopulateOutcome::Populated);
    assert_eq!(recipe.number_of_servings, Some(4));
    assert_eq!(recipe.summary.as_deref(), Some("Seafood Paella"));

    let instructions: Vec<_> = recipe
        .steps
        .iter()
        .filter_map(|step| step.instruction.as_deref())
        .collect();
    assert_eq!(
        instructions,
        vec!["Fry the garlic.", "Add the rice and stock!", "Simmer until done."]
    );

    let ingredients = &recipe.steps[0].ingredients;
    let names: Vec<_> = ingredients.iter().map(|line| line.name.as_str()).collect();
    assert_eq!(names, vec!["rice", "garlic", "shrimp", "salt"]);
    assert_eq!(ingredients[0].quantity, Some(1.5));
    assert_eq!(ingredients[0].unit, Unit::Cup);
    assert_eq!(ingredients[1].unit, Unit::Piece);
    assert_eq!(ingredients[2].quantity, Some(500.0));
    assert_eq!(ingredients[2].unit, Unit::Gram);
    assert_eq!(ingredients[3].quantity, None);
}

#[tokio::test]
async fn test_populate_twice_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paella_payload()))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server, None);

    let mut recipe = Recipe::named("paella");
    populate_if_empty(&mut recipe, &client).await;
    let first = recipe.clone();

    let outcome = populate_if_empty(&mut recipe, &client).await;

    assert_eq!(outcome, PopulateOutcome::Skipped);
    assert_eq!(recipe, first);
}

#[tokio::test]
async fn test_populate_survives_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = client_for(&server, None);

    let mut recipe = Recipe::named("paella");
    let before = recipe.clone();
    let outcome = populate_if_empty(&mut recipe, &client).await;

    assert_eq!(outcome, PopulateOutcome::NoData);
    assert_eq!(recipe, before);
}

#[tokio::test]
async fn test_populate_with_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let client = client_for(&server, None);

    let mut recipe = Recipe::named("unknown dish");
    assert_eq!(populate_if_empty(&mut recipe, &client).await, PopulateOutcome::NoData);
    assert!(recipe.steps.is_empty());
}
