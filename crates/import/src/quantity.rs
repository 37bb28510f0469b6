use fraction::Fraction;

use crate::error::QuantityError;

/// Parse a leading quantity into a float
///
/// Supports formats:
/// - Whole numbers: "2" → 2.0
/// - Pure fractions: "1/2" → 0.5
/// - Mixed fractions: "1 1/2" → 1.5
/// - Decimals: "0.5" → 0.5
pub fn parse_quantity(text: &str) -> Result<f64, QuantityError> {
    let trimmed = text.trim();

    // Mixed fractions: "1 1/2"
    if trimmed.contains(' ') && trimmed.contains('/') {
        let mut parts = trimmed.split_whitespace();
        let (Some(whole), Some(fractional), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(QuantityError::InvalidFraction(trimmed.to_string()));
        };

        let whole: u64 = whole
            .parse()
            .map_err(|_| QuantityError::InvalidNumber(whole.to_string()))?;
        // summed as floats, rational addition overflows on huge inputs
        let fractional = to_f64(parse_fraction(fractional)?, trimmed)?;
        return Ok(whole as f64 + fractional);
    }

    // Pure fractions: "1/2"
    if trimmed.contains('/') {
        return to_f64(parse_fraction(trimmed)?, trimmed);
    }

    trimmed
        .parse::<f64>()
        .map_err(|_| QuantityError::InvalidNumber(trimmed.to_string()))
}

/// Lenient variant used by the line parser: when the full quantity text does
/// not parse, the first whitespace-separated token is tried on its own.
pub fn parse_quantity_lenient(text: &str) -> Option<f64> {
    parse_quantity(text).ok().or_else(|| {
        text.split_whitespace()
            .next()
            .and_then(|first| first.parse::<f64>().ok())
    })
}

fn parse_fraction(text: &str) -> Result<Fraction, QuantityError> {
    let Some((numerator, denominator)) = text.split_once('/') else {
        return Err(QuantityError::InvalidFraction(text.to_string()));
    };

    let numerator: u64 = numerator
        .parse()
        .map_err(|_| QuantityError::InvalidNumber(numerator.to_string()))?;
    let denominator: u64 = denominator
        .parse()
        .map_err(|_| QuantityError::InvalidNumber(denominator.to_string()))?;

    if denominator == 0 {
        return Err(QuantityError::ZeroDenominator(text.to_string()));
    }

    Ok(Fraction::new(numerator, denominator))
}

fn to_f64(value: Fraction, source: &str) -> Result<f64, QuantityError> {
    match (value.numer(), value.denom()) {
        (Some(numer), Some(denom)) => Ok(*numer as f64 / *denom as f64),
        _ => Err(QuantityError::InvalidFraction(source.to_string())),
    }
}
