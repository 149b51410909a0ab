use serde_json::Value;
use thiserror::Error;

/// Shown whenever no community data exists for a layout.
/// Display-only: never folded into a stored sum or count.
pub const DEFAULT_RATIO: f64 = 1.05;

/// Lower bound of the acceptance window (inclusive).
pub const MIN_RATIO: f64 = 0.3;

/// Upper bound of the acceptance window (inclusive).
pub const MAX_RATIO: f64 = 3.0;

pub const MAX_LAYOUT_KEY_LEN: usize = 32;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatioError {
    #[error("Ratio must be a number")]
    NotANumber,

    #[error("Ratio must be a finite number")]
    NonFinite,

    #[error("Ratio must be between 0.3 and 3.0 (got {0})")]
    OutOfRange(f64),

    #[error("Invalid layout key: {0:?}")]
    InvalidLayout(String),
}

/// A human's right/left speed ratio is physiologically bounded.
/// Anything outside the window is a measurement glitch.
pub fn validate_ratio(ratio: f64) -> Result<f64, RatioError> {
    if !ratio.is_finite() {
        return Err(RatioError::NonFinite);
    }
    if !(MIN_RATIO..=MAX_RATIO).contains(&ratio) {
        return Err(RatioError::OutOfRange(ratio));
    }
    Ok(ratio)
}

/// Extracts a ratio from an untyped JSON value.
pub fn parse_ratio(value: &Value) -> Result<f64, RatioError> {
    match value {
        Value::Number(n) => validate_ratio(n.as_f64().ok_or(RatioError::NonFinite)?),
        _ => Err(RatioError::NotANumber),
    }
}

pub fn validate_layout_key(key: &str) -> Result<&str, RatioError> {
    let ok = !key.is_empty()
        && key.len() <= MAX_LAYOUT_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');

    if ok {
        Ok(key)
    } else {
        Err(RatioError::InvalidLayout(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0.3)]
    #[case(1.0)]
    #[case(1.05)]
    #[case(2.999)]
    #[case(3.0)]
    fn test_accepts_window(#[case] r: f64) {
        assert_eq!(validate_ratio(r), Ok(r));
    }

    #[rstest]
    #[case(0.29)]
    #[case(3.01)]
    #[case(0.0)]
    #[case(-1.0)]
    fn test_rejects_out_of_range(#[case] r: f64) {
        assert_eq!(validate_ratio(r), Err(RatioError::OutOfRange(r)));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(validate_ratio(f64::NAN), Err(RatioError::NonFinite));
        assert_eq!(validate_ratio(f64::INFINITY), Err(RatioError::NonFinite));
        assert_eq!(validate_ratio(f64::NEG_INFINITY), Err(RatioError::NonFinite));
    }

    #[rstest]
    #[case(json!("1.2"))]
    #[case(json!(null))]
    #[case(json!(true))]
    #[case(json!([1.2]))]
    #[case(json!({ "value": 1.2 }))]
    fn test_parse_rejects_non_numbers(#[case] v: serde_json::Value) {
        assert_eq!(parse_ratio(&v), Err(RatioError::NotANumber));
    }

    #[test]
    fn test_parse_accepts_integers() {
        assert_eq!(parse_ratio(&json!(1)), Ok(1.0));
        assert_eq!(parse_ratio(&json!(3)), Ok(3.0));
        assert!(parse_ratio(&json!(4)).is_err());
    }

    #[rstest]
    #[case("qwerty", true)]
    #[case("colemak-dh", true)]
    #[case("workman_2", true)]
    #[case("", false)]
    #[case("QWERTY", false)]
    #[case("../etc", false)]
    #[case("a b", false)]
    #[case("abcdefghijklmnopqrstuvwxyz0123456789", false)]
    fn test_layout_keys(#[case] key: &str, #[case] ok: bool) {
        assert_eq!(validate_layout_key(key).is_ok(), ok);
    }

    proptest! {
        #[test]
        fn prop_window_is_exact(r in -10.0f64..10.0) {
            let inside = (MIN_RATIO..=MAX_RATIO).contains(&r);
            prop_assert_eq!(validate_ratio(r).is_ok(), inside);
        }
    }
}
