use tablescope_common::parse_f64;

use crate::error::{PredictError, Result};

/// Splits a whitespace-separated list of finite numbers.
///
/// ```
/// use tablescope_predict::parse_features;
///
/// assert_eq!(parse_features(" 5  6.5\t-1 ").unwrap(), vec![5.0, 6.5, -1.0]);
/// assert!(parse_features("5 six").is_err());
/// assert!(parse_features("NaN").is_err());
/// ```
pub fn parse_features(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|token| {
            parse_f64(token)
                .filter(|value| value.is_finite())
                .ok_or_else(|| PredictError::NonNumericFeatureInput {
                    token: token.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_offending_token() {
        let err = parse_features("1 2 x3").unwrap_err();
        assert!(matches!(
            err,
            PredictError::NonNumericFeatureInput { ref token } if token == "x3"
        ));
    }

    #[test]
    fn empty_input_is_empty_vector() {
        assert!(parse_features("   ").unwrap().is_empty());
    }
}
