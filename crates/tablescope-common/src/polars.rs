//! Polars `AnyValue` helpers.
//!
//! Conversions used when rendering cells into HTML or terminal tables and
//! when reading numeric cells back out of a frame.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to its display string.
///
/// Returns an empty string for `Null`; floats are printed without
/// trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tablescope_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int64(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(2.50)), "2.5");
/// assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// Non-finite values print as `NaN`, `inf` or `-inf`.
///
/// # Examples
///
/// ```
/// use tablescope_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.25), "1.25");
/// assert_eq!(format_numeric(0.0), "0");
/// assert_eq!(format_numeric(f64::NAN), "NaN");
/// ```
pub fn format_numeric(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Converts an `AnyValue` to `f64`, returning `None` for null, NaN and
/// non-numeric values.
///
/// Strings are not parsed: a text cell is never numeric.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Int8(v) => f64::from(v),
        AnyValue::Int16(v) => f64::from(v),
        AnyValue::Int32(v) => f64::from(v),
        AnyValue::Int64(v) => v as f64,
        AnyValue::UInt8(v) => f64::from(v),
        AnyValue::UInt16(v) => f64::from(v),
        AnyValue::UInt32(v) => f64::from(v),
        AnyValue::UInt64(v) => v as f64,
        AnyValue::Float32(v) => f64::from(v),
        AnyValue::Float64(v) => v,
        _ => return None,
    };
    if number.is_nan() { None } else { Some(number) }
}

/// Parses user-entered text as `f64`, returning `None` for invalid or
/// empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_integers() {
        assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::UInt32(0)), "0");
    }

    #[test]
    fn test_any_to_string_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
        assert_eq!(any_to_string(AnyValue::Float64(100.0)), "100");
    }

    #[test]
    fn test_format_numeric_keeps_integer_zeros() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(-2.5), "-2.5");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::Float64(2.5)), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_f64(AnyValue::String("2.5")), None);
        assert_eq!(any_to_f64(AnyValue::Boolean(true)), None);
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(" 6 "), Some(6.0));
        assert_eq!(parse_f64("-1e3"), Some(-1000.0));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("abc"), None);
    }
}
