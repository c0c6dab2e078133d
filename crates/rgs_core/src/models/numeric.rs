//! Numeric coercion for fields that arrive as JSON numbers or numeric strings.
//!
//! `None` always means "no value" and is never conflated with zero.

use serde_json::Value;

/// Integral value of a finite number or numeric string.
pub fn to_integer(value: Option<&Value>) -> Option<i128> {
    match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i128::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Some(i128::from(u));
            }
            n.as_f64().and_then(integral)
        }
        Value::String(s) => parse_finite(s).and_then(integral),
        _ => None,
    }
}

/// Finite value of a number or numeric string, integral or not.
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_finite(s),
        _ => None,
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn integral(f: f64) -> Option<i128> {
    // i128::MAX as f64 rounds up to 2^127, hence the strict upper bound
    if f.is_finite() && f.fract() == 0.0 && f >= i128::MIN as f64 && f < i128::MAX as f64 {
        Some(f as i128)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_integer_from_numbers() {
        assert_eq!(to_integer(Some(&json!(500))), Some(500));
        assert_eq!(to_integer(Some(&json!(-3))), Some(-3));
        assert_eq!(to_integer(Some(&json!(100.0))), Some(100));
        assert_eq!(to_integer(Some(&json!(1.5))), None);
    }

    #[test]
    fn test_integer_from_strings() {
        assert_eq!(to_integer(Some(&json!("250"))), Some(250));
        assert_eq!(to_integer(Some(&json!(" 42 "))), Some(42));
        assert_eq!(to_integer(Some(&json!("1e3"))), Some(1000));
        assert_eq!(to_integer(Some(&json!("2.5"))), None);
        assert_eq!(to_integer(Some(&json!(""))), None);
        assert_eq!(to_integer(Some(&json!("   "))), None);
        assert_eq!(to_integer(Some(&json!("abc"))), None);
        assert_eq!(to_integer(Some(&json!("inf"))), None);
    }

    #[test]
    fn test_integer_rejects_other_types() {
        assert_eq!(to_integer(None), None);
        assert_eq!(to_integer(Some(&Value::Null)), None);
        assert_eq!(to_integer(Some(&json!(true))), None);
        assert_eq!(to_integer(Some(&json!([1]))), None);
        assert_eq!(to_integer(Some(&json!({"v": 1}))), None);
    }

    #[test]
    fn test_integer_beyond_i64() {
        let big: Value = serde_json::from_str("10000000000000000000").unwrap();
        assert_eq!(to_integer(Some(&big)), Some(10_000_000_000_000_000_000));
        let sci: Value = serde_json::from_str("1e19").unwrap();
        assert_eq!(to_integer(Some(&sci)), Some(10_000_000_000_000_000_000));
        assert_eq!(
            to_integer(Some(&json!("-1e20"))),
            Some(-100_000_000_000_000_000_000)
        );
    }

    #[test]
    fn test_overflowing_literal_is_no_value() {
        let huge: Value = serde_json::from_str("1e400").unwrap();
        assert_eq!(to_integer(Some(&huge)), None);
        assert_eq!(to_number(Some(&huge)), None);
        assert_eq!(to_integer(Some(&json!("1e400"))), None);
    }

    #[test]
    fn test_zero_is_a_value() {
        assert_eq!(to_integer(Some(&json!(0))), Some(0));
        assert_eq!(to_number(Some(&json!("0"))), Some(0.0));
    }

    #[test]
    fn test_number_accepts_fractions() {
        assert_eq!(to_number(Some(&json!(1.25))), Some(1.25));
        assert_eq!(to_number(Some(&json!("0.5"))), Some(0.5));
        assert_eq!(to_number(Some(&json!("NaN"))), None);
        assert_eq!(to_number(Some(&json!(false))), None);
    }

    proptest! {
        #[test]
        fn prop_integer_strings_round_trip(n in -1_000_000_000i64..1_000_000_000i64) {
            prop_assert_eq!(to_integer(Some(&Value::String(n.to_string()))), Some(i128::from(n)));
            prop_assert_eq!(to_number(Some(&json!(n))), Some(n as f64));
        }
    }
}
