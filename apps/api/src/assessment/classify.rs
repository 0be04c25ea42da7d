//! Range classifier: maps a numeric value onto a labelled, coloured range.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assessment::config::Classification;

pub const OUT_OF_RANGE_LABEL: &str = "Out of Range";
pub const OUT_OF_RANGE_COLOR: &str = "gray";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub color: String,
}

impl ClassificationResult {
    pub fn out_of_range() -> Self {
        Self {
            label: OUT_OF_RANGE_LABEL.to_string(),
            color: OUT_OF_RANGE_COLOR.to_string(),
        }
    }

    #[cfg(test)]
    pub fn is_out_of_range(&self) -> bool {
        self.label == OUT_OF_RANGE_LABEL && self.color == OUT_OF_RANGE_COLOR
    }
}

/// Classifies `value` against `classification`.
///
/// - `None` if there is no classification or the value is not numeric.
/// - The first range (declaration order) with `min <= v <= max`.
/// - The "Out of Range" / gray sentinel when no range matches.
///
/// Overlapping ranges are not rejected; the earlier declaration wins.
pub fn classify_value(
    value: &Value,
    classification: Option<&Classification>,
) -> Option<ClassificationResult> {
    let classification = classification?;
    let number = numeric_value(value)?;

    let result = classification
        .ranges
        .iter()
        .find(|range| number >= range.min && number <= range.max)
        .map(|range| ClassificationResult {
            label: range.label.clone(),
            color: range.color.clone(),
        })
        .unwrap_or_else(ClassificationResult::out_of_range);

    Some(result)
}

/// Numbers pass through; strings are read from their leading decimal prefix
/// (`"72 bpm"` -> 72). Everything else is non-numeric.
fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_leading_float(s)?,
        _ => return None,
    };
    (!number.is_nan()).then_some(number)
}

fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::config::ClassificationRange;
    use serde_json::json;

    fn range(min: f64, max: f64, label: &str, color: &str) -> ClassificationRange {
        ClassificationRange {
            min,
            max,
            label: label.to_string(),
            color: color.to_string(),
        }
    }

    fn poor_good() -> Classification {
        Classification {
            ranges: vec![range(0.0, 50.0, "Poor", "red"), range(51.0, 100.0, "Good", "green")],
        }
    }

    #[test]
    fn test_inclusive_bounds() {
        let c = poor_good();
        assert_eq!(classify_value(&json!(51), Some(&c)).unwrap().label, "Good");
        assert_eq!(classify_value(&json!(50), Some(&c)).unwrap().label, "Poor");
        assert_eq!(classify_value(&json!(0), Some(&c)).unwrap().label, "Poor");
        assert_eq!(classify_value(&json!(100), Some(&c)).unwrap().label, "Good");
    }

    #[test]
    fn test_out_of_range_sentinel() {
        let c = poor_good();
        let result = classify_value(&json!(200), Some(&c)).unwrap();
        assert!(result.is_out_of_range());
        assert_eq!(result.color, "gray");

        // Gap between ranges is also out of range.
        assert!(classify_value(&json!(50.5), Some(&c)).unwrap().is_out_of_range());
        assert!(classify_value(&json!(-1), Some(&c)).unwrap().is_out_of_range());
    }

    #[test]
    fn test_missing_classification_is_none() {
        assert_eq!(classify_value(&json!(10), None), None);
    }

    #[test]
    fn test_non_numeric_values_are_none() {
        let c = poor_good();
        for value in [json!(null), json!("abc"), json!(true), json!([5]), json!({ "v": 5 }), json!("")] {
            assert_eq!(classify_value(&value, Some(&c)), None, "value {value}");
        }
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let c = poor_good();
        assert_eq!(classify_value(&json!("24.3"), Some(&c)).unwrap().label, "Poor");
        assert_eq!(classify_value(&json!(" 72 bpm"), Some(&c)).unwrap().label, "Good");
        assert_eq!(classify_value(&json!("6e1"), Some(&c)).unwrap().label, "Good");
    }

    #[test]
    fn test_overlapping_ranges_first_declaration_wins() {
        let c = Classification {
            ranges: vec![range(0.0, 100.0, "Wide", "blue"), range(40.0, 60.0, "Narrow", "red")],
        };
        assert_eq!(classify_value(&json!(50), Some(&c)).unwrap().label, "Wide");

        let reversed = Classification {
            ranges: vec![range(40.0, 60.0, "Narrow", "red"), range(0.0, 100.0, "Wide", "blue")],
        };
        assert_eq!(classify_value(&json!(50), Some(&reversed)).unwrap().label, "Narrow");
    }

    #[test]
    fn test_empty_ranges_yield_sentinel() {
        let c = Classification { ranges: vec![] };
        assert!(classify_value(&json!(1), Some(&c)).unwrap().is_out_of_range());
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("12.5"), Some(12.5));
        assert_eq!(parse_leading_float("-3"), Some(-3.0));
        assert_eq!(parse_leading_float(".5x"), Some(0.5));
        assert_eq!(parse_leading_float("7."), Some(7.0));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("2E-1"), Some(0.2));
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("x1"), None);
    }
}
