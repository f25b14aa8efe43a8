use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

use super::types::FieldKind;

const DATETIME_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Coerce a non-blank cell into `kind`. The error is a short description of what was expected.
pub fn coerce(kind: FieldKind, raw: &str) -> Result<Value, String> {
    match kind {
        FieldKind::String => Ok(Value::String(raw.to_string())),
        FieldKind::Number => parse_number(raw).ok_or_else(|| expected("a number", raw)),
        FieldKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| expected("an integer", raw)),
        FieldKind::Boolean => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| expected("a boolean", raw)),
        FieldKind::Date => parse_date(raw)
            .map(|dt| Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .ok_or_else(|| expected("a date", raw)),
    }
}

fn expected(what: &str, raw: &str) -> String {
    format!("expected {}, got `{}`", what, raw)
}

/// Integral values come back as JSON integers so `"10"` serializes as `10`, not `10.0`.
pub fn parse_number(raw: &str) -> Option<Value> {
    let n: f64 = raw.trim().parse().ok()?;
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        return Some(Value::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number)
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Parse the date shapes a sheet commonly holds. Naive values are taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers() {
        assert_eq!(coerce(FieldKind::Number, "10").unwrap(), json!(10));
        assert_eq!(coerce(FieldKind::Number, " 2.5 ").unwrap(), json!(2.5));
        assert_eq!(coerce(FieldKind::Number, "-3").unwrap(), json!(-3));
        assert!(coerce(FieldKind::Number, "1,000").is_err());
        assert!(coerce(FieldKind::Number, "NaN").is_err());
        assert_eq!(coerce(FieldKind::Integer, "42").unwrap(), json!(42));
        assert!(coerce(FieldKind::Integer, "4.2").is_err());
    }

    #[test]
    fn booleans() {
        assert_eq!(coerce(FieldKind::Boolean, "TRUE").unwrap(), json!(true));
        assert_eq!(coerce(FieldKind::Boolean, "no").unwrap(), json!(false));
        assert_eq!(
            coerce(FieldKind::Boolean, "maybe").unwrap_err(),
            "expected a boolean, got `maybe`"
        );
    }

    #[test]
    fn dates() {
        let iso = |s: &str| coerce(FieldKind::Date, s).unwrap();
        assert_eq!(iso("2024-03-05"), json!("2024-03-05T00:00:00.000Z"));
        assert_eq!(iso("03/05/2024"), json!("2024-03-05T00:00:00.000Z"));
        assert_eq!(iso("2024/12/22 00:05:00"), json!("2024-12-22T00:05:00.000Z"));
        assert_eq!(iso("2024-12-22T10:00:00+10:00"), json!("2024-12-22T00:00:00.000Z"));
        assert!(coerce(FieldKind::Date, "next tuesday").is_err());
    }

    #[test]
    fn strings_are_untouched() {
        assert_eq!(coerce(FieldKind::String, " a ").unwrap(), json!(" a "));
    }
}
