//! Per-point tooltip text.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::{ConfigError, Result};
use crate::models::{ChartConfig, FieldType, XValue};

/// A value is integral when rounding it to two decimals leaves it unchanged.
pub fn is_integral(v: f64) -> bool {
    (v * 100.0).round() / 100.0 == v
}

/// Integral values print in shortest form (`42`, `1.5`); others with two decimals.
pub fn format_number(v: f64) -> String {
    // -0 prints as 0
    let v = if v == 0.0 { 0.0 } else { v };
    if is_integral(v) {
        v.to_string()
    } else {
        format!("{v:.2}")
    }
}

/// Reject strftime patterns chrono cannot render.
pub fn validate_time_format(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidTimeFormat {
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

/// Render epoch milliseconds (UTC) with a strftime pattern.
///
/// Timestamps outside chrono's range fall back to the numeric rule.
pub fn format_time(epoch_ms: f64, pattern: &str) -> Result<String> {
    validate_time_format(pattern)?;
    Ok(match DateTime::<Utc>::from_timestamp_millis(epoch_ms as i64) {
        Some(dt) => dt.format_with_items(StrftimeItems::new(pattern)).to_string(),
        None => format_number(epoch_ms),
    })
}

/// Text of the x value: time pattern, category verbatim, or the numeric rule.
pub fn format_x(x: &XValue, x_type: FieldType, tip_time_format: Option<&str>) -> Result<String> {
    match (x, x_type, tip_time_format) {
        (XValue::Number(ms), FieldType::Time, Some(pattern)) => format_time(*ms, pattern),
        (XValue::Number(v), _, _) => Ok(format_number(*v)),
        (XValue::Category(c), _, _) => Ok(c.clone()),
    }
}

/// Two-line tooltip: `"{x field} : {x}\n{y field} : {y}"`.
pub fn format_point(
    x: &XValue,
    y: f64,
    chart_index: usize,
    config: &ChartConfig,
    x_type: FieldType,
) -> Result<String> {
    let y_field = config
        .charts
        .get(chart_index)
        .map(|c| c.y.as_str())
        .unwrap_or_default();
    let x_text = format_x(x, x_type, config.tip_time_format.as_deref())?;
    Ok(format!(
        "{} : {}\n{} : {}",
        config.x,
        x_text,
        y_field,
        format_number(y)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_rule() {
        assert!(is_integral(42.0));
        assert!(is_integral(1.5));
        assert!(is_integral(2.25));
        assert!(!is_integral(3.14159));
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(3.14159), "3.14");
        assert_eq!(format_number(-0.126), "-0.13");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn bad_pattern_is_rejected() {
        assert!(validate_time_format("%Y-%m-%d").is_ok());
        assert!(matches!(
            validate_time_format("%Y-%"),
            Err(ConfigError::InvalidTimeFormat { .. })
        ));
    }
}
