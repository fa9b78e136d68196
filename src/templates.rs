use tera::Tera;

use crate::config::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, STATUS_TEMPLATE};
use crate::error::AppError;

const STATUS_TEMPLATE_SOURCE: &str = include_str!("../templates/status.html");

/// Initialize the Tera template engine
///
/// The page template is compiled into the binary so the server has no
/// runtime file dependencies. Output is autoescaped (`.html` name).
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_template(STATUS_TEMPLATE, STATUS_TEMPLATE_SOURCE)?;

    // Add custom filters
    tera.register_filter("humanize_seconds", humanize_seconds_filter);

    Ok(tera)
}

/// Render a number of seconds as a short duration (e.g., "3d 4h 12m")
fn humanize_seconds_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let seconds = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg("humanize_seconds filter expects a number"))?;

    Ok(tera::Value::String(humanize_seconds(seconds)))
}

fn humanize_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "unknown".to_string();
    }

    let total = seconds as u64;
    if total < SECONDS_PER_MINUTE {
        return format!("{}s", total);
    }

    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_seconds() {
        assert_eq!(humanize_seconds(42.9), "42s");
        assert_eq!(humanize_seconds(125.0), "2m");
        assert_eq!(humanize_seconds(3.0 * 3600.0 + 61.0), "3h 1m");
        assert_eq!(humanize_seconds(2.0 * 86400.0 + 3600.0 + 120.0), "2d 1h 2m");
    }

    #[test]
    fn test_humanize_seconds_invalid() {
        assert_eq!(humanize_seconds(-1.0), "unknown");
        assert_eq!(humanize_seconds(f64::NAN), "unknown");
    }

    #[test]
    fn test_filter_rejects_non_numbers() {
        let value = tera::Value::String("soon".to_string());
        assert!(humanize_seconds_filter(&value, &Default::default()).is_err());
    }

    #[test]
    fn test_templates_compile() {
        let tera = init_templates().unwrap();
        assert!(tera.get_template_names().any(|name| name == STATUS_TEMPLATE));
    }
}
