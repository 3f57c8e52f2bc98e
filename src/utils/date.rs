// Date expressions for --since filters

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use anyhow::{Context, Result};

/// Parse a date expression and return Unix timestamp (UTC)
///
/// Supported forms:
/// - absolute: `2026-01-10`, `2026-01-10T14:30` (local time)
/// - `today`, `yesterday` (local midnight)
/// - relative: `7d` (7 days ago), `2w` (2 weeks ago)
pub fn parse_date_expr(expr: &str) -> Result<i64> {
    parse_date_expr_at(expr, Utc::now())
}

/// Same as `parse_date_expr` with an explicit "now"
pub fn parse_date_expr_at(expr: &str, now: DateTime<Utc>) -> Result<i64> {
    let expr = expr.trim();

    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        return local_midnight(date);
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(expr, "%Y-%m-%dT%H:%M") {
        let local_dt = Local.from_local_datetime(&datetime)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Ambiguous datetime: {}", expr))?;
        return Ok(local_dt.timestamp());
    }

    let today = now.with_timezone(&Local).date_naive();
    match expr {
        "today" => return local_midnight(today),
        "yesterday" => return local_midnight(today - Duration::days(1)),
        _ => {}
    }

    if let Some((amount, unit_secs)) = split_relative(expr) {
        let amount: i64 = amount.parse()
            .with_context(|| format!("Invalid date expression: {}", expr))?;
        return amount.checked_mul(unit_secs)
            .and_then(|secs| now.timestamp().checked_sub(secs))
            .ok_or_else(|| anyhow::anyhow!("Invalid date expression: '{}'. Offset is too large.", expr));
    }

    anyhow::bail!(
        "Invalid date expression: '{}'. Use YYYY-MM-DD, YYYY-MM-DDTHH:MM, today, yesterday, or a relative form like 7d or 2w.",
        expr
    )
}

fn local_midnight(date: NaiveDate) -> Result<i64> {
    let midnight = date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid date"))?;
    let local_dt = Local.from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| anyhow::anyhow!("Nonexistent local midnight for {}", date))?;
    Ok(local_dt.timestamp())
}

/// `7d` -> ("7", seconds per day)
fn split_relative(expr: &str) -> Option<(&str, i64)> {
    let unit_secs = match expr.chars().last()? {
        'd' => 86400,
        'w' => 7 * 86400,
        _ => return None,
    };
    let amount = &expr[..expr.len() - 1];
    if amount.is_empty() || !amount.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((amount, unit_secs))
}
