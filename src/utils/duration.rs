// Refresh interval parsing for --watch

use std::time::Duration;
use anyhow::Result;

/// Parse an interval such as `30s`, `5m`, `1h30m` or `1h5m10s`.
/// Units must appear in descending order (h, m, s) and the total must be > 0.
pub fn parse_interval(expr: &str) -> Result<Duration> {
    let expr = expr.trim();
    if expr.is_empty() {
        anyhow::bail!("Interval cannot be empty");
    }

    let mut total_secs: u64 = 0;
    let mut digits = String::new();
    let mut last_unit_rank = 0;

    for c in expr.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let (rank, multiplier) = match c {
            'h' => (1, 3600),
            'm' => (2, 60),
            's' => (3, 1),
            _ => anyhow::bail!("Invalid interval: '{}'. Use forms like 30s, 5m or 1h30m.", expr),
        };
        if digits.is_empty() || rank <= last_unit_rank {
            anyhow::bail!("Invalid interval: '{}'. Use forms like 30s, 5m or 1h30m.", expr);
        }
        let amount: u64 = digits.parse()
            .map_err(|_| anyhow::anyhow!("Interval too large: {}", expr))?;
        total_secs = amount.checked_mul(multiplier)
            .and_then(|secs| total_secs.checked_add(secs))
            .ok_or_else(|| anyhow::anyhow!("Interval too large: {}", expr))?;
        digits.clear();
        last_unit_rank = rank;
    }

    if !digits.is_empty() {
        anyhow::bail!("Invalid interval: '{}'. Missing unit after '{}'.", expr, digits);
    }
    if total_secs == 0 {
        anyhow::bail!("Interval must be greater than 0");
    }

    Ok(Duration::from_secs(total_secs))
}
