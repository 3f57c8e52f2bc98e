// Funnel command handler

use clap::ValueEnum;
use serde::Serialize;
use crate::config::AppContext;
use crate::funnel::{build_report, errors_by_bucket, timing_by_bucket, FunnelReport};
use crate::models::{StageErrorCount, StageTiming};
use crate::repo::AnalyticsRepo;
use crate::cli::error::user_error;
use crate::cli::output::{
    format_funnel_bars, format_funnel_cards, format_funnel_detail, format_funnel_list, is_tty,
};
use crate::cli::status::section;
use crate::utils::parse_interval;
use std::io::Write;
use anyhow::Result;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FunnelView {
    /// Table with conversion, drop-off and benchmark columns
    List,
    /// Horizontal bars
    Bars,
    /// One card per stage
    Cards,
    /// Per-stage sections with timing and error counts
    Detail,
}

#[derive(Debug, Clone)]
pub struct FunnelOptions {
    pub days: u32,
    pub view: FunnelView,
    pub compare: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct FunnelJson<'a> {
    days: u32,
    #[serde(flatten)]
    report: &'a FunnelReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    timings: Vec<StageTiming>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<StageErrorCount>,
}

/// Handle `funnel [--days N] [--view V] [--compare] [--json] [--watch I]`
pub fn handle_funnel(ctx: &AppContext, options: &FunnelOptions, watch: Option<&str>) -> Result<()> {
    let Some(watch) = watch else {
        print!("{}", render_funnel(ctx, options)?);
        return Ok(());
    };

    let interval = parse_interval(watch).unwrap_or_else(|e| user_error(&e.to_string()));
    let clear = should_clear_screen(options.json, is_tty());
    loop {
        let output = render_funnel(ctx, options)?;
        if clear {
            print!("{}", CLEAR_SCREEN);
        }
        print!("{}", output);
        if !options.json {
            println!();
            println!("{}", ctx.style.muted(&format!("Refreshing every {}. Press Ctrl-C to stop.", watch)));
        }
        std::io::stdout().flush()
            .map_err(|e| anyhow::anyhow!("Failed to flush stdout: {}", e))?;
        std::thread::sleep(interval);
    }
}

/// Redraws clear the terminal only for human-readable output on a TTY
fn should_clear_screen(json: bool, tty: bool) -> bool {
    tty && !json
}

/// Fetch, consolidate and render one funnel snapshot
pub fn render_funnel(ctx: &AppContext, options: &FunnelOptions) -> Result<String> {
    let current = AnalyticsRepo::funnel(&ctx.client, options.days, 0)?;
    let previous = if options.compare {
        Some(AnalyticsRepo::funnel(&ctx.client, options.days, options.days)?)
    } else {
        None
    };
    let report = build_report(&current.stages, previous.as_ref().map(|p| p.stages.as_slice()));

    let (timings, errors) = if options.view == FunnelView::Detail && !report.is_empty() {
        let timings = section("stage timing", AnalyticsRepo::timing(&ctx.client, options.days))?
            .unwrap_or_default();
        let errors = section("stage errors", AnalyticsRepo::errors(&ctx.client, options.days))?
            .unwrap_or_default();
        (timing_by_bucket(&timings), errors_by_bucket(&errors))
    } else {
        (Vec::new(), Vec::new())
    };

    if options.json {
        let json = FunnelJson { days: options.days, report: &report, timings, errors };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&json)?));
    }

    let style = &ctx.style;
    let mut output = String::new();
    let mut title = format!("Signup funnel, last {} days", options.days);
    if options.compare {
        title.push_str(&format!(" (vs previous {} days)", options.days));
    }
    output.push_str(&style.bold(&title));
    output.push_str("\n\n");

    output.push_str(&match options.view {
        FunnelView::List => format_funnel_list(&report, style),
        FunnelView::Bars => format_funnel_bars(&report, style),
        FunnelView::Cards => format_funnel_cards(&report, style),
        FunnelView::Detail => format_funnel_detail(&report, &timings, &errors, style),
    });
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_watch_never_clears_screen() {
        assert!(should_clear_screen(false, true));
        assert!(!should_clear_screen(true, true));
        assert!(!should_clear_screen(false, false));
        assert!(!should_clear_screen(true, false));
    }
}
