// Output formatting utilities

use crate::config::{ColorMode, Settings, Theme};
use crate::funnel::{BenchmarkVerdict, FunnelReport, FunnelReportRow};
use crate::models::{
    AdminUser, ContactMessage, ContactStatus, StageErrorCount, StageTiming, Tenant, TenantStatus,
};
use crate::cli::status::Dashboard;
use chrono::{DateTime, Local, Utc};
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";

// ANSI foreground colors (standard 16-color palette)
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BLUE: &str = "\x1b[34m";
const ANSI_FG_MAGENTA: &str = "\x1b[35m";
const ANSI_FG_CYAN: &str = "\x1b[36m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

pub const EMPTY_FUNNEL_MESSAGE: &str = "No funnel data for the selected period.";

const RULE_WIDTH: usize = 60;
const BAR_MAX_WIDTH: usize = 50;
const CARD_WIDTH: usize = 34;

/// Semantic role of a piece of text; the theme picks the actual color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Good,
    Warn,
    Bad,
    Muted,
}

/// Terminal styling for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
    pub theme: Theme,
}

impl Style {
    pub fn from_settings(settings: &Settings) -> Self {
        let color = match settings.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_tty(),
        };
        Self { color, theme: settings.theme }
    }

    /// No escape codes at all
    pub fn plain() -> Self {
        Self { color: false, theme: Theme::Dark }
    }

    fn code(&self, tone: Tone) -> &'static str {
        match (self.theme, tone) {
            (Theme::Dark, Tone::Accent) => ANSI_FG_CYAN,
            (Theme::Light, Tone::Accent) => ANSI_FG_BLUE,
            (_, Tone::Good) => ANSI_FG_GREEN,
            (Theme::Dark, Tone::Warn) => ANSI_FG_YELLOW,
            (Theme::Light, Tone::Warn) => ANSI_FG_MAGENTA,
            (_, Tone::Bad) => ANSI_FG_RED,
            (Theme::Dark, Tone::Muted) => ANSI_FG_BRIGHT_BLACK,
            (Theme::Light, Tone::Muted) => ANSI_DIM,
        }
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if self.color {
            format!("{}{}{}", self.code(tone), text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, Tone::Muted)
    }

    fn paint_opt(&self, text: &str, tone: Option<Tone>) -> String {
        match tone {
            Some(tone) => self.paint(text, tone),
            None => text.to_string(),
        }
    }
}

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate, with fallback to the COLUMNS
/// environment variable and a default of 120.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate to `width` characters, marking the cut with "..."
fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{}...", kept)
}

fn pad_right(text: &str, width: usize) -> String {
    let len = char_len(text);
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

fn pad_left(text: &str, width: usize) -> String {
    let len = char_len(text);
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), text)
    }
}

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// Format timestamp for display (local time, minutes precision)
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format date for display (date only, no time)
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// "just now", "5m ago", "3h ago", "2d ago"; a date after 30 days
pub fn format_relative(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - *dt).num_seconds();
    if diff < 0 {
        format_date(dt)
    } else if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h ago", diff / 3600)
    } else if diff < 30 * 86400 {
        format!("{}d ago", diff / 86400)
    } else {
        format_date(dt)
    }
}

/// Format seconds for display (e.g. "1h2m3s", "1m35s", "42s")
pub fn format_seconds(secs: f64) -> String {
    let secs = secs.max(0.0).round() as i64;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// `65.0%`, or `-` when undefined
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}

/// Signed percent change: `+30.0%`, `-12.5%`, `-` when undefined
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{:.1}%", v),
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}

/// Drop-off counts. A negative drop-off is a gain and shows as `+N`.
pub fn format_dropoff(dropoff: Option<i64>) -> String {
    match dropoff {
        Some(d) if d < 0 => format!("+{}", d.unsigned_abs()),
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}

fn dropoff_tone(dropoff: Option<i64>) -> Option<Tone> {
    match dropoff {
        Some(d) if d < 0 => Some(Tone::Muted),
        _ => None,
    }
}

fn change_tone(change: Option<f64>) -> Option<Tone> {
    match change {
        Some(c) if c > 0.0 => Some(Tone::Good),
        Some(c) if c < 0.0 => Some(Tone::Bad),
        _ => None,
    }
}

pub fn tenant_status_tone(status: TenantStatus) -> Tone {
    match status {
        TenantStatus::Active => Tone::Good,
        TenantStatus::Provisioning => Tone::Accent,
        TenantStatus::Suspended => Tone::Warn,
        TenantStatus::Failed => Tone::Bad,
        TenantStatus::Cancelled => Tone::Muted,
    }
}

fn contact_status_tone(status: ContactStatus) -> Option<Tone> {
    match status {
        ContactStatus::New => Some(Tone::Accent),
        ContactStatus::Read => None,
        ContactStatus::Replied => Some(Tone::Good),
        ContactStatus::Archived => Some(Tone::Muted),
    }
}

fn verdict_tone(verdict: BenchmarkVerdict) -> Option<Tone> {
    match verdict {
        BenchmarkVerdict::Above => Some(Tone::Good),
        BenchmarkVerdict::OnPar => None,
        BenchmarkVerdict::Below => Some(Tone::Bad),
    }
}

fn format_benchmark(row: &FunnelReportRow) -> String {
    match &row.benchmark {
        Some(b) => format!("{} ({:+.1} pts)", b.verdict.as_str(), b.delta),
        None => "-".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    align: Align,
    /// Shrunk first when the table is wider than the terminal
    flexible: bool,
}

impl Column {
    fn left(header: &'static str) -> Self {
        Self { header, align: Align::Left, flexible: false }
    }

    fn right(header: &'static str) -> Self {
        Self { header, align: Align::Right, flexible: false }
    }

    fn flexible(header: &'static str) -> Self {
        Self { header, align: Align::Left, flexible: true }
    }
}

struct Cell {
    text: String,
    tone: Option<Tone>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: None }
    }

    fn toned(text: impl Into<String>, tone: Option<Tone>) -> Self {
        Self { text: text.into(), tone }
    }
}

const MIN_FLEX_WIDTH: usize = 10;

/// Render an aligned table: header, `-` separator, rows.
/// Cells are padded before painting so escape codes never skew alignment.
fn render_table(style: &Style, columns: &[Column], rows: &[Vec<Cell>], max_width: usize) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| char_len(c.header)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(char_len(&cell.text));
        }
    }

    let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
    if total > max_width {
        let mut excess = total - max_width;
        for (i, column) in columns.iter().enumerate() {
            if !column.flexible || excess == 0 {
                continue;
            }
            let floor = MIN_FLEX_WIDTH.max(char_len(column.header));
            let give = widths[i].saturating_sub(floor).min(excess);
            widths[i] -= give;
            excess -= give;
        }
    }

    let align = |text: &str, i: usize| match columns[i].align {
        Align::Left => pad_right(text, widths[i]),
        Align::Right => pad_left(text, widths[i]),
    };

    let mut output = String::new();
    let header: Vec<String> = columns.iter().enumerate()
        .map(|(i, c)| align(c.header, i))
        .collect();
    output.push_str(style.bold(header.join(" ").trim_end()).as_str());
    output.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&separator.join(" "));
    output.push('\n');

    for row in rows {
        let cells: Vec<String> = row.iter().enumerate()
            .map(|(i, cell)| {
                let text = truncate(&cell.text, widths[i]);
                style.paint_opt(&align(&text, i), cell.tone)
            })
            .collect();
        output.push_str(cells.join(" ").trim_end());
        output.push('\n');
    }
    output
}

pub fn format_tenant_table(tenants: &[Tenant], style: &Style) -> String {
    if tenants.is_empty() {
        return "No tenants found.\n".to_string();
    }
    let columns = [
        Column::right("ID"),
        Column::flexible("Name"),
        Column::left("Subdomain"),
        Column::left("Plan"),
        Column::left("Status"),
        Column::left("Created"),
    ];
    let rows: Vec<Vec<Cell>> = tenants.iter().map(|t| vec![
        Cell::plain(t.id.to_string()),
        Cell::plain(t.name.as_str()),
        Cell::plain(t.subdomain.as_str()),
        Cell::plain(t.plan.as_str()),
        Cell::toned(t.status.as_str(), Some(tenant_status_tone(t.status))),
        Cell::plain(format_date(&t.created_at)),
    ]).collect();
    render_table(style, &columns, &rows, get_terminal_width())
}

pub fn format_tenant_summary(tenant: &Tenant, style: &Style) -> String {
    let mut output = String::new();
    let header = format!("Tenant {}: {}", tenant.id, tenant.name);
    output.push_str(&style.bold(&header));
    output.push('\n');
    output.push_str(&"=".repeat(char_len(&header).max(RULE_WIDTH)));
    output.push_str("\n\n");

    output.push_str(&format!("  Subdomain:  {}\n", tenant.subdomain));
    output.push_str(&format!("  Plan:       {}\n", tenant.plan));
    output.push_str(&format!(
        "  Status:     {}\n",
        style.paint(tenant.status.as_str(), tenant_status_tone(tenant.status))
    ));
    output.push_str(&format!("  Admin:      {}\n", tenant.admin_email));
    output.push_str(&format!(
        "  Region:     {}\n",
        tenant.region.as_deref().unwrap_or("(none)")
    ));
    output.push_str(&format!("  Created:    {}\n", format_timestamp(&tenant.created_at)));
    output
}

pub fn format_admin_table(admins: &[AdminUser], style: &Style) -> String {
    if admins.is_empty() {
        return "No admin users found.\n".to_string();
    }
    let now = Utc::now();
    let columns = [
        Column::right("ID"),
        Column::flexible("Email"),
        Column::flexible("Name"),
        Column::left("Role"),
        Column::left("Last login"),
    ];
    let rows: Vec<Vec<Cell>> = admins.iter().map(|a| {
        let last_login = match &a.last_login_at {
            Some(ts) => Cell::plain(format_relative(ts, now)),
            None => Cell::toned("never", Some(Tone::Muted)),
        };
        vec![
            Cell::plain(a.id.to_string()),
            Cell::plain(a.email.as_str()),
            Cell::plain(a.name.as_str()),
            Cell::plain(a.role.as_str()),
            last_login,
        ]
    }).collect();
    render_table(style, &columns, &rows, get_terminal_width())
}

pub fn format_contact_table(messages: &[ContactMessage], style: &Style) -> String {
    if messages.is_empty() {
        return "No contact messages found.\n".to_string();
    }
    let now = Utc::now();
    let columns = [
        Column::right("ID"),
        Column::left("Status"),
        Column::flexible("From"),
        Column::flexible("Subject"),
        Column::left("Received"),
    ];
    let rows: Vec<Vec<Cell>> = messages.iter().map(|m| vec![
        Cell::plain(m.id.to_string()),
        Cell::toned(m.status.as_str(), contact_status_tone(m.status)),
        Cell::plain(format!("{} <{}>", m.name, m.email)),
        Cell::plain(m.subject.as_str()),
        Cell::plain(format_relative(&m.created_at, now)),
    ]).collect();
    render_table(style, &columns, &rows, get_terminal_width())
}

pub fn format_contact_detail(message: &ContactMessage, style: &Style) -> String {
    let mut output = String::new();
    let header = format!("Message {}: {}", message.id, message.subject);
    output.push_str(&style.bold(&header));
    output.push('\n');
    output.push_str(&"=".repeat(char_len(&header).max(RULE_WIDTH)));
    output.push_str("\n\n");

    output.push_str(&format!("  From:      {} <{}>\n", message.name, message.email));
    output.push_str(&format!(
        "  Status:    {}\n",
        style.paint_opt(message.status.as_str(), contact_status_tone(message.status))
    ));
    output.push_str(&format!("  Received:  {}\n\n", format_timestamp(&message.created_at)));

    for line in message.message.lines() {
        output.push_str("  ");
        output.push_str(line);
        output.push('\n');
    }
    output
}

// ---------------------------------------------------------------------------
// Funnel views
// ---------------------------------------------------------------------------

fn has_period_change(report: &FunnelReport) -> bool {
    report.rows.iter().any(|r| r.period_change.is_some())
}

fn overall_line(report: &FunnelReport, style: &Style) -> String {
    format!(
        "Overall conversion: {}\n",
        style.bold(&format_percent(report.overall_conversion))
    )
}

/// Table with one row per canonical stage
pub fn format_funnel_list(report: &FunnelReport, style: &Style) -> String {
    if report.is_empty() {
        return format!("{}\n", EMPTY_FUNNEL_MESSAGE);
    }
    let compare = has_period_change(report);

    let mut columns = vec![
        Column::flexible("Stage"),
        Column::right("Count"),
        Column::right("Share"),
        Column::right("Step"),
        Column::right("Drop-off"),
    ];
    if compare {
        columns.push(Column::right("Change"));
    }
    columns.push(Column::left("Benchmark"));

    let rows: Vec<Vec<Cell>> = report.rows.iter().map(|row| {
        let mut cells = vec![
            Cell::plain(row.stage.name.as_str()),
            Cell::plain(row.stage.count.to_string()),
            Cell::plain(format_percent(Some(row.stage.percentage))),
            Cell::plain(format_percent(row.step_conversion)),
            Cell::toned(format_dropoff(row.stage.dropoff), dropoff_tone(row.stage.dropoff)),
        ];
        if compare {
            cells.push(Cell::toned(format_change(row.period_change), change_tone(row.period_change)));
        }
        cells.push(Cell::toned(
            format_benchmark(row),
            row.benchmark.and_then(|b| verdict_tone(b.verdict)),
        ));
        cells
    }).collect();

    let mut output = render_table(style, &columns, &rows, get_terminal_width());
    output.push('\n');
    output.push_str(&overall_line(report, style));
    output
}

/// Horizontal bars scaled to each stage's share of entry traffic
pub fn format_funnel_bars(report: &FunnelReport, style: &Style) -> String {
    format_funnel_bars_width(report, style, get_terminal_width())
}

fn format_funnel_bars_width(report: &FunnelReport, style: &Style, term_width: usize) -> String {
    if report.is_empty() {
        return format!("{}\n", EMPTY_FUNNEL_MESSAGE);
    }
    let name_width = report.rows.iter().map(|r| char_len(&r.stage.name)).max().unwrap_or(0);
    let bar_width = term_width
        .saturating_sub(name_width + 24)
        .clamp(10, BAR_MAX_WIDTH);

    let mut output = String::new();
    for row in &report.rows {
        let share = row.stage.percentage.clamp(0.0, 100.0);
        let filled = ((share / 100.0) * bar_width as f64).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(bar_width - filled));
        output.push_str(&format!(
            "{} {} {} ({})\n",
            pad_right(&row.stage.name, name_width),
            style.paint(&bar, Tone::Accent),
            pad_left(&format_percent(Some(row.stage.percentage)), 6),
            row.stage.count
        ));
    }
    output.push('\n');
    output.push_str(&overall_line(report, style));
    output
}

/// One boxed card per stage
pub fn format_funnel_cards(report: &FunnelReport, style: &Style) -> String {
    if report.is_empty() {
        return format!("{}\n", EMPTY_FUNNEL_MESSAGE);
    }
    let inner = CARD_WIDTH - 4;
    let border = format!("+{}+\n", "-".repeat(CARD_WIDTH - 2));
    let line = |text: &str, tone: Option<Tone>| {
        let padded = pad_right(&truncate(text, inner), inner);
        format!("| {} |\n", style.paint_opt(&padded, tone))
    };

    let mut output = String::new();
    for (i, row) in report.rows.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&border);
        output.push_str(&line(&format!("{}. {}", i + 1, row.stage.name), Some(Tone::Accent)));
        output.push_str(&line(
            &format!("{} ({})", row.stage.count, format_percent(Some(row.stage.percentage))),
            None,
        ));
        output.push_str(&line(
            &format!(
                "step {}  drop-off {}",
                format_percent(row.step_conversion),
                format_dropoff(row.stage.dropoff)
            ),
            dropoff_tone(row.stage.dropoff),
        ));
        if row.period_change.is_some() {
            output.push_str(&line(
                &format!("vs previous {}", format_change(row.period_change)),
                change_tone(row.period_change),
            ));
        }
        if let Some(b) = &row.benchmark {
            output.push_str(&line(
                &format!("benchmark {} {}", format_percent(Some(b.benchmark)), b.verdict.as_str()),
                verdict_tone(b.verdict),
            ));
        }
        output.push_str(&border);
    }
    output.push('\n');
    output.push_str(&overall_line(report, style));
    output
}

/// Per-stage sections with timing and error counts.
/// `timings` and `errors` must already be bucketed by canonical stage.
pub fn format_funnel_detail(
    report: &FunnelReport,
    timings: &[StageTiming],
    errors: &[StageErrorCount],
    style: &Style,
) -> String {
    if report.is_empty() {
        return format!("{}\n", EMPTY_FUNNEL_MESSAGE);
    }

    let mut output = String::new();
    for row in &report.rows {
        let name = &row.stage.name;
        output.push_str(&style.bold(name));
        output.push('\n');
        output.push_str(&format!(
            "  Count:       {} ({} of entry)\n",
            row.stage.count,
            format_percent(Some(row.stage.percentage))
        ));
        output.push_str(&format!("  Step:        {}\n", format_percent(row.step_conversion)));
        output.push_str(&format!(
            "  Drop-off:    {}\n",
            style.paint_opt(&format_dropoff(row.stage.dropoff), dropoff_tone(row.stage.dropoff))
        ));
        if row.period_change.is_some() {
            output.push_str(&format!(
                "  Change:      {}\n",
                style.paint_opt(&format_change(row.period_change), change_tone(row.period_change))
            ));
        }
        if let Some(b) = &row.benchmark {
            output.push_str(&format!(
                "  Benchmark:   {} ({})\n",
                format_percent(Some(b.benchmark)),
                style.paint_opt(&format!("{:+.1} pts, {}", b.delta, b.verdict.as_str()), verdict_tone(b.verdict))
            ));
        }
        match timings.iter().find(|t| &t.stage == name) {
            Some(t) => {
                let median = t.median_seconds
                    .map(|m| format!(" (median {})", format_seconds(m)))
                    .unwrap_or_default();
                output.push_str(&format!("  Avg time:    {}{}\n", format_seconds(t.avg_seconds), median));
            }
            None => output.push_str(&format!("  Avg time:    {}\n", style.muted("-"))),
        }
        let error_count = errors.iter().find(|e| &e.stage == name).map(|e| e.count).unwrap_or(0);
        let error_text = error_count.to_string();
        output.push_str(&format!(
            "  Errors:      {}\n",
            if error_count > 0 { style.paint(&error_text, Tone::Bad) } else { error_text }
        ));
        output.push('\n');
    }
    output.push_str(&overall_line(report, style));
    output
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn unavailable(style: &Style) -> String {
    format!("{}\n", style.muted("unavailable"))
}

/// Sections for `provadmin status`. A section whose data could not be
/// fetched reads "unavailable".
pub fn format_dashboard(dashboard: &Dashboard, style: &Style) -> String {
    let mut output = String::new();

    output.push_str("=== Tenants ===\n");
    match &dashboard.tenants {
        Some(counts) => {
            let total: usize = counts.iter().map(|c| c.count).sum();
            let parts: Vec<String> = counts.iter()
                .filter(|c| c.count > 0)
                .map(|c| format!("{} {}", c.count, style.paint(c.status.as_str(), tenant_status_tone(c.status))))
                .collect();
            if parts.is_empty() {
                output.push_str("0 tenants\n");
            } else {
                output.push_str(&format!("{} total: {}\n", total, parts.join(", ")));
            }
        }
        None => output.push_str(&unavailable(style)),
    }
    output.push('\n');

    output.push_str(&format!("=== Signup Funnel (last {} days) ===\n", dashboard.days));
    match &dashboard.funnel {
        Some(funnel) if funnel.stages == 0 => {
            output.push_str(&format!("{}\n", EMPTY_FUNNEL_MESSAGE));
        }
        Some(funnel) => {
            output.push_str(&format!(
                "{} stage(s), overall conversion {}\n",
                funnel.stages,
                format_percent(funnel.overall_conversion)
            ));
        }
        None => output.push_str(&unavailable(style)),
    }
    output.push('\n');

    output.push_str("=== Signup Sessions ===\n");
    match &dashboard.sessions {
        Some(s) => {
            output.push_str(&format!(
                "{} session(s): {} active, {} completed, {} abandoned ({} completion)\n",
                s.total,
                s.active,
                s.completed,
                s.abandoned,
                format_percent(s.completion_rate())
            ));
        }
        None => output.push_str(&unavailable(style)),
    }
    output.push('\n');

    output.push_str("=== Contact Messages ===\n");
    match dashboard.new_contacts {
        Some(0) => output.push_str("No new messages.\n"),
        Some(n) => output.push_str(&format!("{} new message(s)\n", style.paint(&n.to_string(), Tone::Accent))),
        None => output.push_str(&unavailable(style)),
    }

    output
}
