use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FUNNEL_DAYS: u32 = 30;

/// Keys accepted in the rc file
pub const CONFIG_KEYS: &[&str] = &[
    "api.url",
    "api.token",
    "api.timeout",
    "api.fixtures",
    "ui.color",
    "ui.theme",
    "funnel.days",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Settings for one invocation, read from `~/.provadmin/rc`
/// and overridden by `PROVADMIN_*` environment variables.
///
/// The rc file holds `key=value` lines; blank lines and `#` comments are ignored.
///
/// ```text
/// api.url=https://admin.example.com/api
/// api.token=eyJhbGciOi...
/// ui.color=auto
/// funnel.days=14
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    /// Replay fixture directory; when set no network requests are made
    pub fixtures: Option<PathBuf>,
    pub color: ColorMode,
    pub theme: Theme,
    pub funnel_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fixtures: None,
            color: ColorMode::Auto,
            theme: Theme::Dark,
            funnel_days: DEFAULT_FUNNEL_DAYS,
        }
    }
}

impl Settings {
    /// Directory holding the rc file
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Failed to determine home directory")?;
        Ok(home.join(".provadmin"))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("rc"))
    }

    /// Load settings from the default rc file plus environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut settings = Self::load_from(&path)?;
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Load settings from an rc file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = Self::default();
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(settings);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        for (line_no, line) in content.lines().enumerate() {
            let Some((key, value)) = parse_line(line) else {
                continue;
            };
            settings
                .apply(key, value, base_dir)
                .with_context(|| format!("{}:{}", path.display(), line_no + 1))?;
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// Apply one key/value pair
    pub fn apply(&mut self, key: &str, value: &str, base_dir: &Path) -> Result<()> {
        match key {
            "api.url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    anyhow::bail!("Invalid value for api.url: '{}'. Expected an http:// or https:// URL.", value);
                }
                self.api_url = value.trim_end_matches('/').to_string();
            }
            "api.token" => {
                self.token = if value.is_empty() { None } else { Some(value.to_string()) };
            }
            "api.timeout" => {
                let secs = value.parse::<u64>().ok().filter(|s| *s > 0)
                    .ok_or_else(|| anyhow::anyhow!("Invalid value for api.timeout: '{}'. Expected a positive number of seconds.", value))?;
                self.timeout = Duration::from_secs(secs);
            }
            "api.fixtures" => {
                if value.is_empty() {
                    self.fixtures = None;
                } else {
                    let path = PathBuf::from(value);
                    // Relative paths resolve against the rc file's directory
                    self.fixtures = Some(if path.is_relative() { base_dir.join(path) } else { path });
                }
            }
            "ui.color" => {
                self.color = ColorMode::from_str(value)
                    .ok_or_else(|| anyhow::anyhow!("Invalid value for ui.color: '{}'. Expected auto, always or never.", value))?;
            }
            "ui.theme" => {
                self.theme = Theme::from_str(value)
                    .ok_or_else(|| anyhow::anyhow!("Invalid value for ui.theme: '{}'. Expected dark or light.", value))?;
            }
            "funnel.days" => {
                self.funnel_days = value.parse::<u32>().ok().filter(|d| *d > 0)
                    .ok_or_else(|| anyhow::anyhow!("Invalid value for funnel.days: '{}'. Expected a positive number of days.", value))?;
            }
            _ => anyhow::bail!("Unknown config key '{}'", key),
        }
        Ok(())
    }

    /// Environment variables win over the rc file
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        for (var, key) in [
            ("PROVADMIN_API_URL", "api.url"),
            ("PROVADMIN_TOKEN", "api.token"),
            ("PROVADMIN_FIXTURES", "api.fixtures"),
        ] {
            if let Some(value) = lookup(var) {
                self.apply(key, value.trim(), &cwd)
                    .with_context(|| format!("Invalid environment variable {}", var))?;
            }
        }
        Ok(())
    }

    /// Render the effective settings as `key=value` lines, token masked
    pub fn display_lines(&self) -> Vec<(String, String)> {
        let token = match &self.token {
            Some(t) if t.chars().count() > 8 => format!("{}...", t.chars().take(8).collect::<String>()),
            Some(_) => "(set)".to_string(),
            None => "(not set)".to_string(),
        };
        vec![
            ("api.url".to_string(), self.api_url.clone()),
            ("api.token".to_string(), token),
            ("api.timeout".to_string(), self.timeout.as_secs().to_string()),
            ("api.fixtures".to_string(), self.fixtures.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(live API)".to_string())),
            ("ui.color".to_string(), self.color.as_str().to_string()),
            ("ui.theme".to_string(), self.theme.as_str().to_string()),
            ("funnel.days".to_string(), self.funnel_days.to_string()),
        ]
    }

    /// Write `key=value` into the rc file, replacing an existing entry and
    /// keeping every other line as it was. An empty value removes the key.
    pub fn set_value(path: &Path, key: &str, value: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let existing = if path.exists() {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?
        } else {
            String::new()
        };

        let updated = update_rc_content(&existing, key, value);
        std::fs::write(path, updated)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

/// Split an rc line into key and value, skipping blanks and comments
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

fn update_rc_content(existing: &str, key: &str, value: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut replaced = false;
    for line in existing.lines() {
        let is_target = matches!(parse_line(line), Some((k, _)) if k == key);
        if is_target {
            if !replaced && !value.is_empty() {
                lines.push(format!("{}={}", key, value));
            }
            replaced = true;
        } else {
            lines.push(line.to_string());
        }
    }
    if !replaced && !value.is_empty() {
        lines.push(format!("{}={}", key, value));
    }

    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    content
}
