#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME with an rc file pointing the CLI at a replay fixture
/// directory, so no test ever reaches the network.
pub struct TestEnv {
    home: TempDir,
    fixtures: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let home = TempDir::new().unwrap();
        let fixtures = home.path().join("fixtures");
        fs::create_dir_all(&fixtures).unwrap();

        let config_dir = home.path().join(".provadmin");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("rc"),
            format!("api.fixtures={}\nui.color=never\n", fixtures.display()),
        ).unwrap();

        Self { home, fixtures }
    }

    /// HOME without any rc file
    pub fn bare() -> Self {
        let home = TempDir::new().unwrap();
        let fixtures = home.path().join("fixtures");
        Self { home, fixtures }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn rc_path(&self) -> PathBuf {
        self.home.path().join(".provadmin").join("rc")
    }

    pub fn rc(&self) -> String {
        fs::read_to_string(self.rc_path()).unwrap_or_default()
    }

    /// Write a fixture file, e.g. `tenants_7.json`
    pub fn fixture(&self, name: &str, json: &str) -> &Self {
        fs::write(self.fixtures.join(name), json).unwrap();
        self
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("provadmin").unwrap();
        cmd.env("HOME", self.home.path())
            .env_remove("PROVADMIN_API_URL")
            .env_remove("PROVADMIN_TOKEN")
            .env_remove("PROVADMIN_FIXTURES")
            .env_remove("PROVADMIN_PASSWORD")
            .env_remove("RUST_LOG")
            .env("COLUMNS", "120");
        cmd
    }

    /// Write requests recorded by the replay transport, oldest first
    pub fn requests(&self) -> Vec<serde_json::Value> {
        let path = self.fixtures.join("requests.log");
        let Ok(log) = fs::read_to_string(path) else {
            return Vec::new();
        };
        log.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

pub const TENANTS_JSON: &str = r#"[
    {"id": 7, "name": "Acme Corp", "subdomain": "acme", "plan": "pro", "status": "active",
     "admin_email": "ops@acme.test", "region": "eu-west-1", "created_at": "2026-03-01T12:00:00Z"},
    {"id": 8, "name": "Globex", "subdomain": "globex", "plan": "starter", "status": "suspended",
     "admin_email": "it@globex.test", "created_at": "2026-03-04T09:30:00Z"},
    {"id": 9, "name": "Initech", "subdomain": "initech", "plan": "pro", "status": "provisioning",
     "admin_email": "bill@initech.test", "created_at": "2026-03-10T16:45:00Z"}
]"#;

pub const ACME_JSON: &str = r#"{"id": 7, "name": "Acme Corp", "subdomain": "acme", "plan": "pro",
    "status": "active", "admin_email": "ops@acme.test", "region": "eu-west-1",
    "created_at": "2026-03-01T12:00:00Z"}"#;

pub const GLOBEX_JSON: &str = r#"{"id": 8, "name": "Globex", "subdomain": "globex", "plan": "starter",
    "status": "suspended", "admin_email": "it@globex.test", "created_at": "2026-03-04T09:30:00Z"}"#;

/// Raw funnel as the API reports it: aliases, and a label that only
/// resolves by substring ("Stripe Redirect Page")
pub const FUNNEL_JSON: &str = r#"{"period_days": 30, "stages": [
    {"name": "Button Clicks", "count": 200, "percentage": 100.0},
    {"name": "Started", "count": 130, "percentage": 65.0},
    {"name": "Plan Selected", "count": 120, "percentage": 60.0},
    {"name": "Step 1 Completed", "count": 80, "percentage": 40.0},
    {"name": "Stripe Redirect Page", "count": 60, "percentage": 30.0},
    {"name": "Provisioned", "count": 30, "percentage": 15.0}
]}"#;

pub const PREVIOUS_FUNNEL_JSON: &str = r#"{"period_days": 30, "stages": [
    {"name": "Button Clicks", "count": 100, "percentage": 100.0},
    {"name": "Plan Selected", "count": 100, "percentage": 100.0},
    {"name": "Provisioned", "count": 20, "percentage": 20.0}
]}"#;

pub const CONTACTS_JSON: &str = r#"[
    {"id": 12, "name": "Jane Doe", "email": "jane@example.test", "subject": "Pricing question",
     "message": "Do you offer annual billing?", "status": "new", "created_at": "2026-03-14T08:00:00Z"},
    {"id": 13, "name": "Sam Roe", "email": "sam@example.test", "subject": "Bug report",
     "message": "Checkout page spins forever.", "status": "replied", "created_at": "2025-12-01T08:00:00Z"}
]"#;

pub const ADMINS_JSON: &str = r#"[
    {"id": 1, "email": "root@provadmin.test", "name": "Root", "role": "owner",
     "created_at": "2025-01-01T00:00:00Z", "last_login_at": "2026-03-14T08:00:00Z"},
    {"id": 3, "email": "temp@provadmin.test", "name": "Temp Contractor", "role": "viewer",
     "created_at": "2026-02-01T00:00:00Z"}
]"#;
