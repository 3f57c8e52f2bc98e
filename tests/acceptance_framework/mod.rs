// Acceptance Test Framework
// Provides infrastructure for writing Given/When/Then acceptance tests

#![allow(dead_code)]

use crate::test_env::TestEnv;
use serde_json::Value;

/// Test context for acceptance tests
/// Owns an isolated HOME whose API responses come from replay fixtures
pub struct AcceptanceTestContext {
    env: TestEnv,
}

impl AcceptanceTestContext {
    pub fn new() -> Self {
        Self { env: TestEnv::new() }
    }

    pub fn env(&self) -> &TestEnv {
        &self.env
    }
}

/// Builder for Given steps (test setup)
pub struct GivenBuilder<'a> {
    ctx: &'a AcceptanceTestContext,
}

impl<'a> GivenBuilder<'a> {
    pub fn new(ctx: &'a AcceptanceTestContext) -> Self {
        Self { ctx }
    }

    /// Given: the API answers `GET <path>` with this body
    pub fn fixture_exists(&self, name: &str, json: &str) -> &Self {
        self.ctx.env.fixture(name, json);
        self
    }

    /// Given: funnel analytics report these raw stages
    /// (name, count, percentage)
    pub fn funnel_stages(&self, stages: &[(&str, i64, f64)]) -> &Self {
        let stages: Vec<Value> = stages
            .iter()
            .map(|(name, count, percentage)| {
                serde_json::json!({"name": name, "count": count, "percentage": percentage})
            })
            .collect();
        let body = serde_json::json!({ "stages": stages });
        self.fixture_exists("analytics_funnel.json", &body.to_string())
    }

    /// Given: a session token is stored
    pub fn logged_in(&self) -> &Self {
        let mut rc = self.ctx.env.rc();
        rc.push_str("api.token=tok_acceptance\n");
        std::fs::write(self.ctx.env.rc_path(), rc).unwrap();
        self
    }
}

/// Builder for When steps (actions)
pub struct WhenBuilder<'a> {
    ctx: &'a AcceptanceTestContext,
    cmd_result: Option<std::process::Output>,
}

impl<'a> WhenBuilder<'a> {
    pub fn new(ctx: &'a AcceptanceTestContext) -> Self {
        Self { ctx, cmd_result: None }
    }

    /// When: execute command
    pub fn execute(&mut self, args: &[&str]) -> &mut Self {
        let result = self.ctx.env.cmd().args(args).output().unwrap();
        self.cmd_result = Some(result);
        self
    }

    /// When: execute command with the given stdin
    pub fn execute_with_input(&mut self, args: &[&str], input: &str) -> &mut Self {
        let result = self.ctx.env.cmd().args(args).write_stdin(input).output().unwrap();
        self.cmd_result = Some(result);
        self
    }

    /// Get the command result for assertions
    pub fn result(&self) -> Option<&std::process::Output> {
        self.cmd_result.as_ref()
    }
}

/// Builder for Then steps (assertions)
pub struct ThenBuilder<'a> {
    ctx: &'a AcceptanceTestContext,
    when_result: Option<&'a std::process::Output>,
}

impl<'a> ThenBuilder<'a> {
    pub fn new(ctx: &'a AcceptanceTestContext, when_result: Option<&'a std::process::Output>) -> Self {
        Self { ctx, when_result }
    }

    fn stdout(&self) -> String {
        let result = self.when_result.expect("no command was executed");
        String::from_utf8_lossy(&result.stdout).into_owned()
    }

    /// Then: exit code is
    pub fn exit_code_is(&self, expected: i32) -> &Self {
        if let Some(result) = self.when_result {
            let actual = result.status.code().unwrap_or(-1);
            assert_eq!(
                actual, expected,
                "Expected exit code {}, got {}\nstderr: {}",
                expected, actual, String::from_utf8_lossy(&result.stderr)
            );
        }
        self
    }

    /// Then: message contains
    pub fn message_contains(&self, text: &str) -> &Self {
        if let Some(result) = self.when_result {
            let output = String::from_utf8_lossy(&result.stdout);
            let error = String::from_utf8_lossy(&result.stderr);
            assert!(
                output.contains(text) || error.contains(text),
                "Expected message to contain '{}', but got stdout: '{}', stderr: '{}'",
                text, output, error
            );
        }
        self
    }

    /// Then: the consolidated funnel (from `funnel --json`) is exactly
    /// these (name, count, dropoff) rows in order
    pub fn funnel_is(&self, expected: &[(&str, i64, i64)]) -> &Self {
        let value: Value = serde_json::from_str(&self.stdout()).unwrap();
        let actual: Vec<(String, i64, i64)> = value["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| {
                let stage = &row["stage"];
                (
                    stage["name"].as_str().unwrap().to_string(),
                    stage["count"].as_i64().unwrap(),
                    stage["dropoff"].as_i64().unwrap(),
                )
            })
            .collect();
        let expected: Vec<(String, i64, i64)> = expected
            .iter()
            .map(|(name, count, dropoff)| (name.to_string(), *count, *dropoff))
            .collect();
        assert_eq!(actual, expected, "Unexpected funnel");
        self
    }

    /// Then: a request was sent with this method and path
    pub fn request_sent(&self, method: &str, path: &str) -> &Self {
        let requests = self.ctx.env.requests();
        assert!(
            requests.iter().any(|r| r["method"] == method && r["path"] == path),
            "Expected {} {} to be sent, recorded: {:?}",
            method, path, requests
        );
        self
    }

    /// Then: no mutating request was sent
    pub fn no_request_sent(&self) -> &Self {
        let requests = self.ctx.env.requests();
        assert!(requests.is_empty(), "Expected no requests, recorded: {:?}", requests);
        self
    }
}
