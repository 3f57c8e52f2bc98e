use predicates::prelude::*;
use std::fs;
mod test_env;
use test_env::*;

#[test]
fn test_config_show_defaults() {
    let env = TestEnv::bare();

    env.cmd().args(["config", "show"]).assert()
        .success()
        .stdout(predicate::str::contains("api.url"))
        .stdout(predicate::str::contains("http://localhost:8080/api"))
        .stdout(predicate::str::contains("(not set)"))
        .stdout(predicate::str::contains("(live API)"))
        .stdout(predicate::str::contains("funnel.days"));
}

#[test]
fn test_config_show_masks_env_token() {
    let env = TestEnv::new();

    env.cmd().env("PROVADMIN_TOKEN", "abcdefgh12345678").args(["config", "show"]).assert()
        .success()
        .stdout(predicate::str::contains("abcdefgh..."))
        .stdout(predicate::str::contains("12345678").not());
}

#[test]
fn test_config_set_preserves_other_lines() {
    let env = TestEnv::new();
    let before = env.rc();

    env.cmd().args(["config", "set", "api.url", "https://admin.example.com/api"]).assert()
        .success()
        .stdout(predicate::str::contains("Set api.url=https://admin.example.com/api."));

    let after = env.rc();
    assert!(after.contains("api.url=https://admin.example.com/api"));
    for line in before.lines() {
        assert!(after.contains(line), "lost line {:?}", line);
    }

    // Setting again replaces rather than appends
    env.cmd().args(["config", "set", "api.url", "https://other.example.com"]).assert().success();
    assert_eq!(env.rc().matches("api.url=").count(), 1);
}

#[test]
fn test_config_set_empty_value_removes_key() {
    let env = TestEnv::new();
    env.cmd().args(["config", "set", "ui.theme", "light"]).assert().success();
    assert!(env.rc().contains("ui.theme=light"));

    env.cmd().args(["config", "set", "ui.theme", ""]).assert()
        .success()
        .stdout(predicate::str::contains("Removed ui.theme."));
    assert!(!env.rc().contains("ui.theme"));
}

#[test]
fn test_config_set_unknown_key_suggests() {
    let env = TestEnv::new();
    env.cmd().args(["config", "set", "ui.colour", "never"]).assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown config key 'ui.colour'"))
        .stderr(predicate::str::contains("Did you mean 'ui.color'?"));
}

#[test]
fn test_config_set_invalid_value() {
    let env = TestEnv::new();
    let before = env.rc();

    env.cmd().args(["config", "set", "ui.color", "blue"]).assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for ui.color: 'blue'"));
    assert_eq!(env.rc(), before);
}

#[test]
fn test_invalid_rc_value_names_key_and_line() {
    let env = TestEnv::new();
    let mut rc = env.rc();
    rc.push_str("ui.theme=neon\n");
    fs::write(env.rc_path(), rc).unwrap();

    env.cmd().args(["funnel"]).assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("rc:3"))
        .stderr(predicate::str::contains("Invalid value for ui.theme: 'neon'"));
}

#[test]
fn test_login_stores_token() {
    let env = TestEnv::new();
    env.fixture("post_auth_login.json", r#"{"token": "tok_abcdef123456", "expires_at": "2026-04-01T00:00:00Z"}"#);

    env.cmd().args(["login", "--email", "root@provadmin.test", "--password-stdin"])
        .write_stdin("hunter2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as root@provadmin.test."));

    let rc = env.rc();
    assert!(rc.contains("api.token=tok_abcdef123456"));
    assert!(rc.contains("api.fixtures="));

    let requests = env.requests();
    assert_eq!(requests[0]["path"], "/auth/login");
    assert_eq!(requests[0]["body"]["email"], "root@provadmin.test");
    assert_eq!(requests[0]["body"]["password"], "hunter2");
}

#[test]
fn test_login_password_from_env() {
    let env = TestEnv::new();
    env.fixture("post_auth_login.json", r#"{"token": "tok_env"}"#);

    env.cmd().env("PROVADMIN_PASSWORD", "s3cret")
        .args(["login", "--email", "root@provadmin.test"])
        .assert()
        .success();
    assert_eq!(env.requests()[0]["body"]["password"], "s3cret");
}

#[test]
fn test_login_without_password() {
    let env = TestEnv::new();
    env.cmd().args(["login", "--email", "root@provadmin.test"]).assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No password given"));
}

#[test]
fn test_login_rejected_credentials() {
    let env = TestEnv::new();
    env.fixture("post_auth_login.json", r#"{"replay_status": 401, "body": {"error": "bad credentials"}}"#);

    env.cmd().args(["login", "--email", "root@provadmin.test", "--password-stdin"])
        .write_stdin("wrong\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid email or password"));
    assert!(!env.rc().contains("api.token"));
}

#[test]
fn test_logout_removes_token() {
    let env = TestEnv::new();
    env.cmd().args(["config", "set", "api.token", "tok_abcdef123456"]).assert()
        .success()
        .stdout(predicate::str::contains("Set api.token."));
    assert!(env.rc().contains("api.token="));

    env.cmd().args(["logout"]).assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
    assert!(!env.rc().contains("api.token"));
    assert!(env.rc().contains("api.fixtures="));
}
