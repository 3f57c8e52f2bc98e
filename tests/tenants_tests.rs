use predicates::prelude::*;
mod test_env;
use test_env::*;

#[test]
fn test_tenants_list_table() {
    let env = TestEnv::new();
    env.fixture("tenants.json", TENANTS_JSON);

    let output = env.cmd().args(["tenants", "list"]).assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert!(lines[0].starts_with("ID Name"));
    assert!(lines[1].starts_with("-- "));
    assert!(lines[2].starts_with(" 7 Acme Corp"));
    assert!(lines[3].contains("suspended"));
    assert!(lines[4].contains("provisioning"));
}

#[test]
fn test_tenants_list_status_filter_is_sent() {
    let env = TestEnv::new();
    env.fixture("tenants.json", TENANTS_JSON)
        .fixture("tenants.status-suspended.json", &format!("[{}]", GLOBEX_JSON));

    env.cmd().args(["tenants", "list", "--status", "suspended"]).assert()
        .success()
        .stdout(predicate::str::contains("Globex"))
        .stdout(predicate::str::contains("Acme").not());
}

#[test]
fn test_tenants_list_invalid_status() {
    let env = TestEnv::new();
    env.cmd().args(["tenants", "list", "--status", "zombie"]).assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid tenant status: 'zombie'"));
}

#[test]
fn test_tenants_search_is_fuzzy() {
    let env = TestEnv::new();
    env.fixture("tenants.json", TENANTS_JSON);

    // Substring of the name
    env.cmd().args(["tenants", "list", "--search", "acme"]).assert()
        .success()
        .stdout(predicate::str::contains("Acme Corp"))
        .stdout(predicate::str::contains("Globex").not());

    // Misspelled subdomain within two edits
    env.cmd().args(["tenants", "list", "--search", "glbex"]).assert()
        .success()
        .stdout(predicate::str::contains("Globex"))
        .stdout(predicate::str::contains("Acme").not());

    env.cmd().args(["tenants", "list", "--search", "umbrella"]).assert()
        .success()
        .stdout(predicate::str::contains("No tenants found."));
}

#[test]
fn test_tenants_list_json() {
    let env = TestEnv::new();
    env.fixture("tenants.json", TENANTS_JSON);

    let output = env.cmd().args(["tenants", "list", "--json"]).assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let tenants = value.as_array().unwrap();
    assert_eq!(tenants.len(), 3);
    assert_eq!(tenants[1]["status"], "suspended");
}

#[test]
fn test_tenants_show() {
    let env = TestEnv::new();
    env.fixture("tenants_7.json", ACME_JSON);

    env.cmd().args(["tenants", "show", "7"]).assert()
        .success()
        .stdout(predicate::str::contains("Tenant 7: Acme Corp"))
        .stdout(predicate::str::contains("Subdomain:  acme"))
        .stdout(predicate::str::contains("Region:     eu-west-1"));
}

#[test]
fn test_tenants_show_not_found() {
    let env = TestEnv::new();
    env.cmd().args(["tenants", "show", "99"]).assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Tenant 99 not found"));
}

#[test]
fn test_tenants_show_invalid_id() {
    let env = TestEnv::new();
    env.cmd().args(["tenants", "show", "abc"]).assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid tenant ID: 'abc'"));
}

#[test]
fn test_tenants_suspend_with_yes() {
    let env = TestEnv::new();
    env.fixture("tenants_7.json", ACME_JSON);

    env.cmd().args(["tenants", "suspend", "7", "-y"]).assert()
        .success()
        .stdout(predicate::str::contains("Suspended tenant 7 (Acme Corp)."));

    let requests = env.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["method"], "PATCH");
    assert_eq!(requests[0]["path"], "/tenants/7");
    assert_eq!(requests[0]["body"]["status"], "suspended");
}

#[test]
fn test_tenants_suspend_prompt_declined() {
    let env = TestEnv::new();
    env.fixture("tenants_7.json", ACME_JSON);

    env.cmd().args(["tenants", "suspend", "7"]).write_stdin("n\n").assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));
    assert!(env.requests().is_empty());
}

#[test]
fn test_tenants_suspend_prompt_accepted() {
    let env = TestEnv::new();
    env.fixture("tenants_7.json", ACME_JSON);

    env.cmd().args(["tenants", "suspend", "7"]).write_stdin("yes\n").assert()
        .success()
        .stderr(predicate::str::contains("Suspend tenant 7 (Acme Corp)?"));
    assert_eq!(env.requests().len(), 1);
}

#[test]
fn test_tenants_resume() {
    let env = TestEnv::new();
    env.fixture("tenants_8.json", GLOBEX_JSON).fixture("tenants_7.json", ACME_JSON);

    env.cmd().args(["tenants", "resume", "8"]).assert()
        .success()
        .stdout(predicate::str::contains("Resumed tenant 8 (Globex)."));
    assert_eq!(env.requests()[0]["body"]["status"], "active");

    // Active tenants cannot be resumed
    env.cmd().args(["tenants", "resume", "7"]).assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not suspended (status: active)"));
}

#[test]
fn test_tenants_id_first_syntax() {
    let env = TestEnv::new();
    env.fixture("tenants_7.json", ACME_JSON);

    env.cmd().args(["ten", "7", "susp", "-y"]).assert()
        .success()
        .stdout(predicate::str::contains("Suspended tenant 7"));
}
