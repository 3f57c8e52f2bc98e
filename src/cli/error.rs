// Error handling utilities for consistent error messages and exit codes

use std::process;
use crate::api::ApiError;
use crate::config::CONFIG_KEYS;
use crate::models::{AdminRole, ContactStatus, TenantStatus};
use crate::utils::fuzzy::closest_match;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing resources, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Exit with an internal error (exit code >1)
/// Internal errors are for network failures, unreadable responses, local I/O
pub fn internal_error(message: &str) -> ! {
    eprintln!("Internal error: {}", message);
    process::exit(2);
}

/// First `ApiError` in an error's cause chain
pub fn find_api_error(err: &anyhow::Error) -> Option<&ApiError> {
    err.chain().find_map(|cause| cause.downcast_ref::<ApiError>())
}

/// Classify an error that reached `main`.
/// API errors classify themselves; local I/O and JSON encoding failures are
/// internal; everything else (validation, config values) is the user's.
pub fn is_internal_error(err: &anyhow::Error) -> bool {
    if let Some(api_error) = find_api_error(err) {
        return api_error.is_internal();
    }
    err.chain().any(|cause| cause.is::<std::io::Error>() || cause.is::<serde_json::Error>())
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a record ID (positive integer)
pub fn validate_record_id(id_str: &str, kind: &str) -> Result<i64, String> {
    id_str.parse::<i64>()
        .map_err(|_| format!("Invalid {} ID: '{}'. ID must be a number.", kind, id_str))
        .and_then(|id| {
            if id > 0 {
                Ok(id)
            } else {
                Err(format!("Invalid {} ID: {}. ID must be positive.", kind, id))
            }
        })
}

/// Minimal shape check: one '@', non-empty local part, dotted domain, no spaces
pub fn validate_email(email: &str) -> Result<(), String> {
    let invalid = || format!("Invalid email address: '{}'", email);
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

fn names_list<T, F: Fn(&T) -> &'static str>(values: &[T], name: F) -> String {
    values.iter().map(name).collect::<Vec<_>>().join(", ")
}

pub fn parse_tenant_status(value: &str) -> Result<TenantStatus, String> {
    TenantStatus::from_str(&value.to_lowercase()).ok_or_else(|| {
        format!(
            "Invalid tenant status: '{}'. Expected one of: {}.",
            value,
            names_list(&TenantStatus::ALL, |s| s.as_str())
        )
    })
}

pub fn parse_admin_role(value: &str) -> Result<AdminRole, String> {
    AdminRole::from_str(&value.to_lowercase()).ok_or_else(|| {
        format!(
            "Invalid role: '{}'. Expected one of: {}.",
            value,
            names_list(&[AdminRole::Owner, AdminRole::Admin, AdminRole::Viewer], |r| r.as_str())
        )
    })
}

pub fn parse_contact_status(value: &str) -> Result<ContactStatus, String> {
    ContactStatus::from_str(&value.to_lowercase()).ok_or_else(|| {
        format!(
            "Invalid contact status: '{}'. Expected one of: {}.",
            value,
            names_list(
                &[ContactStatus::New, ContactStatus::Read, ContactStatus::Replied, ContactStatus::Archived],
                |s| s.as_str()
            )
        )
    })
}

/// Validate a config key, suggesting the closest known key on a typo
pub fn validate_config_key(key: &str) -> Result<(), String> {
    if CONFIG_KEYS.contains(&key) {
        return Ok(());
    }
    match closest_match(key, CONFIG_KEYS, 3) {
        Some(suggestion) => Err(format!("Unknown config key '{}'\n  Did you mean '{}'?", key, suggestion)),
        None => Err(format!("Unknown config key '{}'. Known keys: {}", key, CONFIG_KEYS.join(", "))),
    }
}
