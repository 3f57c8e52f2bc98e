// Command abbreviation matching for the provadmin CLI

use crate::utils::fuzzy::closest_match;

/// Find all commands that start with the given prefix (case-insensitive)
pub fn find_matching_commands<'a>(prefix: &str, commands: &'a [&str]) -> Vec<&'a str> {
    let prefix_lower = prefix.to_lowercase();
    commands.iter()
        .filter(|cmd| cmd.to_lowercase().starts_with(&prefix_lower))
        .copied()
        .collect()
}

/// Find a unique command match for the given prefix
/// Returns Ok(command) if exactly one match, Err(matches) if ambiguous, Err(empty) if no match
/// Note: Exact matches take precedence over prefix matches
pub fn find_unique_command<'a>(prefix: &str, commands: &'a [&str]) -> Result<&'a str, Vec<&'a str>> {
    let prefix_lower = prefix.to_lowercase();
    for cmd in commands {
        if cmd.to_lowercase() == prefix_lower {
            return Ok(*cmd);
        }
    }

    let matches = find_matching_commands(prefix, commands);

    if matches.is_empty() {
        Err(Vec::new())
    } else if matches.len() == 1 {
        Ok(matches[0])
    } else {
        Err(matches)
    }
}

/// Top-level commands
pub const TOP_LEVEL_COMMANDS: &[&str] = &[
    "login", "logout", "status", "funnel", "tenants", "admins", "contacts", "config", "help"
];

pub const TENANT_COMMANDS: &[&str] = &["list", "show", "suspend", "resume"];

pub const ADMIN_COMMANDS: &[&str] = &["list", "add", "role", "remove"];

pub const CONTACT_COMMANDS: &[&str] = &["list", "show", "mark"];

pub const CONFIG_COMMANDS: &[&str] = &["show", "set"];

const TENANT_ID_COMMANDS: &[&str] = &["show", "suspend", "resume"];
const ADMIN_ID_COMMANDS: &[&str] = &["role", "remove"];
const CONTACT_ID_COMMANDS: &[&str] = &["show", "mark"];

/// Subcommands that take a record ID, for `<resource> <id> <subcommand>`
pub fn get_id_subcommands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "tenants" => Some(TENANT_ID_COMMANDS),
        "admins" => Some(ADMIN_ID_COMMANDS),
        "contacts" => Some(CONTACT_ID_COMMANDS),
        _ => None,
    }
}

/// Get subcommands for a given top-level command
pub fn get_subcommands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "tenants" => Some(TENANT_COMMANDS),
        "admins" => Some(ADMIN_COMMANDS),
        "contacts" => Some(CONTACT_COMMANDS),
        "config" => Some(CONFIG_COMMANDS),
        _ => None,
    }
}

fn ambiguous(kind: &str, arg: &str, matches: &[&str]) -> String {
    format!("Ambiguous {} '{}'. Did you mean one of: {}?", kind, arg, matches.join(", "))
}

/// Expand command abbreviations in argument list
/// Returns expanded args or error message
///
/// - `ten l` -> `tenants list`
/// - `tenants 7 susp` -> `tenants suspend 7`
/// - an unknown command close to a real one is rejected with a suggestion
pub fn expand_command_abbreviations(args: Vec<String>) -> Result<Vec<String>, String> {
    let Some(first) = args.first() else {
        return Ok(args);
    };
    if first.starts_with('-') {
        return Ok(args);
    }

    let command = match find_unique_command(first, TOP_LEVEL_COMMANDS) {
        Ok(command) => command,
        Err(matches) if !matches.is_empty() => {
            return Err(ambiguous("command", first, &matches));
        }
        Err(_) => {
            if let Some(suggestion) = closest_match(first, TOP_LEVEL_COMMANDS, 3) {
                return Err(format!("Unknown command '{}'. Did you mean '{}'?", first, suggestion));
            }
            // Let clap report it
            return Ok(args);
        }
    };

    let mut expanded = vec![command.to_string()];
    let rest = &args[1..];

    let Some(subcommands) = get_subcommands(command) else {
        expanded.extend(rest.iter().cloned());
        return Ok(expanded);
    };
    let Some(next) = rest.first() else {
        return Ok(expanded);
    };

    // <resource> <id> <subcommand> -> <resource> <subcommand> <id>
    if next.parse::<i64>().is_ok() {
        if let (Some(id_subcommands), Some(sub)) = (get_id_subcommands(command), rest.get(1)) {
            if !sub.starts_with('-') {
                match find_unique_command(sub, id_subcommands) {
                    Ok(full_subcmd) => {
                        expanded.push(full_subcmd.to_string());
                        expanded.push(next.clone());
                        expanded.extend(rest[2..].iter().cloned());
                        return Ok(expanded);
                    }
                    Err(matches) if !matches.is_empty() => {
                        return Err(ambiguous("subcommand", sub, &matches));
                    }
                    Err(_) => {}
                }
            }
        }
        expanded.extend(rest.iter().cloned());
        return Ok(expanded);
    }

    if next.starts_with('-') {
        expanded.extend(rest.iter().cloned());
        return Ok(expanded);
    }

    match find_unique_command(next, subcommands) {
        Ok(full_subcmd) => expanded.push(full_subcmd.to_string()),
        Err(matches) if !matches.is_empty() => {
            return Err(ambiguous("subcommand", next, &matches));
        }
        // No match, pass through for clap to report
        Err(_) => expanded.push(next.clone()),
    }
    expanded.extend(rest[1..].iter().cloned());
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_matching_commands() {
        let commands = &["list", "list-all", "list-tasks"];
        assert_eq!(find_matching_commands("l", commands), vec!["list", "list-all", "list-tasks"]);
        assert_eq!(find_matching_commands("list-", commands), vec!["list-all", "list-tasks"]);
    }

    #[test]
    fn test_find_unique_command() {
        assert_eq!(find_unique_command("t", TOP_LEVEL_COMMANDS), Ok("tenants"));
        assert_eq!(find_unique_command("logi", TOP_LEVEL_COMMANDS), Ok("login"));

        let matches = find_unique_command("lo", TOP_LEVEL_COMMANDS).unwrap_err();
        assert_eq!(matches, vec!["login", "logout"]);
    }

    #[test]
    fn test_expand_command_abbreviations() {
        assert_eq!(expand_command_abbreviations(args(&["f"])), Ok(args(&["funnel"])));
        assert_eq!(
            expand_command_abbreviations(args(&["ten", "l", "--status", "active"])),
            Ok(args(&["tenants", "list", "--status", "active"]))
        );
        assert_eq!(
            expand_command_abbreviations(args(&["fun", "--days", "7"])),
            Ok(args(&["funnel", "--days", "7"]))
        );
    }

    #[test]
    fn test_ambiguous_commands() {
        let err = expand_command_abbreviations(args(&["co"])).unwrap_err();
        assert!(err.contains("Ambiguous command"));

        let err = expand_command_abbreviations(args(&["tenants", "s", "4"])).unwrap_err();
        assert!(err.contains("Ambiguous subcommand"));
    }

    #[test]
    fn test_unknown_command_suggestion() {
        let err = expand_command_abbreviations(args(&["tennants"])).unwrap_err();
        assert!(err.contains("Did you mean 'tenants'?"));

        // Nothing close: leave it for clap
        assert_eq!(
            expand_command_abbreviations(args(&["xyzzyplugh"])),
            Ok(args(&["xyzzyplugh"]))
        );
    }

    #[test]
    fn test_id_first_syntax() {
        assert_eq!(
            expand_command_abbreviations(args(&["tenants", "7", "susp", "-y"])),
            Ok(args(&["tenants", "suspend", "7", "-y"]))
        );
        assert_eq!(
            expand_command_abbreviations(args(&["cont", "12", "mark", "archived"])),
            Ok(args(&["contacts", "mark", "12", "archived"]))
        );
        // Unknown word after an ID passes through
        assert_eq!(
            expand_command_abbreviations(args(&["admins", "3", "promote"])),
            Ok(args(&["admins", "3", "promote"]))
        );
    }
}
