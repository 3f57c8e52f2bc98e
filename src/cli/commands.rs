use clap::{CommandFactory, Parser, Subcommand};
use crate::api::ApiError;
use crate::config::{AppContext, Settings};
use crate::models::{ContactStatus, NewAdmin, TenantStatus};
use crate::repo::{AdminRepo, AuthRepo, ContactRepo, TenantRepo};
use crate::cli::abbrev;
use crate::cli::commands_funnel::{handle_funnel, FunnelOptions, FunnelView};
use crate::cli::error::{
    find_api_error, parse_admin_role, parse_contact_status, parse_tenant_status, user_error,
    validate_config_key, validate_email, validate_non_empty, validate_record_id,
};
use crate::cli::output::{
    format_admin_table, format_contact_detail, format_contact_table, format_dashboard,
    format_tenant_summary, format_tenant_table,
};
use crate::cli::status::compute_dashboard;
use crate::utils::{fuzzy, parse_date_expr};
use std::io::Write;
use anyhow::{Context, Result};

/// Maximum edit distance for `tenants list --search`
const SEARCH_MAX_DISTANCE: usize = 2;

#[derive(Parser)]
#[command(name = "provadmin")]
#[command(about = "Provisioning Admin - command-line console for a multi-tenant SaaS provisioning platform")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store an API token in ~/.provadmin/rc
    Login {
        /// Admin account email
        #[arg(long)]
        email: String,
        /// Read the password from the first line of stdin
        /// (otherwise PROVADMIN_PASSWORD is used)
        #[arg(long)]
        password_stdin: bool,
    },
    /// Remove the stored API token
    Logout,
    /// Dashboard: tenants, funnel, signup sessions, new messages
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Signup funnel analytics
    Funnel {
        /// Reporting period in days (default: funnel.days from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=365))]
        days: Option<u32>,
        /// Presentation
        #[arg(long, value_enum, default_value_t = FunnelView::List)]
        view: FunnelView,
        /// Compare against the previous period of the same length
        #[arg(long)]
        compare: bool,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Re-fetch and redraw on an interval (e.g. 30s, 5m) until interrupted
        #[arg(long, value_name = "INTERVAL")]
        watch: Option<String>,
    },
    /// Tenant management commands
    Tenants {
        #[command(subcommand)]
        subcommand: TenantCommands,
    },
    /// Platform admin user commands
    Admins {
        #[command(subcommand)]
        subcommand: AdminCommands,
    },
    /// Contact-form message commands
    Contacts {
        #[command(subcommand)]
        subcommand: ContactCommands,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        subcommand: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum TenantCommands {
    /// List tenants
    List {
        /// Only tenants in this status (active, provisioning, suspended, failed, cancelled)
        #[arg(long)]
        status: Option<String>,
        /// Only tenants on this plan
        #[arg(long)]
        plan: Option<String>,
        /// Match name or subdomain (substring or close spelling)
        #[arg(long)]
        search: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show tenant details
    Show {
        /// Tenant ID
        id: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Suspend a tenant
    Suspend {
        /// Tenant ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Resume a suspended tenant
    Resume {
        /// Tenant ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// List admin users
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Add an admin user
    Add {
        /// Email address
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Role (owner, admin, viewer)
        #[arg(long, default_value = "viewer")]
        role: String,
    },
    /// Change an admin user's role
    Role {
        /// Admin user ID
        id: String,
        /// New role (owner, admin, viewer)
        role: String,
    },
    /// Remove an admin user
    Remove {
        /// Admin user ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ContactCommands {
    /// List contact-form messages
    List {
        /// Only messages in this status (new, read, replied, archived)
        #[arg(long)]
        status: Option<String>,
        /// Only messages received since DATE (YYYY-MM-DD, today, yesterday, 7d, 2w)
        #[arg(long)]
        since: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show a message (marks a new message as read)
    Show {
        /// Message ID
        id: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Set a message's status
    Mark {
        /// Message ID
        id: String,
        /// New status (new, read, replied, archived)
        status: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Set a key in ~/.provadmin/rc (an empty value removes it)
    Set {
        key: String,
        value: String,
    },
}

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    // Expand command abbreviations before processing
    let args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    let clap_args = std::iter::once("provadmin".to_string())
        .chain(args)
        .collect::<Vec<_>>();
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            // Help and version land here too
            if e.use_stderr() {
                std::process::exit(1);
            }
            return Ok(());
        }
    };

    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password_stdin } => {
            handle_login(&AppContext::load()?, &email, password_stdin)
        }
        Commands::Logout => handle_logout(),
        Commands::Status { json } => handle_status(&AppContext::load()?, json),
        Commands::Funnel { days, view, compare, json, watch } => {
            let ctx = AppContext::load()?;
            let options = FunnelOptions {
                days: days.unwrap_or(ctx.settings.funnel_days),
                view,
                compare,
                json,
            };
            handle_funnel(&ctx, &options, watch.as_deref())
        }
        Commands::Tenants { subcommand } => handle_tenants(&AppContext::load()?, subcommand),
        Commands::Admins { subcommand } => handle_admins(&AppContext::load()?, subcommand),
        Commands::Contacts { subcommand } => handle_contacts(&AppContext::load()?, subcommand),
        Commands::Config { subcommand } => handle_config(subcommand),
    }
}

/// Ask on stderr, read the answer from stdin
fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} (y/n): ", prompt);
    std::io::stderr().flush()
        .map_err(|e| anyhow::anyhow!("Failed to flush stderr: {}", e))?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_id(id: &str, kind: &str) -> i64 {
    validate_record_id(id, kind).unwrap_or_else(|e| user_error(&e))
}

fn handle_login(ctx: &AppContext, email: &str, password_stdin: bool) -> Result<()> {
    if let Err(e) = validate_email(email) {
        user_error(&e);
    }

    let password = if password_stdin {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)
            .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
        line.trim_end_matches(['\r', '\n']).to_string()
    } else {
        std::env::var("PROVADMIN_PASSWORD").unwrap_or_default()
    };
    if password.is_empty() {
        user_error("No password given. Use --password-stdin or set PROVADMIN_PASSWORD.");
    }

    let response = match AuthRepo::login(&ctx.client, email, &password) {
        Ok(response) => response,
        Err(e) if matches!(find_api_error(&e), Some(ApiError::Unauthorized)) => {
            user_error("Login failed: invalid email or password.");
        }
        Err(e) => return Err(e),
    };

    let path = Settings::config_path()?;
    Settings::set_value(&path, "api.token", &response.token)?;
    log::info!("Stored API token for {} in {}", email, path.display());

    match response.expires_at {
        Some(expires) => println!(
            "Logged in as {}. Token expires {}.",
            email,
            crate::cli::output::format_timestamp(&expires)
        ),
        None => println!("Logged in as {}.", email),
    }
    Ok(())
}

fn handle_logout() -> Result<()> {
    let path = Settings::config_path()?;
    Settings::set_value(&path, "api.token", "")?;
    log::info!("Removed API token from {}", path.display());
    println!("Logged out.");
    if std::env::var("PROVADMIN_TOKEN").is_ok() {
        eprintln!("Note: PROVADMIN_TOKEN is still set in the environment.");
    }
    Ok(())
}

fn handle_status(ctx: &AppContext, json: bool) -> Result<()> {
    let dashboard = compute_dashboard(ctx)?;
    if json {
        print_json(&dashboard)
    } else {
        print!("{}", format_dashboard(&dashboard, &ctx.style));
        Ok(())
    }
}

fn handle_tenants(ctx: &AppContext, cmd: TenantCommands) -> Result<()> {
    match cmd {
        TenantCommands::List { status, plan, search, json } => {
            let status = status.map(|s| parse_tenant_status(&s).unwrap_or_else(|e| user_error(&e)));
            let mut tenants = TenantRepo::list(&ctx.client, status, plan.as_deref())?;

            if let Some(query) = search {
                tenants.retain(|t| {
                    fuzzy::fuzzy_contains(&t.name, &query, SEARCH_MAX_DISTANCE)
                        || fuzzy::fuzzy_contains(&t.subdomain, &query, SEARCH_MAX_DISTANCE)
                });
            }

            if json {
                print_json(&tenants)
            } else {
                print!("{}", format_tenant_table(&tenants, &ctx.style));
                Ok(())
            }
        }
        TenantCommands::Show { id, json } => {
            let id = parse_id(&id, "tenant");
            let tenant = TenantRepo::get(&ctx.client, id)?
                .unwrap_or_else(|| user_error(&format!("Tenant {} not found", id)));
            if json {
                print_json(&tenant)
            } else {
                print!("{}", format_tenant_summary(&tenant, &ctx.style));
                Ok(())
            }
        }
        TenantCommands::Suspend { id, yes } => {
            let id = parse_id(&id, "tenant");
            let tenant = TenantRepo::get(&ctx.client, id)?
                .unwrap_or_else(|| user_error(&format!("Tenant {} not found", id)));
            if tenant.status == TenantStatus::Suspended {
                println!("Tenant {} ({}) is already suspended.", id, tenant.name);
                return Ok(());
            }
            if !yes && !confirm(&format!("Suspend tenant {} ({})? Its users will lose access.", id, tenant.name))? {
                println!("Cancelled.");
                return Ok(());
            }
            TenantRepo::set_status(&ctx.client, id, TenantStatus::Suspended)?;
            println!("Suspended tenant {} ({}).", id, tenant.name);
            Ok(())
        }
        TenantCommands::Resume { id } => {
            let id = parse_id(&id, "tenant");
            let tenant = TenantRepo::get(&ctx.client, id)?
                .unwrap_or_else(|| user_error(&format!("Tenant {} not found", id)));
            if tenant.status != TenantStatus::Suspended {
                user_error(&format!(
                    "Tenant {} is not suspended (status: {})",
                    id,
                    tenant.status.as_str()
                ));
            }
            TenantRepo::set_status(&ctx.client, id, TenantStatus::Active)?;
            println!("Resumed tenant {} ({}).", id, tenant.name);
            Ok(())
        }
    }
}

fn handle_admins(ctx: &AppContext, cmd: AdminCommands) -> Result<()> {
    match cmd {
        AdminCommands::List { json } => {
            let admins = AdminRepo::list(&ctx.client)?;
            if json {
                print_json(&admins)
            } else {
                print!("{}", format_admin_table(&admins, &ctx.style));
                Ok(())
            }
        }
        AdminCommands::Add { email, name, role } => {
            if let Err(e) = validate_email(&email) {
                user_error(&e);
            }
            if let Err(e) = validate_non_empty(&name, "Name") {
                user_error(&e);
            }
            let role = parse_admin_role(&role).unwrap_or_else(|e| user_error(&e));

            let new_admin = NewAdmin { email, name: name.trim().to_string(), role };
            let admin = AdminRepo::create(&ctx.client, &new_admin)?;
            println!("Added admin user {}: {} ({})", admin.id, admin.email, admin.role.as_str());
            Ok(())
        }
        AdminCommands::Role { id, role } => {
            let id = parse_id(&id, "admin user");
            let role = parse_admin_role(&role).unwrap_or_else(|e| user_error(&e));
            AdminRepo::set_role(&ctx.client, id, role)?;
            println!("Changed role of admin user {} to {}.", id, role.as_str());
            Ok(())
        }
        AdminCommands::Remove { id, yes } => {
            let id = parse_id(&id, "admin user");
            let admin = AdminRepo::get(&ctx.client, id)?
                .unwrap_or_else(|| user_error(&format!("Admin user {} not found", id)));
            if !yes && !confirm(&format!("Remove admin user {} ({})?", id, admin.email))? {
                println!("Cancelled.");
                return Ok(());
            }
            AdminRepo::delete(&ctx.client, id)?;
            println!("Removed admin user {} ({}).", id, admin.email);
            Ok(())
        }
    }
}

fn handle_contacts(ctx: &AppContext, cmd: ContactCommands) -> Result<()> {
    match cmd {
        ContactCommands::List { status, since, json } => {
            let status = status.map(|s| parse_contact_status(&s).unwrap_or_else(|e| user_error(&e)));
            let since = match since {
                Some(expr) => Some(parse_date_expr(&expr).unwrap_or_else(|e| user_error(&e.to_string()))),
                None => None,
            };

            let mut messages = ContactRepo::list(&ctx.client, status)?;
            if let Some(since) = since {
                messages.retain(|m| m.created_at.timestamp() >= since);
            }

            if json {
                print_json(&messages)
            } else {
                print!("{}", format_contact_table(&messages, &ctx.style));
                Ok(())
            }
        }
        ContactCommands::Show { id, json } => {
            let id = parse_id(&id, "message");
            let mut message = ContactRepo::get(&ctx.client, id)?
                .unwrap_or_else(|| user_error(&format!("Message {} not found", id)));
            if message.status == ContactStatus::New {
                ContactRepo::set_status(&ctx.client, id, ContactStatus::Read)
                    .context("Failed to mark message as read")?;
                log::debug!("Marked message {} as read", id);
                message.status = ContactStatus::Read;
            }
            if json {
                print_json(&message)
            } else {
                print!("{}", format_contact_detail(&message, &ctx.style));
                Ok(())
            }
        }
        ContactCommands::Mark { id, status } => {
            let id = parse_id(&id, "message");
            let status = parse_contact_status(&status).unwrap_or_else(|e| user_error(&e));
            ContactRepo::set_status(&ctx.client, id, status)?;
            println!("Marked message {} as {}.", id, status.as_str());
            Ok(())
        }
    }
}

fn handle_config(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            let lines = settings.display_lines();
            let width = lines.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (key, value) in lines {
                println!("{:<width$}  {}", key, value, width = width);
            }
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            if let Err(e) = validate_config_key(&key) {
                user_error(&e);
            }
            let value = value.trim();
            // Reject bad values before they reach the file
            if !value.is_empty() {
                let base_dir = Settings::config_dir()?;
                if let Err(e) = Settings::default().apply(&key, value, &base_dir) {
                    user_error(&format!("{:#}", e));
                }
            }

            let path = Settings::config_path()?;
            Settings::set_value(&path, &key, value)?;
            if value.is_empty() {
                println!("Removed {}.", key);
            } else if key == "api.token" {
                println!("Set api.token.");
            } else {
                println!("Set {}={}.", key, value);
            }
            Ok(())
        }
    }
}
