//! CLI command implementations

use anyhow::{anyhow, Result};
use std::fs;

use crate::auth::{create_token, Identity, Role};
use crate::cli::{error, format_decision, info, print_rules_table, success, warn, OutputFormat};
use crate::config::{self, Config};
use crate::policy::{Decision, Policy};
use crate::server;

/// Rule table rows for display: (rule name, matched condition, outcome)
const RULE_SUMMARIES: [(&str, &str, &str); 6] = [
    (
        "protected-anonymous",
        "anonymous under /dashboard or /profile",
        "redirect /",
    ),
    (
        "editor-containment",
        "editor under /dashboard outside news, blog, profile",
        "redirect /dashboard/news",
    ),
    (
        "teacher-containment",
        "teacher under /dashboard blog, users, categories or news",
        "redirect /dashboard",
    ),
    (
        "staff-profile",
        "staff role at exactly /profile",
        "redirect /dashboard/profile",
    ),
    (
        "student-dashboard",
        "student under /dashboard",
        "redirect /profile",
    ),
    (
        "guest-only-entry",
        "authenticated at /login or /register",
        "redirect /profile (student) or /dashboard",
    ),
];

/// Representative application paths covering every rule surface and every
/// redirect target, used by the `check` audit.
const AUDIT_PATHS: [&str; 20] = [
    "/",
    "/courses",
    "/blog/first-post",
    "/news",
    "/about",
    "/contact",
    "/login",
    "/register",
    "/profile",
    "/profile/settings",
    "/dashboard",
    "/dashboard/news",
    "/dashboard/news/1/edit",
    "/dashboard/blog",
    "/dashboard/users",
    "/dashboard/categories",
    "/dashboard/courses",
    "/dashboard/groups",
    "/dashboard/applications",
    "/dashboard/profile",
];

/// Initialize a new edgegate.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("edgegate.toml");

    if config_path.exists() {
        warn("edgegate.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created edgegate.toml");
    info("Set the signing secret and upstream origin, then run 'edgegate serve'");

    Ok(())
}

/// Run the gate server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!(
        "Fronting upstream {} on {}:{}",
        config.upstream.origin, host, port
    ));

    server::run_server(config, &host, port).await?;
    Ok(())
}

/// Evaluate the policy for a hypothetical request
pub async fn decide(path: &str, role: Option<&str>) -> Result<()> {
    let identity = match role {
        Some(raw) => Some(Identity::new("cli", parse_role(raw)?)),
        None => None,
    };

    let policy = Policy::new();
    let (decision, rule) = policy.explain(path, identity.as_ref());

    let who = identity
        .as_ref()
        .map(|i| i.role.to_string())
        .unwrap_or_else(|| "anonymous".to_string());
    println!("{} as {} -> {}", path, who, format_decision(&decision));
    match rule {
        Some(name) => info(&format!("matched rule: {}", name)),
        None => info("no rule matched; public fallthrough"),
    }

    Ok(())
}

/// Print the ordered policy rule table
pub async fn routes(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<_> = RULE_SUMMARIES
                .iter()
                .enumerate()
                .map(|(i, (name, matches, outcome))| (i + 1, *name, *matches, *outcome))
                .collect();
            print_rules_table(&rows);
        }
        OutputFormat::Json => {
            let rows: Vec<_> = RULE_SUMMARIES
                .iter()
                .enumerate()
                .map(|(i, (name, matches, outcome))| {
                    serde_json::json!({
                        "order": i + 1,
                        "rule": name,
                        "matches": matches,
                        "outcome": outcome,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

/// Audit the policy for redirect cycles and unresolved chains
pub async fn check() -> Result<()> {
    let violations = audit_policy();

    if violations.is_empty() {
        success(&format!(
            "Policy is total and cycle-free across {} paths x {} identities",
            AUDIT_PATHS.len(),
            Role::ALL.len() + 1
        ));
        Ok(())
    } else {
        for violation in &violations {
            error(violation);
        }
        Err(anyhow!("policy audit failed with {} violation(s)", violations.len()))
    }
}

/// Walk every (path, identity) pair and follow its redirect chain; report
/// any cycle or chain that fails to settle on an allowed page.
pub fn audit_policy() -> Vec<String> {
    const MAX_HOPS: usize = 4;
    let policy = Policy::new();
    let mut violations = Vec::new();

    let identities: Vec<Option<Identity>> = std::iter::once(None)
        .chain(Role::ALL.iter().map(|r| Some(Identity::new("audit", *r))))
        .collect();

    for path in AUDIT_PATHS {
        for identity in &identities {
            let who = identity
                .as_ref()
                .map(|i| i.role.to_string())
                .unwrap_or_else(|| "anonymous".to_string());

            let mut current = path.to_string();
            let mut visited = vec![current.clone()];

            loop {
                match policy.decide(&current, identity.as_ref()) {
                    Decision::Allow => break,
                    Decision::Redirect(target) => {
                        if visited.iter().any(|seen| seen == target) {
                            violations.push(format!(
                                "redirect cycle for {} starting at {}: {:?} -> {}",
                                who, path, visited, target
                            ));
                            break;
                        }
                        visited.push(target.to_string());
                        if visited.len() > MAX_HOPS {
                            violations.push(format!(
                                "chain for {} starting at {} exceeds {} hops: {:?}",
                                who, path, MAX_HOPS, visited
                            ));
                            break;
                        }
                        current = target.to_string();
                    }
                }
            }
        }
    }

    violations
}

/// Mint a development access token
pub async fn token(role: &str, subject: Option<String>, ttl: Option<i64>) -> Result<()> {
    let role = parse_role(role)?;
    let config = load_config_or_default();
    let subject = subject.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let ttl = ttl.unwrap_or(config.auth.access_ttl_secs);

    let token = create_token(&config.auth.secret, &subject, role, ttl)?;

    println!("{}", token);
    info(&format!(
        "Cookie: {}={}; Path=/; HttpOnly; SameSite=Strict",
        config.auth.access_cookie, token
    ));
    warn("Development token; production tokens are issued by the auth service");

    Ok(())
}

fn parse_role(raw: &str) -> Result<Role> {
    raw.parse().map_err(|_| {
        anyhow!(
            "unknown role '{}'; expected one of: {}",
            raw,
            Role::ALL.map(|r| r.as_str()).join(", ")
        )
    })
}

fn load_config() -> Result<Config> {
    config::load_config().map_err(|e| {
        error(&e.to_string());
        anyhow!(e)
    })
}

fn load_config_or_default() -> Config {
    match config::load_config() {
        Ok(config) => config,
        Err(_) => {
            warn("no edgegate.toml found; using built-in defaults");
            Config::default()
        }
    }
}
