//! Human-readable renderers for multi-line command output.

use owo_colors::OwoColorize as _;

use crate::domain::config::CfConfig;
use crate::output::OutputContext;

/// Renders structured values for a terminal.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the current cf configuration. Suppressed when `quiet`.
    pub fn render_config(&self, config: &CfConfig, path: &std::path::Path) {
        if self.ctx.quiet {
            return;
        }
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for (key, value) in config_rows(config) {
            println!("  {:<20} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["CF_CONFIG", "CF_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}

/// Key/value rows shown by `cf config show`. The access token is redacted.
#[must_use]
pub fn config_rows(config: &CfConfig) -> Vec<(&'static str, String)> {
    let or_unset = |s: &str| {
        if s.is_empty() {
            "(not set)".to_string()
        } else {
            s.to_string()
        }
    };
    vec![
        ("target", config.target.clone()),
        ("api version", config.api_version.clone()),
        ("authorization", config.authorization_endpoint.clone()),
        (
            "access token",
            if config.access_token.is_empty() {
                "(not set)".to_string()
            } else {
                "(set)".to_string()
            },
        ),
        ("org", or_unset(&config.organization.name)),
        ("space", or_unset(&config.space.name)),
        (
            "start.timeout",
            format!("{}s", config.application_start_timeout),
        ),
    ]
}
