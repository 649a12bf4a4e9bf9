//! Configuration management commands.

use clap::{Args, Subcommand};

use giztoy_cli::config::{mask_api_key, Context as CliContext};

use super::{get_config, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Contexts allow you to manage multiple service instances and credentials,
/// similar to kubectl's context management.
///
/// Configuration is stored in ~/.giztoy/texttospeech/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Add or replace a context
    #[command(name = "add-context")]
    AddContext {
        /// Context name
        name: String,
        /// IAM API key
        #[arg(long)]
        api_key: Option<String>,
        /// Authentication type (iam, basic, bearerToken, noAuth)
        #[arg(long)]
        auth_type: Option<String>,
        /// Bearer token
        #[arg(long)]
        bearer_token: Option<String>,
        /// Basic auth username
        #[arg(long)]
        username: Option<String>,
        /// Basic auth password
        #[arg(long)]
        password: Option<String>,
        /// IAM token endpoint
        #[arg(long)]
        auth_url: Option<String>,
        /// Service URL of the instance
        #[arg(long)]
        base_url: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<i32>,
        /// Maximum retries for transient errors
        #[arg(long)]
        max_retries: Option<i32>,
        /// Skip TLS certificate verification
        #[arg(long)]
        disable_ssl: bool,
        /// Default voice for synthesis
        #[arg(long)]
        default_voice: Option<String>,
    },
    /// Delete a context
    #[command(name = "delete-context")]
    DeleteContext {
        /// Context name
        name: String,
    },
    /// Set the current context
    #[command(name = "use-context")]
    UseContext {
        /// Context name
        name: String,
    },
    /// Display the current context
    #[command(name = "get-context")]
    GetContext,
    /// List all contexts
    #[command(name = "list-contexts", alias = "get-contexts")]
    ListContexts,
    /// View the current configuration
    View,
}

impl ConfigCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::AddContext {
                name,
                api_key,
                auth_type,
                bearer_token,
                username,
                password,
                auth_url,
                base_url,
                timeout,
                max_retries,
                disable_ssl,
                default_voice,
            } => {
                if api_key.is_none()
                    && bearer_token.is_none()
                    && username.is_none()
                    && auth_type.as_deref() != Some("noAuth")
                {
                    anyhow::bail!(
                        "credentials required: use --api-key, --bearer-token, --username/--password or --auth-type noAuth"
                    );
                }

                let mut cfg = get_config(cli)?;

                let ctx = CliContext {
                    auth_type: auth_type.clone().unwrap_or_default(),
                    api_key: api_key.clone().unwrap_or_default(),
                    bearer_token: bearer_token.clone().unwrap_or_default(),
                    username: username.clone().unwrap_or_default(),
                    password: password.clone().unwrap_or_default(),
                    auth_url: auth_url.clone().unwrap_or_default(),
                    base_url: base_url.clone().unwrap_or_default(),
                    timeout: timeout.unwrap_or(0),
                    max_retries: max_retries.unwrap_or(0),
                    disable_ssl: *disable_ssl,
                    default_voice: default_voice.clone().unwrap_or_default(),
                    ..Default::default()
                };

                cfg.add_context(name, ctx)?;
                print_success(&format!("Context \"{}\" added successfully", name));
                Ok(())
            }

            ConfigSubcommand::DeleteContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.delete_context(name)?;
                print_success(&format!("Context \"{}\" deleted", name));
                Ok(())
            }

            ConfigSubcommand::UseContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.use_context(name)?;
                print_success(&format!("Switched to context \"{}\"", name));
                Ok(())
            }

            ConfigSubcommand::GetContext => {
                let cfg = get_config(cli)?;
                if cfg.current_context.is_empty() {
                    println!("No current context set");
                } else {
                    println!("{}", cfg.current_context);
                }
                Ok(())
            }

            ConfigSubcommand::ListContexts => {
                let cfg = get_config(cli)?;

                if cfg.contexts.is_empty() {
                    println!("No contexts configured");
                    return Ok(());
                }

                println!("{:<8} {:<20} {:<12} {:<50} {}", "CURRENT", "NAME", "AUTH", "BASE_URL", "DEFAULT_VOICE");

                for name in cfg.list_contexts() {
                    let Some(ctx) = cfg.get_context(name) else {
                        continue;
                    };
                    let current = if name == cfg.current_context { "*" } else { "" };
                    let base_url = if ctx.base_url.is_empty() {
                        "(default)"
                    } else {
                        ctx.base_url.as_str()
                    };
                    let auth = if ctx.auth_type.is_empty() { "(auto)" } else { ctx.auth_type.as_str() };
                    println!("{:<8} {:<20} {:<12} {:<50} {}", current, name, auth, base_url, ctx.default_voice);
                }

                Ok(())
            }

            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;

                println!("Config file: {}", cfg.path().display());
                println!("Current context: {}", cfg.current_context);
                println!("Contexts: {}", cfg.contexts.len());

                if !cfg.contexts.is_empty() {
                    println!("\nContext details:");

                    for name in cfg.list_contexts() {
                        let Some(ctx) = cfg.get_context(name) else {
                            continue;
                        };
                        println!("\n  {}:", name);
                        if !ctx.auth_type.is_empty() {
                            println!("    Auth Type: {}", ctx.auth_type);
                        }
                        if !ctx.api_key.is_empty() {
                            println!("    API Key: {}", mask_api_key(&ctx.api_key));
                        }
                        if !ctx.bearer_token.is_empty() {
                            println!("    Bearer Token: {}", mask_api_key(&ctx.bearer_token));
                        }
                        if !ctx.username.is_empty() {
                            println!("    Username: {}", ctx.username);
                        }
                        if !ctx.base_url.is_empty() {
                            println!("    Base URL: {}", ctx.base_url);
                        }
                        if !ctx.auth_url.is_empty() {
                            println!("    Auth URL: {}", ctx.auth_url);
                        }
                        if ctx.timeout > 0 {
                            println!("    Timeout: {}s", ctx.timeout);
                        }
                        if ctx.max_retries > 0 {
                            println!("    Max Retries: {}", ctx.max_retries);
                        }
                        if ctx.disable_ssl {
                            println!("    SSL Verification: disabled");
                        }
                        if !ctx.default_voice.is_empty() {
                            println!("    Default Voice: {}", ctx.default_voice);
                        }
                    }
                }

                Ok(())
            }
        }
    }
}
