//! Utility functions for CLI commands.

use std::time::Duration;

use anyhow::Context as _;
use giztoy_cli::config::{load_config, Config, Context};
use giztoy_cli::output::{Output, OutputFormat};
use giztoy_texttospeech::{Client, ClientBuilder, ServiceConfig};

use crate::Cli;

const APP_NAME: &str = "texttospeech";

/// Upper bound of the backoff between retries.
const RETRY_MAX_INTERVAL: Duration = Duration::from_secs(30);

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(APP_NAME, cli.config.as_deref())
}

/// Gets the context to use. `None` means no context is configured and the
/// environment should be used instead.
pub fn get_context(cli: &Cli) -> anyhow::Result<Option<Context>> {
    let cfg = get_config(cli)?;

    match cfg.resolve_context(cli.context.as_deref()) {
        Some(ctx) => Ok(Some(ctx.clone())),
        None => match cli.context.as_deref() {
            Some(name) if !name.is_empty() => anyhow::bail!("context '{}' not found", name),
            _ => Ok(None),
        },
    }
}

/// Resolves the context and creates a client for it.
pub fn connect(cli: &Cli) -> anyhow::Result<(Option<Context>, Client)> {
    let ctx = get_context(cli)?;
    match &ctx {
        Some(c) => print_verbose(cli, &format!("Using context: {}", c.name)),
        None => print_verbose(cli, "No context set, using TEXT_TO_SPEECH_* environment"),
    }

    let client = create_client(ctx.as_ref())?;
    print_verbose(cli, &format!("Service URL: {}", client.service_url()));

    Ok((ctx, client))
}

/// Converts a CLI context into service configuration.
pub fn service_config(ctx: &Context) -> ServiceConfig {
    let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());

    ServiceConfig {
        url: opt(&ctx.base_url),
        auth_type: opt(&ctx.auth_type),
        apikey: opt(&ctx.api_key),
        bearer_token: opt(&ctx.bearer_token),
        username: opt(&ctx.username),
        password: opt(&ctx.password),
        auth_url: opt(&ctx.auth_url),
        disable_ssl: ctx.disable_ssl,
    }
}

/// Creates a Text to Speech API client from a context, or from the
/// environment when there is none.
pub fn create_client(ctx: Option<&Context>) -> anyhow::Result<Client> {
    let Some(ctx) = ctx else {
        return Client::from_env().context(
            "no context configured; add one with 'texttospeech config add-context' \
             or set TEXT_TO_SPEECH_APIKEY",
        );
    };

    let mut builder = ClientBuilder::from_config(&service_config(ctx))
        .with_context(|| format!("invalid credentials in context '{}'", ctx.name))?;

    if ctx.timeout > 0 {
        builder = builder.timeout(Duration::from_secs(ctx.timeout as u64));
    }
    if ctx.max_retries > 0 {
        builder = builder.enable_retries(ctx.max_retries as u32, RETRY_MAX_INTERVAL);
    }
    if ctx.get_extra("learning_opt_out") == Some("true") {
        builder = builder.default_header("X-Watson-Learning-Opt-Out", "true");
    }
    if let Some(customer_id) = ctx.get_extra("customer_id") {
        builder = builder.default_header("X-Watson-Metadata", format!("customer_id={}", customer_id));
    }

    Ok(builder.build()?)
}

/// Loads a request from a YAML or JSON file.
pub fn load_request<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    giztoy_cli::request::load_request(path).with_context(|| format!("loading request from {}", path))
}

/// Requires input file to be provided.
pub fn require_input_file(cli: &Cli) -> anyhow::Result<&str> {
    cli.input
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("input file is required, use -f flag"))
}

/// Outputs binary data to a file.
pub fn output_bytes(data: &[u8], output_path: &str) -> anyhow::Result<()> {
    std::fs::write(output_path, data).with_context(|| format!("writing {}", output_path))
}

/// Outputs result as JSON or YAML.
pub fn output_result<T: serde::Serialize>(
    result: &T,
    output_path: Option<&str>,
    as_json: bool,
) -> anyhow::Result<()> {
    Output::new(
        OutputFormat::from_json_flag(as_json),
        output_path.map(|p| p.to_string()),
    )
    .write(result)
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    giztoy_cli::output::print_verbose(cli.verbose, msg);
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints warning message.
pub fn print_warning(msg: &str) {
    eprintln!("\x1b[33m⚠\x1b[0m {}", msg);
}

/// Formats bytes to human readable string.
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_from_context() {
        let ctx = Context {
            name: "prod".to_string(),
            api_key: "key".to_string(),
            base_url: "https://example.com/instances/1".to_string(),
            disable_ssl: true,
            ..Default::default()
        };

        let cfg = service_config(&ctx);
        assert_eq!(cfg.apikey.as_deref(), Some("key"));
        assert_eq!(cfg.url.as_deref(), Some("https://example.com/instances/1"));
        assert_eq!(cfg.auth_type, None);
        assert_eq!(cfg.username, None);
        assert!(cfg.disable_ssl);
    }

    #[test]
    fn test_create_client_from_context() {
        let mut ctx = Context {
            name: "local".to_string(),
            auth_type: "noAuth".to_string(),
            base_url: "http://localhost:8080".to_string(),
            max_retries: 2,
            ..Default::default()
        };
        ctx.set_extra("customer_id", "cust-1");

        let client = create_client(Some(&ctx)).unwrap();
        assert_eq!(client.service_url(), "http://localhost:8080");
        assert_eq!(client.http().retry_policy().max_retries, 2);
    }

    #[test]
    fn test_create_client_bad_credentials() {
        let ctx = Context {
            name: "broken".to_string(),
            auth_type: "basic".to_string(),
            ..Default::default()
        };
        let err = create_client(Some(&ctx)).err().expect("empty basic credentials");
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }
}
