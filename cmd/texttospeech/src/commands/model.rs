//! Custom model commands.

use clap::{Args, Subcommand};

use giztoy_texttospeech::{CreateCustomModelRequest, Language, UpdateCustomModelRequest};

use super::{connect, load_request, output_result, print_success, print_verbose};
use crate::Cli;

/// Manage custom models.
///
/// A custom model holds word translations and prompts for one language.
/// Create and update requests can also be loaded with -f.
#[derive(Args)]
pub struct ModelCommand {
    #[command(subcommand)]
    command: ModelSubcommand,
}

#[derive(Subcommand)]
enum ModelSubcommand {
    /// Create a custom model
    Create {
        /// Model name
        name: Option<String>,
        /// Model language (e.g. en-US)
        #[arg(long)]
        language: Option<String>,
        /// Model description
        #[arg(long)]
        description: Option<String>,
    },
    /// List custom models
    List {
        /// Only list models of this language
        #[arg(long)]
        language: Option<String>,
    },
    /// Get a custom model with its words and prompts
    Get {
        /// Customization ID
        customization_id: String,
    },
    /// Update the name, description or words of a custom model
    Update {
        /// Customization ID
        customization_id: Option<String>,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a custom model
    Delete {
        /// Customization ID
        customization_id: String,
    },
}

impl ModelCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ModelSubcommand::Create {
                name,
                language,
                description,
            } => {
                let mut req = match &cli.input {
                    Some(path) => load_request::<CreateCustomModelRequest>(path)?,
                    None => CreateCustomModelRequest::default(),
                };
                if let Some(name) = name {
                    req.name = name.clone();
                }
                if let Some(language) = language {
                    req.language = Some(language.parse::<Language>()?);
                }
                if description.is_some() {
                    req.description = description.clone();
                }
                if req.name.is_empty() {
                    anyhow::bail!("model name is required");
                }

                let (_, client) = connect(cli)?;
                let model = client.customization().create(&req).await?;

                print_success(&format!("Custom model created: {}", model.customization_id));
                output_result(&model, cli.output.as_deref(), cli.json)
            }

            ModelSubcommand::List { language } => {
                let language = language
                    .as_deref()
                    .map(|l| l.parse::<Language>())
                    .transpose()?;

                let (_, client) = connect(cli)?;
                let resp = client.customization().list(language).await?;

                print_success(&format!("Found {} custom model(s)", resp.customizations.len()));
                output_result(&resp, cli.output.as_deref(), cli.json)
            }

            ModelSubcommand::Get { customization_id } => {
                let (_, client) = connect(cli)?;
                let model = client.customization().get(customization_id).await?;

                output_result(&model, cli.output.as_deref(), cli.json)
            }

            ModelSubcommand::Update {
                customization_id,
                name,
                description,
            } => {
                let mut req = match &cli.input {
                    Some(path) => load_request::<UpdateCustomModelRequest>(path)?,
                    None => UpdateCustomModelRequest::default(),
                };
                if let Some(id) = customization_id {
                    req.customization_id = id.clone();
                }
                if name.is_some() {
                    req.name = name.clone();
                }
                if description.is_some() {
                    req.description = description.clone();
                }
                if req.customization_id.is_empty() {
                    anyhow::bail!("customization ID is required");
                }

                print_verbose(cli, &format!("Updating {} with {} word(s)", req.customization_id, req.words.len()));

                let (_, client) = connect(cli)?;
                client.customization().update(&req).await?;

                print_success(&format!("Custom model {} updated", req.customization_id));
                Ok(())
            }

            ModelSubcommand::Delete { customization_id } => {
                let (_, client) = connect(cli)?;
                client.customization().delete(customization_id).await?;

                print_success(&format!("Custom model {} deleted", customization_id));
                Ok(())
            }
        }
    }
}
