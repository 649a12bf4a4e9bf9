//! Custom prompt commands.

use std::path::Path;

use anyhow::Context as _;
use clap::{Args, Subcommand};

use giztoy_texttospeech::{AddCustomPromptRequest, PromptMetadata};

use super::{connect, format_bytes, output_result, print_success, print_verbose, print_warning};
use crate::Cli;

/// Manage the prompts of a custom model.
///
/// Prompts are recorded WAV utterances that can be played back with the
/// SSML <ibm:prompt id="..."/> element.
#[derive(Args)]
pub struct PromptCommand {
    #[command(subcommand)]
    command: PromptSubcommand,
}

#[derive(Subcommand)]
enum PromptSubcommand {
    /// Add or replace a prompt
    Add {
        /// Customization ID
        customization_id: String,
        /// Prompt ID
        prompt_id: String,
        /// Text spoken in the recording
        #[arg(long)]
        text: String,
        /// WAV recording of the prompt
        #[arg(long)]
        audio: String,
        /// Speaker model to tune the prompt with
        #[arg(long)]
        speaker_id: Option<String>,
    },
    /// List the prompts of a custom model
    List {
        /// Customization ID
        customization_id: String,
    },
    /// Get a prompt
    Get {
        /// Customization ID
        customization_id: String,
        /// Prompt ID
        prompt_id: String,
    },
    /// Delete a prompt
    Delete {
        /// Customization ID
        customization_id: String,
        /// Prompt ID
        prompt_id: String,
    },
}

impl PromptCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            PromptSubcommand::Add {
                customization_id,
                prompt_id,
                text,
                audio,
                speaker_id,
            } => {
                let data = std::fs::read(audio).with_context(|| format!("reading {}", audio))?;
                let filename = Path::new(audio)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());

                print_verbose(cli, &format!("Audio: {} ({})", audio, format_bytes(data.len())));

                let req = AddCustomPromptRequest {
                    customization_id: customization_id.clone(),
                    prompt_id: prompt_id.clone(),
                    metadata: PromptMetadata {
                        prompt_text: text.clone(),
                        speaker_id: speaker_id.clone(),
                    },
                    file: data.into(),
                    filename,
                };

                let (_, client) = connect(cli)?;
                let prompt = client.prompt().add(&req).await?;

                print_success(&format!("Prompt \"{}\" submitted, status: {}", prompt.prompt_id, prompt.status));
                output_result(&prompt, cli.output.as_deref(), cli.json)
            }

            PromptSubcommand::List { customization_id } => {
                let (_, client) = connect(cli)?;
                let resp = client.prompt().list(customization_id).await?;

                print_success(&format!("Found {} prompt(s)", resp.prompts.len()));
                output_result(&resp, cli.output.as_deref(), cli.json)
            }

            PromptSubcommand::Get {
                customization_id,
                prompt_id,
            } => {
                let (_, client) = connect(cli)?;
                let prompt = client.prompt().get(customization_id, prompt_id).await?;

                if let Some(error) = &prompt.error {
                    print_warning(&format!("Prompt failed: {}", error));
                }
                output_result(&prompt, cli.output.as_deref(), cli.json)
            }

            PromptSubcommand::Delete {
                customization_id,
                prompt_id,
            } => {
                let (_, client) = connect(cli)?;
                client.prompt().delete(customization_id, prompt_id).await?;

                print_success(&format!("Prompt \"{}\" deleted from {}", prompt_id, customization_id));
                Ok(())
            }
        }
    }
}
