//! Speaker model commands.

use anyhow::Context as _;
use clap::{Args, Subcommand};

use giztoy_texttospeech::CreateSpeakerModelRequest;

use super::{connect, format_bytes, output_result, print_success, print_verbose};
use crate::Cli;

/// Manage speaker models.
#[derive(Args)]
pub struct SpeakerCommand {
    #[command(subcommand)]
    command: SpeakerSubcommand,
}

#[derive(Subcommand)]
enum SpeakerSubcommand {
    /// Create a speaker model from a WAV recording
    Create {
        /// Speaker name
        #[arg(long)]
        name: String,
        /// WAV recording with at least one minute of speech
        #[arg(long)]
        audio: String,
    },
    /// List speaker models
    List,
    /// Show the custom models and prompts a speaker is used with
    Get {
        /// Speaker ID
        speaker_id: String,
    },
    /// Delete a speaker model
    Delete {
        /// Speaker ID
        speaker_id: String,
    },
}

impl SpeakerCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            SpeakerSubcommand::Create { name, audio } => {
                let data = std::fs::read(audio).with_context(|| format!("reading {}", audio))?;
                print_verbose(cli, &format!("Audio: {} ({})", audio, format_bytes(data.len())));

                let req = CreateSpeakerModelRequest {
                    speaker_name: name.clone(),
                    audio: data.into(),
                };

                let (_, client) = connect(cli)?;
                let resp = client.speaker().create(&req).await?;

                print_success(&format!("Speaker model created: {}", resp.speaker_id));
                output_result(&resp, cli.output.as_deref(), cli.json)
            }

            SpeakerSubcommand::List => {
                let (_, client) = connect(cli)?;
                let resp = client.speaker().list().await?;

                print_success(&format!("Found {} speaker(s)", resp.speakers.len()));
                output_result(&resp, cli.output.as_deref(), cli.json)
            }

            SpeakerSubcommand::Get { speaker_id } => {
                let (_, client) = connect(cli)?;
                let resp = client.speaker().get(speaker_id).await?;

                output_result(&resp, cli.output.as_deref(), cli.json)
            }

            SpeakerSubcommand::Delete { speaker_id } => {
                let (_, client) = connect(cli)?;
                client.speaker().delete(speaker_id).await?;

                print_success(&format!("Speaker model {} deleted", speaker_id));
                Ok(())
            }
        }
    }
}
