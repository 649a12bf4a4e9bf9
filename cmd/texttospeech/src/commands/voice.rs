//! Voice information commands.

use clap::{Args, Subcommand};

use giztoy_texttospeech::GetVoiceRequest;

use super::{connect, output_result, print_success};
use crate::Cli;

/// Voice information.
#[derive(Args)]
pub struct VoiceCommand {
    #[command(subcommand)]
    command: VoiceSubcommand,
}

#[derive(Subcommand)]
enum VoiceSubcommand {
    /// List available voices
    List {
        /// Only show voices of this language (e.g. en-US)
        #[arg(long)]
        language: Option<String>,
    },
    /// Get information about a voice
    Get {
        /// Voice name (e.g. en-US_AllisonV3Voice)
        voice: String,
        /// Also describe this custom model
        #[arg(long)]
        customization_id: Option<String>,
    },
}

impl VoiceCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            VoiceSubcommand::List { language } => self.list(cli, language.as_deref()).await,
            VoiceSubcommand::Get {
                voice,
                customization_id,
            } => self.get(cli, voice, customization_id.clone()).await,
        }
    }

    async fn list(&self, cli: &Cli, language: Option<&str>) -> anyhow::Result<()> {
        let (_, client) = connect(cli)?;
        let mut resp = client.voice().list().await?;

        if let Some(language) = language {
            resp.voices.retain(|v| v.language.eq_ignore_ascii_case(language));
        }
        resp.voices.sort_by(|a, b| a.name.cmp(&b.name));

        print_success(&format!("Found {} voice(s)", resp.voices.len()));
        output_result(&resp, cli.output.as_deref(), cli.json)
    }

    async fn get(
        &self,
        cli: &Cli,
        voice: &str,
        customization_id: Option<String>,
    ) -> anyhow::Result<()> {
        let (_, client) = connect(cli)?;

        let req = GetVoiceRequest {
            voice: voice.to_string(),
            customization_id,
        };
        let resp = client.voice().get(&req).await?;

        output_result(&resp, cli.output.as_deref(), cli.json)
    }
}
