//! Pronunciation lookup command.

use clap::Args;

use giztoy_texttospeech::{GetPronunciationRequest, PronunciationFormat};

use super::{connect, output_result};
use crate::Cli;

/// Get the pronunciation of a word.
#[derive(Args)]
pub struct PronunciationCommand {
    /// The word to look up
    text: String,

    /// Voice selecting the language
    #[arg(long)]
    voice: Option<String>,

    /// Phoneme format: ipa or ibm
    #[arg(long)]
    format: Option<String>,

    /// Custom model whose translation takes precedence
    #[arg(long)]
    customization_id: Option<String>,
}

impl PronunciationCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let format = self
            .format
            .as_deref()
            .map(|f| f.parse::<PronunciationFormat>())
            .transpose()?;

        let (ctx, client) = connect(cli)?;
        let voice = self.voice.clone().or_else(|| {
            ctx.as_ref()
                .map(|c| c.default_voice.clone())
                .filter(|v| !v.is_empty())
        });

        let req = GetPronunciationRequest {
            text: self.text.clone(),
            voice,
            format,
            customization_id: self.customization_id.clone(),
        };
        let resp = client.synthesis().pronunciation(&req).await?;

        output_result(&resp, cli.output.as_deref(), cli.json)
    }
}
