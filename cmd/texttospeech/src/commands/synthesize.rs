//! Speech synthesis command.

use std::io::Write;

use clap::Args;
use futures::StreamExt;

use giztoy_cli::guess_extension;
use giztoy_texttospeech::{AudioFormat, SynthesizeRequest};

use super::{
    connect, format_bytes, load_request, output_bytes, output_result, print_success,
    print_verbose, print_warning,
};
use crate::Cli;

/// Sampling rate used for formats that need one when none is given.
const DEFAULT_RATE: u32 = 22050;

/// Synthesize text to audio.
///
/// Text can be given as an argument or loaded with -f from a request file:
///
///   text: "<speak>Hello</speak>"
///   voice: en-US_AllisonV3Voice
///   accept: audio/wav
///
/// Audio is written to -o (default: output.<ext>).
#[derive(Args)]
pub struct SynthesizeCommand {
    /// Text or SSML to synthesize
    text: Option<String>,

    /// Voice name (default: the context's default voice)
    #[arg(long)]
    voice: Option<String>,

    /// Audio format: a MIME type (audio/ogg;codecs=opus) or a short name (mp3, wav, ogg-opus, l16)
    #[arg(long, short = 'a')]
    accept: Option<String>,

    /// Sampling rate in Hz
    #[arg(long)]
    rate: Option<u32>,

    /// Custom model to apply
    #[arg(long)]
    customization_id: Option<String>,

    /// Stream audio to the output as it arrives
    #[arg(long)]
    stream: bool,
}

impl SynthesizeCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut req = match (&cli.input, &self.text) {
            (Some(path), _) => load_request::<SynthesizeRequest>(path)?,
            (None, Some(text)) => SynthesizeRequest::new(text.as_str()),
            (None, None) => anyhow::bail!("text is required, pass it as an argument or use -f"),
        };

        if let Some(voice) = &self.voice {
            req.voice = Some(voice.clone());
        }
        if let Some(accept) = &self.accept {
            req.accept = Some(resolve_accept(accept, self.rate)?);
        }
        if let Some(id) = &self.customization_id {
            req.customization_id = Some(id.clone());
        }

        let (ctx, client) = connect(cli)?;
        if req.voice.is_none() {
            req.voice = ctx
                .as_ref()
                .map(|c| c.default_voice.clone())
                .filter(|v| !v.is_empty());
        }

        let accept = req
            .accept
            .clone()
            .unwrap_or_else(|| AudioFormat::default().mime().to_string());
        let output_path = cli
            .output
            .clone()
            .unwrap_or_else(|| format!("output.{}", guess_extension(&accept)));

        print_verbose(cli, &format!("Voice: {}", req.voice.as_deref().unwrap_or("(service default)")));
        print_verbose(cli, &format!("Accept: {}", accept));
        print_verbose(cli, &format!("Text length: {} chars", req.text.chars().count()));

        if self.stream {
            let mut response = client.synthesis().synthesize_stream(&req).await?;
            if let Some(warnings) = &response.warnings {
                print_warning(warnings);
            }
            let mut file = std::fs::File::create(&output_path)?;
            let mut total = 0;
            let mut chunks = 0;
            while let Some(chunk) = response.audio.next().await {
                let chunk = chunk?;
                file.write_all(&chunk)?;
                total += chunk.len();
                chunks += 1;
            }
            print_success(&format!(
                "Audio streamed to {} ({}, {} chunks)",
                output_path,
                format_bytes(total),
                chunks
            ));
            return Ok(());
        }

        let resp = client.synthesis().synthesize(&req).await?;
        if let Some(warnings) = &resp.warnings {
            print_warning(warnings);
        }

        output_bytes(&resp.audio, &output_path)?;
        print_success(&format!(
            "Audio saved to {} ({})",
            output_path,
            format_bytes(resp.audio.len())
        ));

        let summary = serde_json::json!({
            "output": output_path,
            "size": resp.audio.len(),
            "content_type": resp.content_type,
        });
        if cli.json {
            output_result(&summary, None, true)?;
        }
        Ok(())
    }
}

/// Turns a format argument into an `Accept` value. Full MIME types pass
/// through untouched unless a rate is given, which replaces any `rate`
/// parameter already present.
fn resolve_accept(accept: &str, rate: Option<u32>) -> anyhow::Result<String> {
    if accept.contains(';') {
        let Some(rate) = rate else {
            return Ok(accept.to_string());
        };
        let rate = format!("rate={}", rate);
        let mut params: Vec<&str> = accept
            .split(';')
            .map(str::trim)
            .filter(|p| {
                !p.split_once('=')
                    .is_some_and(|(key, _)| key.trim().eq_ignore_ascii_case("rate"))
            })
            .collect();
        params.push(&rate);
        return Ok(params.join(";"));
    }

    let format: AudioFormat = accept.parse()?;
    Ok(match rate {
        Some(rate) => format.with_rate(rate),
        None if format.requires_rate() => format.with_rate(DEFAULT_RATE),
        None => format.mime().to_string(),
    })
}
