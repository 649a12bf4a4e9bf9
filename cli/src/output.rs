//! Output utilities for CLI tools.

use std::{fs::File, io::Write};

use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML format (default).
    #[default]
    Yaml,
    /// JSON format.
    Json,
}

impl OutputFormat {
    /// Picks JSON when `as_json` is set, YAML otherwise.
    pub fn from_json_flag(as_json: bool) -> Self {
        if as_json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        }
    }
}

/// Output configuration.
pub struct Output {
    pub format: OutputFormat,
    pub file: Option<String>,
}

impl Output {
    /// Creates a new output configuration.
    pub fn new(format: OutputFormat, file: Option<String>) -> Self {
        Self { format, file }
    }

    /// Renders a value in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
        })
    }

    /// Writes the value to the output file, or stdout.
    pub fn write<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let output = self.render(value)?;

        match &self.file {
            Some(path) => {
                let mut file = File::create(path)?;
                file.write_all(output.as_bytes())?;
            }
            None => print!("{}", output),
        }

        Ok(())
    }

    /// Writes binary data to a file.
    pub fn write_binary(&self, data: &[u8], path: &str) -> anyhow::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(data)?;
        Ok(())
    }
}

/// Prints verbose output if enabled.
pub fn print_verbose(enabled: bool, message: &str) {
    if enabled {
        eprintln!("[verbose] {}", message);
    }
}

/// Guesses the output file extension from an audio format name or MIME
/// type, e.g. `mp3` or `audio/ogg;codecs=opus`.
pub fn guess_extension(format: &str) -> &'static str {
    let format = format.to_lowercase();
    let base = format.split(';').next().unwrap_or("").trim();
    let base = base.strip_prefix("audio/").unwrap_or(base);

    match base {
        "mp3" | "mpeg" => "mp3",
        "wav" => "wav",
        "flac" => "flac",
        "ogg" => "ogg",
        "webm" => "webm",
        "basic" => "au",
        "l16" | "pcm" | "mulaw" => "raw",
        _ => "bin",
    }
}
