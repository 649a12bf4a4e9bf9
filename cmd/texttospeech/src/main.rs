//! Text to Speech CLI - A command line interface for the Text to Speech API.

use clap::{Parser, Subcommand};

mod commands;

use commands::{
    ConfigCommand, ModelCommand, PromptCommand, PronunciationCommand, SpeakerCommand,
    SynthesizeCommand, UserDataCommand, VoiceCommand, WordCommand,
};

/// Text to Speech CLI - A command line interface for the Text to Speech API.
///
/// This tool allows you to:
///   - List and inspect voices
///   - Synthesize text to audio files
///   - Look up word pronunciations
///   - Manage custom models, words and prompts
///   - Manage speaker models
///   - Delete user data
///
/// Configuration is stored in ~/.giztoy/texttospeech/ and supports multiple contexts,
/// similar to kubectl's context management. Without a context, credentials are
/// read from TEXT_TO_SPEECH_* environment variables.
#[derive(Parser)]
#[command(name = "texttospeech")]
#[command(about = "Text to Speech API CLI tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.giztoy/texttospeech/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Context name to use
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Input request file (YAML or JSON, `-` for stdin)
    #[arg(short = 'f', long = "file", global = true)]
    pub input: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage CLI configuration
    Config(ConfigCommand),
    /// Voice information
    Voice(VoiceCommand),
    /// Synthesize text to audio
    Synthesize(SynthesizeCommand),
    /// Get the pronunciation of a word
    Pronunciation(PronunciationCommand),
    /// Manage custom models
    Model(ModelCommand),
    /// Manage custom words
    Word(WordCommand),
    /// Manage custom prompts
    Prompt(PromptCommand),
    /// Manage speaker models
    Speaker(SpeakerCommand),
    /// Delete user data
    #[command(name = "user-data")]
    UserData(UserDataCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli).await,
        Commands::Voice(cmd) => cmd.run(&cli).await,
        Commands::Synthesize(cmd) => cmd.run(&cli).await,
        Commands::Pronunciation(cmd) => cmd.run(&cli).await,
        Commands::Model(cmd) => cmd.run(&cli).await,
        Commands::Word(cmd) => cmd.run(&cli).await,
        Commands::Prompt(cmd) => cmd.run(&cli).await,
        Commands::Speaker(cmd) => cmd.run(&cli).await,
        Commands::UserData(cmd) => cmd.run(&cli).await,
    }
}
