//! CLI commands module.

mod config;
mod model;
mod prompt;
mod pronunciation;
mod speaker;
mod synthesize;
mod user_data;
mod util;
mod voice;
mod word;

pub use config::ConfigCommand;
pub use model::ModelCommand;
pub use prompt::PromptCommand;
pub use pronunciation::PronunciationCommand;
pub use speaker::SpeakerCommand;
pub use synthesize::SynthesizeCommand;
pub use user_data::UserDataCommand;
pub use voice::VoiceCommand;
pub use word::WordCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
