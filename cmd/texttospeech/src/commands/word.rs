//! Custom word commands.

use clap::{Args, Subcommand};

use giztoy_texttospeech::{AddWordRequest, PartOfSpeech, Words};

use super::{connect, load_request, output_result, print_success, require_input_file};
use crate::Cli;

/// Manage the words of a custom model.
#[derive(Args)]
pub struct WordCommand {
    #[command(subcommand)]
    command: WordSubcommand,
}

#[derive(Subcommand)]
enum WordSubcommand {
    /// Add or update a single word
    Add {
        /// Customization ID
        customization_id: String,
        /// The word
        word: String,
        /// Phonetic or sounds-like translation
        translation: String,
        /// Part of speech (Japanese only, e.g. Mesi)
        #[arg(long)]
        part_of_speech: Option<String>,
    },
    /// Add or update many words from a file given with -f
    ///
    /// The file holds a word list:
    ///
    ///   words:
    ///     - word: IEEE
    ///       translation: I triple E
    #[command(name = "add-many")]
    AddMany {
        /// Customization ID
        customization_id: String,
    },
    /// List the words of a custom model
    List {
        /// Customization ID
        customization_id: String,
    },
    /// Get the translation of a word
    Get {
        /// Customization ID
        customization_id: String,
        /// The word
        word: String,
    },
    /// Delete a word
    Delete {
        /// Customization ID
        customization_id: String,
        /// The word
        word: String,
    },
}

impl WordCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            WordSubcommand::Add {
                customization_id,
                word,
                translation,
                part_of_speech,
            } => {
                let part_of_speech = part_of_speech
                    .as_deref()
                    .map(|p| p.parse::<PartOfSpeech>())
                    .transpose()?;

                let req = AddWordRequest {
                    customization_id: customization_id.clone(),
                    word: word.clone(),
                    translation: translation.clone(),
                    part_of_speech,
                };

                let (_, client) = connect(cli)?;
                client.customization().add_word(&req).await?;

                print_success(&format!("Word \"{}\" added to {}", word, customization_id));
                Ok(())
            }

            WordSubcommand::AddMany { customization_id } => {
                let input_file = require_input_file(cli)?;
                let req: Words = load_request(input_file)?;

                let (_, client) = connect(cli)?;
                client
                    .customization()
                    .add_words(customization_id, &req.words)
                    .await?;

                print_success(&format!("{} word(s) added to {}", req.words.len(), customization_id));
                Ok(())
            }

            WordSubcommand::List { customization_id } => {
                let (_, client) = connect(cli)?;
                let resp = client.customization().list_words(customization_id).await?;

                print_success(&format!("Found {} word(s)", resp.words.len()));
                output_result(&resp, cli.output.as_deref(), cli.json)
            }

            WordSubcommand::Get {
                customization_id,
                word,
            } => {
                let (_, client) = connect(cli)?;
                let resp = client.customization().get_word(customization_id, word).await?;

                output_result(&resp, cli.output.as_deref(), cli.json)
            }

            WordSubcommand::Delete {
                customization_id,
                word,
            } => {
                let (_, client) = connect(cli)?;
                client.customization().delete_word(customization_id, word).await?;

                print_success(&format!("Word \"{}\" deleted from {}", word, customization_id));
                Ok(())
            }
        }
    }
}
