//! User data commands.

use clap::{Args, Subcommand};

use super::{connect, print_success};
use crate::Cli;

/// Manage data associated with a customer ID.
#[derive(Args)]
pub struct UserDataCommand {
    #[command(subcommand)]
    command: UserDataSubcommand,
}

#[derive(Subcommand)]
enum UserDataSubcommand {
    /// Delete all data associated with a customer ID
    Delete {
        /// Customer ID sent in the X-Watson-Metadata header
        customer_id: String,
    },
}

impl UserDataCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            UserDataSubcommand::Delete { customer_id } => {
                let (_, client) = connect(cli)?;
                client.user_data().delete(customer_id).await?;

                print_success(&format!("Data of customer {} deleted", customer_id));
                Ok(())
            }
        }
    }
}
