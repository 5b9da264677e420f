use clap::Subcommand;

use super::DecisionArgs;

/// Purchase order commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrderCommands {
    /// List purchase orders.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a purchase order by ID.
    Get { id: String },
    /// Approve a pending purchase order.
    Approve {
        id: String,
        #[command(flatten)]
        form: DecisionArgs,
    },
    /// Reject a pending purchase order. Prints a prompt unless --confirm is given.
    Reject {
        id: String,
        #[command(flatten)]
        form: DecisionArgs,
        #[arg(long)]
        confirm: bool,
    },
}
