use clap::Subcommand;

use super::DecisionArgs;

/// Purchase requisition commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RequisitionCommands {
    /// List requisitions.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a requisition by ID.
    Get { id: String },
    /// Submit a saved draft for approval.
    Submit { id: String },
    /// Approve a pending requisition.
    Approve {
        id: String,
        #[command(flatten)]
        form: DecisionArgs,
    },
    /// Reject a pending requisition. Prints a prompt unless --confirm is given.
    Reject {
        id: String,
        #[command(flatten)]
        form: DecisionArgs,
        #[arg(long)]
        confirm: bool,
    },
    /// Send a pending requisition back for changes.
    RequestModification {
        id: String,
        #[command(flatten)]
        form: DecisionArgs,
    },
    /// Approve a pending requisition and create its purchase order.
    ApproveAndCreatePo {
        id: String,
        #[command(flatten)]
        form: DecisionArgs,
    },
    /// Create the purchase order for an approved requisition after a partial failure.
    RetryPo {
        id: String,
        #[command(flatten)]
        form: DecisionArgs,
    },
}
