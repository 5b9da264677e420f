use clap::Subcommand;

use crate::cli::subcommands::{
    AccessCommands, AuthCommands, BudgetCommands, MemberCommands, OrderCommands, OrgCommands,
    RequisitionCommands, SupplierCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Organization context.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Route and permission checks for the current membership.
    Access {
        #[command(subcommand)]
        action: AccessCommands,
    },
    /// Purchase requisitions.
    Requisition {
        #[command(subcommand)]
        action: RequisitionCommands,
    },
    /// Purchase orders.
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Budgets.
    Budget {
        #[command(subcommand)]
        action: BudgetCommands,
    },
    /// Suppliers.
    Supplier {
        #[command(subcommand)]
        action: SupplierCommands,
    },
    /// Organization members.
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
}
