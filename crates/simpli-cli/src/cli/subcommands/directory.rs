use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum BudgetCommands {
    /// List budgets in the current org.
    List,
}

#[derive(Clone, Debug, Subcommand)]
pub enum SupplierCommands {
    /// List suppliers in the current org.
    List {
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommands {
    /// List members of the current org.
    List,
}
