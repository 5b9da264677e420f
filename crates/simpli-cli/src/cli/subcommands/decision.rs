use clap::Args;

/// Approval form fields shared by every decision command.
#[derive(Clone, Debug, Default, Args)]
pub struct DecisionArgs {
    /// Budget the spend is charged to.
    #[arg(long)]
    pub budget: Option<String>,
    /// Supplier (orders only; defaults to the one on the order).
    #[arg(long)]
    pub supplier: Option<String>,
    /// Reason for the decision.
    #[arg(long, default_value = "")]
    pub justification: String,
}
