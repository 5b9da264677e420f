use clap::Subcommand;

/// Access checks against the current membership.
#[derive(Clone, Debug, Subcommand)]
pub enum AccessCommands {
    /// Evaluate navigation to a full path such as `/AcmeCorp/budget-management`.
    Check { path: String },
    /// Explain the route rule for a feature path in the current org.
    Explain { feature: String },
    /// Whether the membership holds any of the given permission tags.
    Can {
        #[arg(required = true)]
        permissions: Vec<String>,
    },
}
