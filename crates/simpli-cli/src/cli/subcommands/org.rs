use clap::Subcommand;

/// Organization context commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// List your memberships.
    List,
    /// Show the current organization.
    Current,
    /// Make another organization current (by id or name).
    Switch { org: String },
}
