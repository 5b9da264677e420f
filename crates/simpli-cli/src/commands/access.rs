mod can;
mod check;
mod explain;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AccessCommands;
use crate::context::AppContext;

/// Handle `simpli access <subcommand>`.
pub fn handle(
    action: &AccessCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AccessCommands::Check { path } => check::run(path, ctx, flags),
        AccessCommands::Explain { feature } => explain::run(feature, ctx, flags),
        AccessCommands::Can { permissions } => can::run(permissions, ctx, flags),
    }
}
