mod current;
mod list;
mod switch;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::context::AppContext;

/// Handle `simpli org <subcommand>`.
pub fn handle(
    action: &OrgCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OrgCommands::List => list::run(ctx, flags),
        OrgCommands::Current => current::run(ctx, flags),
        OrgCommands::Switch { org } => switch::run(org, ctx, flags),
    }
}
