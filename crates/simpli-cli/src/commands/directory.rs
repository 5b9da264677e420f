use crate::cli::GlobalFlags;
use crate::cli::subcommands::{BudgetCommands, MemberCommands, SupplierCommands};
use crate::context::AppContext;
use crate::output::output;

/// Handle `simpli budget <subcommand>`.
pub async fn budgets(
    action: &BudgetCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        BudgetCommands::List => output(&ctx.client.list_budgets().await?, flags.format),
    }
}

/// Handle `simpli supplier <subcommand>`.
pub async fn suppliers(
    action: &SupplierCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SupplierCommands::List { search } => output(
            &ctx.client.list_suppliers(search.as_deref()).await?,
            flags.format,
        ),
    }
}

/// Handle `simpli member <subcommand>`.
pub async fn members(
    action: &MemberCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MemberCommands::List => output(&ctx.client.list_members().await?, flags.format),
    }
}
