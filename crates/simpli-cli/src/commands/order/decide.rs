use simpli_core::enums::{ApprovalAction, EntityKind};
use simpli_workflow::{ApprovalCoordinator, ApprovalForm, Rejection};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DecisionArgs;
use crate::commands::requisition::decide::{ConfirmationPrompt, report};
use crate::context::AppContext;
use crate::output::output;

pub async fn approve(
    id: &str,
    form: &DecisionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let coordinator = ApprovalCoordinator::new(&ctx.client, ctx.membership()?);
    let outcome = coordinator
        .decide_order(id, ApprovalAction::Approve, &ApprovalForm::from(form))
        .await?;
    report(&outcome, flags)
}

pub async fn reject(
    id: &str,
    form: &DecisionArgs,
    confirm: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rejection = Rejection::new(EntityKind::PurchaseOrder, id, ApprovalForm::from(form));
    if !confirm {
        return output(
            &ConfirmationPrompt {
                confirmed: false,
                prompt: rejection.prompt(),
                hint: format!("rerun with --confirm to reject purchase order {id}"),
            },
            flags.format,
        );
    }

    let coordinator = ApprovalCoordinator::new(&ctx.client, ctx.membership()?);
    let outcome = coordinator.reject(rejection.confirm()).await?;
    report(&outcome, flags)
}
