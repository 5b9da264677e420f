use serde::Serialize;
use simpli_core::enums::{ApprovalAction, EntityKind};
use simpli_workflow::{ApprovalCoordinator, ApprovalForm, ApprovalOutcome, Rejection};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DecisionArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
pub struct ConfirmationPrompt {
    pub confirmed: bool,
    pub prompt: String,
    pub hint: String,
}

pub async fn run(
    id: &str,
    action: ApprovalAction,
    form: &DecisionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let coordinator = ApprovalCoordinator::new(&ctx.client, ctx.membership()?);
    let outcome = coordinator
        .decide_requisition(id, action, &ApprovalForm::from(form))
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
    let rejection = Rejection::new(EntityKind::Requisition, id, ApprovalForm::from(form));
    if !confirm {
        return output(
            &ConfirmationPrompt {
                confirmed: false,
                prompt: rejection.prompt(),
                hint: format!("rerun with --confirm to reject requisition {id}"),
            },
            flags.format,
        );
    }

    let coordinator = ApprovalCoordinator::new(&ctx.client, ctx.membership()?);
    let outcome = coordinator.reject(rejection.confirm()).await?;
    report(&outcome, flags)
}

pub async fn retry_po(
    id: &str,
    form: &DecisionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let coordinator = ApprovalCoordinator::new(&ctx.client, ctx.membership()?);
    let outcome = coordinator
        .retry_order_creation(id, &ApprovalForm::from(form))
        .await?;
    report(&outcome, flags)
}

/// Print the outcome; a partially applied action still exits non-zero.
pub fn report(outcome: &ApprovalOutcome, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(outcome, flags.format)?;
    if let ApprovalOutcome::PartiallyApplied(partial) = outcome {
        anyhow::bail!(
            "requisition {} was approved but its purchase order was not created ({}); run `simpli requisition retry-po {}`",
            partial.requisition.id,
            partial.error,
            partial.requisition.id
        );
    }
    Ok(())
}
