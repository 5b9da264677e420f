use simpli_workflow::ApprovalForm;

use crate::cli::subcommands::DecisionArgs;

impl From<&DecisionArgs> for ApprovalForm {
    fn from(args: &DecisionArgs) -> Self {
        Self {
            budget_id: args.budget.clone(),
            supplier_id: args.supplier.clone(),
            justification: args.justification.clone(),
        }
    }
}
