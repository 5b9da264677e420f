pub mod access;
pub mod auth;
pub mod decision;
pub mod directory;
pub mod org;
pub mod order;
pub mod requisition;

pub use access::AccessCommands;
pub use auth::AuthCommands;
pub use decision::DecisionArgs;
pub use directory::{BudgetCommands, MemberCommands, SupplierCommands};
pub use org::OrgCommands;
pub use order::OrderCommands;
pub use requisition::RequisitionCommands;
