//! Entity structs for SimpliP2P domain objects.
//!
//! Field names follow the backend's JSON. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod budget;
mod membership;
mod order;
mod organization;
mod requisition;
mod supplier;

pub use budget::Budget;
pub use membership::{Memberships, OrganizationMembership};
pub use order::PurchaseOrder;
pub use organization::Organization;
pub use requisition::Requisition;
pub use supplier::Supplier;
