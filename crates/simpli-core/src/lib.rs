//! # simpli-core
//!
//! Core types shared across all SimpliP2P crates:
//! - Entity structs (memberships, requisitions, purchase orders, budgets, suppliers)
//! - Status enums with state machine transitions
//! - The closed permission vocabulary
//! - Sanitized organization names used in route paths
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod org_name;

pub use errors::CoreError;
pub use org_name::{OrgName, sanitize};
