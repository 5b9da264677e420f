pub mod access;
pub mod auth;
pub mod directory;
pub mod dispatch;
pub mod order;
pub mod org;
pub mod requisition;
pub mod shared;
