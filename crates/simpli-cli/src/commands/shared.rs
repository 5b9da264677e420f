pub mod decision;
pub mod limit;
pub mod parse;
