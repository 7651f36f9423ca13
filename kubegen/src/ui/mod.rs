//! Terminal presentation helpers.

pub mod table;
