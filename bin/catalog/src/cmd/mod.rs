//! Command implementations.

pub mod check;
pub mod list;
pub mod serve;
pub mod show;
