//! HTTP handlers.

mod health;
mod statement;
mod tables;

pub use health::*;
pub use statement::{execute, query};
pub use tables::*;
