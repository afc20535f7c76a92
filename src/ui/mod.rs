// src/ui/mod.rs
pub mod render;
pub mod statement;

pub use statement::{show_statement_view, StatementAction};
