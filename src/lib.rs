#[macro_use]
extern crate lazy_static;

pub mod diag;
pub mod error;
pub mod expr;
pub mod extract;
pub mod mask;
pub mod render;
pub mod rewrite;
mod tests;
