//! Command implementations.

pub mod generate;

pub use generate::execute as generate_execute;
