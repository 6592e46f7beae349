//! Command-line interface

pub mod args;

pub use args::{parse, Args};
