#![doc = include_str!("../README.md")]

mod compiler;
pub mod tree_backend;

pub use compiler::*;
