//! Stock rewrite rules shared by language descriptors.

pub mod arithmetic;
pub mod binary_ops;
pub mod ops;
pub mod print;
pub mod tables;

#[cfg(test)]
mod print_tests;
