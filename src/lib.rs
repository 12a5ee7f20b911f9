//! A growable array of owned strings with explicit doubling growth, plus a
//! small command-script runner used by the `arrays` binary.
pub mod array;
pub mod cli;
pub mod error;
pub mod logger;
pub mod script;

pub use array::DynamicArray;
pub use error::ArrayError;

#[cfg(test)]
mod tests;
