pub mod alignment;
pub mod alphabet;
pub mod config;
pub mod consensus;
pub mod error;
mod io;
pub mod linear_aligner;
pub mod quadratic_aligner;
pub mod recurrence;
pub mod score_matrix;
pub mod summarizer;
