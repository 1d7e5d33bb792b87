pub mod generate;
pub mod output;

pub use generate::{GenerateError, GenerateOptions, generate};
pub use output::{OutputFormat, render, write_output};
