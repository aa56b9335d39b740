//! Decoding pipeline: line scanning, scalar lexing and tree building

pub mod parser;
pub mod scalar;
pub mod scanner;
