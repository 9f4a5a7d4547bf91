//! Error taxonomy shared by discovery, parsing, and emission.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input directory does not exist or cannot be read.
    #[error("the system cannot find the specified path: {}", .0.display())]
    InputNotFound(PathBuf),

    /// An `[Address(RVA = ...)]` value that is not a hex or decimal integer.
    #[error("malformed address literal {literal:?} on line {line}")]
    MalformedAddressLiteral { line: usize, literal: String },

    /// A name could not be applied at an address. Halts the batch.
    #[error("failed to apply {name} at {address:#x}: {reason}")]
    EmissionFailure {
        address: u64,
        name: String,
        reason: String,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, Error>;
