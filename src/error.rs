//! Error types for benchmark generation.
//!
//! Using thiserror for more idiomatic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for benchmark program generation.
///
/// Configuration errors (`UnknownTypeTag`, `MalformedOperands`,
/// `InvalidOpcode`) are catalog defects and abort the run; they are never
/// retried. I/O errors carry the descriptor opcode and path so a failed
/// write can be diagnosed from the message alone.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("no default literal for type `{ty}` (descriptor `{opcode}`)")]
    UnknownTypeTag {
        opcode: &'static str,
        ty: &'static str,
    },

    #[error("descriptor `{opcode}` needs two operand literals, got `{args}`")]
    MalformedOperands {
        opcode: &'static str,
        args: String,
    },

    #[error("opcode `{opcode}` is not a valid file stem")]
    InvalidOpcode {
        opcode: &'static str,
    },

    #[error("repetition count must be greater than zero")]
    NonPositiveRepetitions,

    #[error("failed to write `{path}` for descriptor `{opcode}`")]
    Write {
        opcode: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory `{path}`")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for generation operations.
pub type GenResult<T> = Result<T, GenError>;
