//! Error types for tree construction, proof generation and decoding.
//!
//! A failed inclusion check is not an error: verification returns `false`.

use thiserror::Error;

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the commitment tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tree cannot be built from zero blocks.
    #[error("cannot build a merkle tree from an empty block list")]
    EmptyInput,

    /// Requested leaf does not exist in the tree.
    #[error("leaf index {index} is out of range (leafs: {leafs})")]
    IndexOutOfRange {
        /// Requested leaf index.
        index: usize,
        /// Number of leafs in the tree.
        leafs: usize,
    },

    /// Byte slice has the wrong width for a digest.
    #[error("invalid digest length: expected {expected}, got {actual}")]
    InvalidDigestLength {
        /// Digest width in bytes.
        expected: usize,
        /// Length of the supplied slice.
        actual: usize,
    },

    /// Hex text does not encode a digest.
    #[error("invalid hex digest: {0}")]
    InvalidHex(String),

    /// Encoded proof could not be decoded.
    #[error("malformed proof encoding: {0}")]
    MalformedProof(String),
}

impl Error {
    pub(crate) fn invalid_hex<S: Into<String>>(msg: S) -> Self {
        Self::InvalidHex(msg.into())
    }

    pub(crate) fn malformed_proof<S: Into<String>>(msg: S) -> Self {
        Self::MalformedProof(msg.into())
    }
}
