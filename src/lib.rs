//! Binary hash-commitment tree with self-contained inclusion proofs.
//!
//! A producer commits to an ordered list of opaque data blocks with one
//! 32-byte root digest and later proves, to anyone who trusts only that root,
//! that a given block is part of the list. The verifier never sees the tree
//! or the other blocks.
//!
//! Encoding scheme, for blocks `D[0..n]`, `n >= 1`:
//!
//! ```text
//! MTH({d(0)}) = H(d(0))
//! For n > 1, let k = n / 2 (rounded down). Then
//! MTH(D[0:n]) = H(MTH(D[0:k]) || MTH(D[k:n]))
//! ```
//!
//! where `||` concatenates the raw 32-byte digests. A one-block tree has the
//! block hash as its root.
//!
//! Link: [](https://en.wikipedia.org/wiki/Merkle_tree)
//!
//! # Interface
//!
//! ```text
//! - MerkleTree::new (blocks) -> tree              producer
//! - tree.root -> digest                           producer, published
//! - tree.gen_proof (index) -> proof               producer
//! - verify_inclusion (root, block, proof) -> bool verifier
//! ```
//!
//! A proof lists, from the leaf up, each sibling digest together with the
//! side it sits on. Verification needs neither the leaf index nor the number
//! of blocks.
//!
//! # Hash algorithms
//!
//! Trees are generic over [`Algorithm`]. [`Sha256`] (via `ring`) is the
//! default; `Sha3_256` and `Blake3` are available behind the `sha3` and
//! `blake3` cargo features. Proofs must be verified with the algorithm the
//! tree was built with.
//!
//! # Quick start
//!
//! ```
//! use merkle_commitment::{verify_inclusion, MerkleTree, Sha256};
//!
//! let blocks = ["1", "2", "3", "4"];
//! let tree: MerkleTree = MerkleTree::new(&blocks).unwrap();
//! let root = tree.root();
//!
//! let proof = tree.gen_proof(2).unwrap();
//! assert!(verify_inclusion::<Sha256>(&root, b"3", &proof));
//! assert!(!verify_inclusion::<Sha256>(&root, b"5", &proof));
//!
//! // proofs travel as bytes; the root as hex
//! let wire = proof.to_bytes();
//! let root: merkle_commitment::Digest = root.to_hex().parse().unwrap();
//! assert!(merkle_commitment::verify_encoded_inclusion::<Sha256>(&root, b"3", &wire));
//! ```

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

/// Fixed-width digests and their hex form.
pub mod digest;

/// Error types.
pub mod error;

/// Hash infrastructure for blocks and nodes.
pub mod hash;

/// Common implementations for [`Hashable`].
mod hash_impl;

/// Concrete hash algorithms.
pub mod algorithms;

/// Merkle tree inclusion proof and its verification.
pub mod proof;

/// Merkle tree construction and proof generation.
pub mod merkle;

#[cfg(test)]
mod test_common;


pub use crate::algorithms::Sha256;
#[cfg(feature = "blake3")]
pub use crate::algorithms::Blake3;
#[cfg(feature = "sha3")]
pub use crate::algorithms::Sha3_256;
pub use crate::digest::{Digest, DIGEST_LEN};
pub use crate::error::{Error, Result};
pub use crate::hash::{hash, Algorithm, Hashable};
pub use crate::merkle::{MerkleTree, Node};
pub use crate::proof::{
    verify_encoded_inclusion, verify_inclusion, verify_item_inclusion, Proof, ProofStep, Side,
};
