//! Concrete hashing backends.
//!
//! [`Sha256`] is always available and is the default algorithm of
//! [`MerkleTree`](crate::merkle::MerkleTree). [`Sha3_256`] and [`Blake3`]
//! are enabled with the `sha3` and `blake3` cargo features.
//!
//! Every backend yields 32-byte digests, so roots and proofs share one wire
//! form. They do not share values: a proof must be verified with the same
//! algorithm the tree was built with.

use std::fmt;
use std::hash::Hasher;

use ring::digest::{Context, SHA256};

use crate::digest::Digest;
use crate::hash::{finish_u64, Algorithm};

/// SHA-256 backed by `ring`.
#[derive(Clone)]
pub struct Sha256(Context);

impl Sha256 {
    /// Creates a fresh SHA-256 state.
    pub fn new() -> Sha256 {
        Sha256(Context::new(&SHA256))
    }
}

impl Default for Sha256 {
    fn default() -> Sha256 {
        Sha256::new()
    }
}

impl fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256").finish_non_exhaustive()
    }
}

impl Hasher for Sha256 {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        self.0.update(msg)
    }

    #[inline]
    fn finish(&self) -> u64 {
        // ring::digest::Context is consumed by finish(self).
        finish_u64(self.0.clone().finish().as_ref())
    }
}

impl Algorithm for Sha256 {
    #[inline]
    fn hash(&mut self) -> Digest {
        let ctx = std::mem::replace(&mut self.0, Context::new(&SHA256));
        let mut h = [0u8; 32];
        h.copy_from_slice(ctx.finish().as_ref());
        Digest::new(h)
    }

    #[inline]
    fn reset(&mut self) {
        self.0 = Context::new(&SHA256);
    }
}

#[cfg(feature = "sha3")]
pub use self::sha3::Sha3_256;

#[cfg(feature = "sha3")]
mod sha3 {
    use std::fmt;
    use std::hash::Hasher;

    use tiny_keccak::{Hasher as _, Sha3};

    use crate::digest::Digest;
    use crate::hash::{finish_u64, Algorithm};

    /// SHA3-256 backed by `tiny-keccak`.
    #[derive(Clone)]
    #[allow(non_camel_case_types)]
    pub struct Sha3_256(Sha3);

    impl Sha3_256 {
        /// Creates a fresh SHA3-256 state.
        pub fn new() -> Sha3_256 {
            Sha3_256(Sha3::v256())
        }
    }

    impl Default for Sha3_256 {
        fn default() -> Sha3_256 {
            Sha3_256::new()
        }
    }

    impl fmt::Debug for Sha3_256 {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Sha3_256").finish_non_exhaustive()
        }
    }

    impl Hasher for Sha3_256 {
        #[inline]
        fn write(&mut self, msg: &[u8]) {
            self.0.update(msg)
        }

        #[inline]
        fn finish(&self) -> u64 {
            let mut h = [0u8; 32];
            self.0.clone().finalize(&mut h);
            finish_u64(&h)
        }
    }

    impl Algorithm for Sha3_256 {
        #[inline]
        fn hash(&mut self) -> Digest {
            let state = std::mem::replace(&mut self.0, Sha3::v256());
            let mut h = [0u8; 32];
            state.finalize(&mut h);
            Digest::new(h)
        }

        #[inline]
        fn reset(&mut self) {
            self.0 = Sha3::v256();
        }
    }
}

#[cfg(feature = "blake3")]
pub use self::blake3_impl::Blake3;

#[cfg(feature = "blake3")]
mod blake3_impl {
    use std::fmt;
    use std::hash::Hasher;

    use crate::digest::Digest;
    use crate::hash::{finish_u64, Algorithm};

    /// BLAKE3 with 32-byte output.
    #[derive(Clone, Default)]
    pub struct Blake3(blake3::Hasher);

    impl Blake3 {
        /// Creates a fresh BLAKE3 state.
        pub fn new() -> Blake3 {
            Blake3(blake3::Hasher::new())
        }
    }

    impl fmt::Debug for Blake3 {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Blake3").finish_non_exhaustive()
        }
    }

    impl Hasher for Blake3 {
        #[inline]
        fn write(&mut self, msg: &[u8]) {
            self.0.update(msg);
        }

        #[inline]
        fn finish(&self) -> u64 {
            finish_u64(self.0.finalize().as_bytes())
        }
    }

    impl Algorithm for Blake3 {
        #[inline]
        fn hash(&mut self) -> Digest {
            let h = Digest::new(*self.0.finalize().as_bytes());
            self.0.reset();
            h
        }

        #[inline]
        fn reset(&mut self) {
            self.0.reset();
        }
    }
}
