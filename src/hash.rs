//! Hash infrastructure for blocks and nodes of the commitment tree.

use std::hash::Hasher;

use crate::digest::{Digest, DIGEST_LEN};

/// A hashable type.
///
/// Types implementing `Hashable` feed their raw bytes into a [`Hasher`],
/// with no length prefixes or type tags. A string block `"x"` therefore
/// hashes exactly like the byte block `b"x"`.
///
/// Structured records implement it by feeding their fields in a fixed order:
///
/// ```text
/// struct Commit {
///     public_key: Vec<u8>,
///     payload: Digest,
/// }
///
/// impl<H: Hasher> Hashable<H> for Commit {
///     fn hash(&self, state: &mut H) {
///         self.public_key.hash(state);
///         self.payload.hash(state);
///     }
/// }
/// ```
///
/// ## Field boundaries
///
/// Nothing marks where one field ends and the next begins. Slices, `Vec`s and
/// strings carry no length prefix and `None` feeds no bytes at all, so
/// distinct records can hash the same:
///
/// ```text
/// (vec![1, 2], vec![3])  ==  (vec![1], vec![2, 3])
/// (Some(a), None)        ==  (None, Some(a))
/// ```
///
/// Records committed this way must have a fixed layout: fixed-width fields,
/// or at most one variable-length field placed last. Otherwise feed an
/// explicit length (for example `(v.len() as u64).hash(state)`) before each
/// variable-length field.
///
/// ## `Hashable` and `Eq`
///
/// When implementing both `Hashable` and [`Eq`], it is important that the following
/// property holds:
///
/// ```text
/// k1 == k2 -> hash(k1) == hash(k2)
/// ```
pub trait Hashable<H: Hasher> {
    /// Feeds this value into the given [`Hasher`].
    fn hash(&self, state: &mut H);

    /// Feeds a slice of this type into the given [`Hasher`].
    fn hash_slice(data: &[Self], state: &mut H)
    where
        Self: Sized,
    {
        for piece in data {
            piece.hash(state);
        }
    }
}

/// Hashing algorithm type.
///
/// Algorithm conforms standard [`Hasher`] trait and provides methods to return
/// the full length digest and reset current state. The combination rules are
/// part of the commitment protocol and must not be overridden by backends:
///
/// ```text
/// leaf(block)       = H(block)
/// node(left, right) = H(left || right)
/// ```
///
/// where `left` and `right` are the raw 32-byte child digests.
pub trait Algorithm: Hasher + Default {
    /// Returns the digest of the data stream written so far and resets the state.
    fn hash(&mut self) -> Digest;

    /// Reset Hasher state.
    fn reset(&mut self);

    /// Returns digest of the empty thing.
    fn empty(&mut self) -> Digest {
        self.reset();
        self.hash()
    }

    /// Returns the digest of a tree leaf.
    fn leaf(&mut self, block: &[u8]) -> Digest {
        self.reset();
        self.write(block);
        self.hash()
    }

    /// Returns the digest of an internal node from its children.
    fn node(&mut self, left: &Digest, right: &Digest) -> Digest {
        self.reset();
        self.write(left.as_ref());
        self.write(right.as_ref());
        self.hash()
    }
}

/// One-shot hash of `bytes` with a fresh `A` state.
pub fn hash<A: Algorithm>(bytes: &[u8]) -> Digest {
    A::default().leaf(bytes)
}

/// One-shot hash of a [`Hashable`] value with a fresh `A` state.
pub fn hash_item<A: Algorithm, O: Hashable<A> + ?Sized>(item: &O) -> Digest {
    let mut a = A::default();
    item.hash(&mut a);
    a.hash()
}

/// Combines two child digests into their parent digest with a fresh `A` state.
pub fn combine<A: Algorithm>(left: &Digest, right: &Digest) -> Digest {
    A::default().node(left, right)
}

/// `Hasher::finish` for digest-producing states: the first 8 digest bytes, little endian.
pub(crate) fn finish_u64(digest: &[u8]) -> u64 {
    debug_assert!(digest.len() >= 8 && digest.len() <= DIGEST_LEN);
    let mut b = [0u8; 8];
    b.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(b)
}
