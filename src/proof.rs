use std::slice;

use log::trace;

use crate::digest::{Digest, DIGEST_LEN};
use crate::error::{Error, Result};
use crate::hash::{hash_item, Algorithm, Hashable};

/// Side that a sibling occupies under the common parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Sibling is the left child: parent = H(sibling || current).
    Left,
    /// Sibling is the right child: parent = H(current || sibling).
    Right,
}

impl Side {
    const LEFT_TAG: u8 = 0x00;
    const RIGHT_TAG: u8 = 0x01;

    fn tag(self) -> u8 {
        match self {
            Side::Left => Self::LEFT_TAG,
            Side::Right => Self::RIGHT_TAG,
        }
    }

    fn from_tag(tag: u8) -> Option<Side> {
        match tag {
            Self::LEFT_TAG => Some(Side::Left),
            Self::RIGHT_TAG => Some(Side::Right),
            _ => None,
        }
    }
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProofStep {
    /// Where the sibling sits relative to the node being proved.
    pub side: Side,
    /// Digest of the sibling subtree.
    pub sibling: Digest,
}

impl ProofStep {
    /// Creates a proof step.
    pub const fn new(side: Side, sibling: Digest) -> ProofStep {
        ProofStep { side, sibling }
    }

    /// Parent digest of `current` and this step's sibling.
    pub fn apply<A: Algorithm>(&self, a: &mut A, current: &Digest) -> Digest {
        match self.side {
            Side::Left => a.node(&self.sibling, current),
            Side::Right => a.node(current, &self.sibling),
        }
    }
}

/// Merkle tree inclusion proof.
///
/// Sibling digests ordered from the leaf level up to, but excluding, the root:
///
/// ```text
/// [ (side, sibling of leaf) (side, sibling of parent) ... (side, child of root) ]
/// ```
///
/// The proof carries no reference to the tree, its size, or the leaf index.
/// Each step says which side its sibling is on, which is all a verifier needs
/// to recompute the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof {
    steps: Vec<ProofStep>,
}

/// Encoded size of one proof step: side tag plus sibling digest.
pub const PROOF_STEP_LEN: usize = 1 + DIGEST_LEN;

impl Proof {
    /// Creates a proof from steps ordered leaf to root.
    pub fn new(steps: Vec<ProofStep>) -> Proof {
        Proof { steps }
    }

    /// Returns the steps, leaf to root.
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Iterates over the steps, leaf to root.
    pub fn iter(&self) -> slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    /// Number of steps; equals the depth of the proved leaf.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` for the proof of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Root implied by this proof for the given leaf digest.
    pub fn root_from_leaf<A: Algorithm>(&self, leaf: Digest) -> Digest {
        let mut a = A::default();
        self.steps
            .iter()
            .fold(leaf, |current, step| step.apply(&mut a, &current))
    }

    /// Verifies that `block` is included under `root`.
    ///
    /// Same as [`verify_inclusion`].
    pub fn verify<A: Algorithm>(&self, root: &Digest, block: &[u8]) -> bool {
        verify_inclusion::<A>(root, block, self)
    }

    /// Fixed-width encoding: for each step one tag byte (`0x00` left,
    /// `0x01` right) followed by the 32 sibling bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.steps.len() * PROOF_STEP_LEN);
        for step in &self.steps {
            out.push(step.side.tag());
            out.extend_from_slice(step.sibling.as_ref());
        }
        out
    }

    /// Decodes the form produced by [`Proof::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Proof> {
        if bytes.len() % PROOF_STEP_LEN != 0 {
            return Err(Error::malformed_proof(format!(
                "length {} is not a multiple of {}",
                bytes.len(),
                PROOF_STEP_LEN
            )));
        }

        let steps = bytes
            .chunks_exact(PROOF_STEP_LEN)
            .enumerate()
            .map(|(i, chunk)| {
                let side = Side::from_tag(chunk[0]).ok_or_else(|| {
                    Error::malformed_proof(format!(
                        "unknown side tag {:#04x} at step {}",
                        chunk[0], i
                    ))
                })?;
                let sibling = Digest::from_slice(&chunk[1..])?;
                Ok(ProofStep { side, sibling })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Proof { steps })
    }
}

impl From<Vec<ProofStep>> for Proof {
    fn from(steps: Vec<ProofStep>) -> Self {
        Proof { steps }
    }
}

impl From<Proof> for Vec<ProofStep> {
    fn from(proof: Proof) -> Self {
        proof.steps
    }
}

impl FromIterator<ProofStep> for Proof {
    fn from_iter<I: IntoIterator<Item = ProofStep>>(iter: I) -> Self {
        Proof {
            steps: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Proof {
    type Item = ProofStep;
    type IntoIter = std::vec::IntoIter<ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a ProofStep;
    type IntoIter = slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Checks that `block` is committed under the trusted `root`.
///
/// Needs nothing but the root, the block and the proof. Returns `false` for a
/// stale root, a different block or a tampered proof; none of these is an error.
pub fn verify_inclusion<A: Algorithm>(root: &Digest, block: &[u8], proof: &Proof) -> bool {
    verify_leaf::<A>(root, A::default().leaf(block), proof)
}

/// Like [`verify_inclusion`] for a structured [`Hashable`] item.
pub fn verify_item_inclusion<A, O>(root: &Digest, item: &O, proof: &Proof) -> bool
where
    A: Algorithm,
    O: Hashable<A> + ?Sized,
{
    verify_leaf::<A>(root, hash_item::<A, O>(item), proof)
}

/// Like [`verify_inclusion`] for a proof still in its wire form.
///
/// Undecodable bytes fail verification instead of returning an error.
pub fn verify_encoded_inclusion<A: Algorithm>(root: &Digest, block: &[u8], proof: &[u8]) -> bool {
    match Proof::from_bytes(proof) {
        Ok(proof) => verify_inclusion::<A>(root, block, &proof),
        Err(e) => {
            trace!("rejecting inclusion proof: {}", e);
            false
        }
    }
}

fn verify_leaf<A: Algorithm>(root: &Digest, leaf: Digest, proof: &Proof) -> bool {
    let computed = proof.root_from_leaf::<A>(leaf);
    if computed != *root {
        trace!(
            "inclusion proof of {} steps does not match root {} (computed {})",
            proof.len(),
            root,
            computed
        );
        return false;
    }
    true
}

#[cfg(test)]
use crate::{algorithms::Sha256, test_common::*};

#[cfg(test)]
// Flip one byte of one sibling inside the proof.
fn modify_proof(proof: &mut Proof, step: usize, byte: usize) {
    let s = &mut proof.steps[step];
    s.sibling = flip(&s.sibling, byte, 0x01);
}

#[test]
fn test_proofs() {
    let leafs = 64 + 5;
    let blocks = get_blocks(leafs);
    let tree = get_tree(leafs);
    let root = tree.root();

    for i in 0..tree.leafs() {
        let p = tree.gen_proof(i).unwrap();
        assert!(p.verify::<Sha256>(&root, &blocks[i]));
        assert!(verify_item_inclusion::<Sha256, _>(&root, &blocks[i], &p));

        // Break the proof here and assert negative validation.
        for step in 0..p.len() {
            for byte in [0, 13, 31] {
                let mut broken = p.clone();
                modify_proof(&mut broken, step, byte);
                assert!(!broken.verify::<Sha256>(&root, &blocks[i]));
            }
        }
    }
}

#[test]
fn test_swapped_side_fails() {
    let blocks = get_blocks(8);
    let tree = get_tree(8);
    let p = tree.gen_proof(3).unwrap();
    let swapped: Proof = p
        .iter()
        .map(|s| {
            let side = match s.side {
                Side::Left => Side::Right,
                Side::Right => Side::Left,
            };
            ProofStep::new(side, s.sibling)
        })
        .collect();
    assert!(!swapped.verify::<Sha256>(&tree.root(), &blocks[3]));
}

#[test]
fn test_truncated_and_extended_proofs_fail() {
    let blocks = get_blocks(8);
    let tree = get_tree(8);
    let root = tree.root();
    let p = tree.gen_proof(6).unwrap();

    let truncated: Proof = p.steps()[..p.len() - 1].to_vec().into();
    assert!(!truncated.verify::<Sha256>(&root, &blocks[6]));
    assert!(!Proof::default().verify::<Sha256>(&root, &blocks[6]));

    let mut extended: Vec<ProofStep> = p.clone().into();
    extended.push(ProofStep::new(Side::Right, root));
    assert!(!Proof::new(extended).verify::<Sha256>(&root, &blocks[6]));
}

#[test]
fn test_stale_root_fails() {
    let blocks = get_blocks(10);
    let tree = get_tree(10);
    let p = tree.gen_proof(0).unwrap();
    let stale = get_tree(9).root();
    assert!(!verify_inclusion::<Sha256>(&stale, &blocks[0], &p));
}

#[test]
fn test_wire_encoding() {
    let blocks = get_blocks(7);
    let tree = get_tree(7);
    let root = tree.root();
    let p = tree.gen_proof(5).unwrap();

    let wire = p.to_bytes();
    assert_eq!(wire.len(), p.len() * PROOF_STEP_LEN);
    for (chunk, step) in wire.chunks(PROOF_STEP_LEN).zip(p.iter()) {
        let tag = match step.side {
            Side::Left => 0x00,
            Side::Right => 0x01,
        };
        assert_eq!(chunk[0], tag);
        assert_eq!(&chunk[1..], step.sibling.as_ref());
    }
    assert_eq!(Proof::from_bytes(&wire).unwrap(), p);
    assert!(verify_encoded_inclusion::<Sha256>(&root, &blocks[5], &wire));
    assert_eq!(Proof::from_bytes(&[]).unwrap(), Proof::default());
}

#[test]
fn test_malformed_wire_proofs() {
    let blocks = get_blocks(7);
    let tree = get_tree(7);
    let root = tree.root();
    let wire = tree.gen_proof(5).unwrap().to_bytes();

    let short = &wire[..wire.len() - 1];
    assert!(matches!(Proof::from_bytes(short), Err(Error::MalformedProof(_))));
    assert!(!verify_encoded_inclusion::<Sha256>(&root, &blocks[5], short));

    let mut bad_tag = wire.clone();
    bad_tag[PROOF_STEP_LEN] = 0x02;
    assert!(matches!(Proof::from_bytes(&bad_tag), Err(Error::MalformedProof(_))));
    assert!(!verify_encoded_inclusion::<Sha256>(&root, &blocks[5], &bad_tag));

    let mut bad_digest = wire;
    bad_digest[1] ^= 0x80;
    assert!(Proof::from_bytes(&bad_digest).is_ok());
    assert!(!verify_encoded_inclusion::<Sha256>(&root, &blocks[5], &bad_digest));
}

#[test]
fn test_root_from_leaf() {
    let tree = get_tree(12);
    for i in 0..12 {
        let p = tree.gen_proof(i).unwrap();
        assert_eq!(p.root_from_leaf::<Sha256>(sha(&get_blocks(12)[i])), tree.root());
    }
    // a one-leaf proof implies the leaf itself as root
    assert_eq!(Proof::default().root_from_leaf::<Sha256>(sha(b"x")), sha(b"x"));
    assert_eq!(
        Proof::new(vec![ProofStep::new(Side::Left, sha(b"l"))]).root_from_leaf::<Sha256>(sha(b"x")),
        sha_node(&sha(b"l"), &sha(b"x"))
    );
}
