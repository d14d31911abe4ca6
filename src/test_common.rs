use crate::algorithms::Sha256;
use crate::digest::Digest;
use crate::hash::{hash, Algorithm};
use crate::merkle::MerkleTree;

/// Distinct blocks `"block-0"`, `"block-1"`, ...
pub fn get_blocks(leafs: usize) -> Vec<Vec<u8>> {
    (0..leafs)
        .map(|i| format!("block-{}", i).into_bytes())
        .collect()
}

pub fn get_tree(leafs: usize) -> MerkleTree<Sha256> {
    MerkleTree::new(get_blocks(leafs)).expect("failed to create tree from blocks")
}

pub fn sha(block: &[u8]) -> Digest {
    hash::<Sha256>(block)
}

pub fn sha_node(left: &Digest, right: &Digest) -> Digest {
    Sha256::default().node(left, right)
}

/// Returns `d` with byte `i` xor-ed with `mask`.
pub fn flip(d: &Digest, i: usize, mask: u8) -> Digest {
    let mut bytes = d.into_bytes();
    bytes[i] ^= mask;
    Digest::new(bytes)
}
