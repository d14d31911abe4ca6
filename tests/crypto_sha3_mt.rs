#![cfg(feature = "sha3")]

use merkle_commitment::{hash, verify_inclusion, Digest, MerkleTree, Sha256, Sha3_256};
use tiny_keccak::{Hasher, Sha3};

fn keccak_sha3(parts: &[&[u8]]) -> Digest {
    let mut s = Sha3::v256();
    for p in parts {
        s.update(p);
    }
    let mut h = [0u8; 32];
    s.finalize(&mut h);
    Digest::new(h)
}

#[test]
fn test_crypto_sha3_leaf_hash() {
    assert_eq!(
        hash::<Sha3_256>(b"abc").to_hex(),
        "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
}

#[test]
fn test_crypto_sha3_tree() -> anyhow::Result<()> {
    let t: MerkleTree<Sha3_256> = MerkleTree::new(["a", "b", "c"])?;
    let (a, b, c) = (
        keccak_sha3(&[b"a"]),
        keccak_sha3(&[b"b"]),
        keccak_sha3(&[b"c"]),
    );
    let bc = keccak_sha3(&[b.as_ref(), c.as_ref()]);
    assert_eq!(t.root(), keccak_sha3(&[a.as_ref(), bc.as_ref()]));

    for (i, block) in ["a", "b", "c"].iter().enumerate() {
        let p = t.gen_proof(i)?;
        assert!(verify_inclusion::<Sha3_256>(&t.root(), block.as_bytes(), &p));
        // same proof, wrong algorithm
        assert!(!verify_inclusion::<Sha256>(&t.root(), block.as_bytes(), &p));
    }
    Ok(())
}
