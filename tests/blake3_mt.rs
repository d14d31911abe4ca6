#![cfg(feature = "blake3")]

use merkle_commitment::{hash, verify_inclusion, Blake3, Digest, Hashable, MerkleTree};

fn b3(parts: &[&[u8]]) -> Digest {
    let mut h = blake3::Hasher::new();
    for p in parts {
        h.update(p);
    }
    Digest::new(*h.finalize().as_bytes())
}

/// A commitment record: who committed, and to which ciphertext.
struct CommitEntry {
    public_key: Vec<u8>,
    payload: Digest,
}

impl Hashable<Blake3> for CommitEntry {
    fn hash(&self, state: &mut Blake3) {
        self.public_key.hash(state);
        self.payload.hash(state);
    }
}

#[test]
fn test_blake3_leaf_hash() {
    assert_eq!(hash::<Blake3>(b"abc"), b3(&[b"abc"]));
}

#[test]
fn test_blake3_records() -> anyhow::Result<()> {
    let entries: Vec<CommitEntry> = (0u8..6)
        .map(|i| CommitEntry {
            public_key: vec![i; 48],
            payload: b3(&[&[i]]),
        })
        .collect();
    let t: MerkleTree<Blake3> = MerkleTree::from_data(&entries)?;

    let leaf0 = b3(&[&entries[0].public_key[..], entries[0].payload.as_ref()]);
    assert_eq!(t.leaf(0), Some(&leaf0));

    for (i, e) in entries.iter().enumerate() {
        let p = t.gen_proof(i)?;
        assert!(merkle_commitment::verify_item_inclusion::<Blake3, _>(&t.root(), e, &p));

        let mut flat = e.public_key.clone();
        flat.extend_from_slice(e.payload.as_ref());
        assert!(verify_inclusion::<Blake3>(&t.root(), &flat, &p));
    }
    Ok(())
}
