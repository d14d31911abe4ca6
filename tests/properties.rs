use merkle_commitment::{verify_inclusion, Digest, MerkleTree, Proof, ProofStep, Sha256};
use proptest::prelude::*;

fn blocks_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 1..40)
}

proptest! {
    /// Property: building twice from the same blocks yields the same root.
    #[test]
    fn prop_root_deterministic(blocks in blocks_strategy()) {
        let a: MerkleTree<Sha256> = MerkleTree::new(&blocks).unwrap();
        let b: MerkleTree<Sha256> = MerkleTree::new(&blocks).unwrap();
        prop_assert_eq!(a.root(), b.root());
    }

    /// Property: every leaf's proof verifies against the root.
    #[test]
    fn prop_every_proof_verifies(blocks in blocks_strategy()) {
        let t: MerkleTree<Sha256> = MerkleTree::new(&blocks).unwrap();
        let root = t.root();
        for (i, block) in blocks.iter().enumerate() {
            let p = t.gen_proof(i).unwrap();
            prop_assert!(p.len() < t.height());
            prop_assert!(verify_inclusion::<Sha256>(&root, block, &p));
        }
    }

    /// Property: changing one byte of one block changes the root, and the old
    /// proof no longer accepts the changed block.
    #[test]
    fn prop_mutation_detected(
        blocks in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..48), 1..40),
        pick in any::<prop::sample::Index>(),
        byte in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        let t: MerkleTree<Sha256> = MerkleTree::new(&blocks).unwrap();
        let i = pick.index(blocks.len());
        let proof = t.gen_proof(i).unwrap();

        let mut mutated = blocks.clone();
        let j = byte.index(mutated[i].len());
        mutated[i][j] ^= mask;

        let t2: MerkleTree<Sha256> = MerkleTree::new(&mutated).unwrap();
        prop_assert_ne!(t.root(), t2.root());
        prop_assert!(!verify_inclusion::<Sha256>(&t.root(), &mutated[i], &proof));
    }

    /// Property: a flipped byte in any sibling digest breaks the proof.
    #[test]
    fn prop_sibling_tamper_detected(
        blocks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 2..40),
        pick in any::<prop::sample::Index>(),
        step in any::<prop::sample::Index>(),
        byte in 0usize..32,
        mask in 1u8..=255,
    ) {
        let t: MerkleTree<Sha256> = MerkleTree::new(&blocks).unwrap();
        let i = pick.index(blocks.len());
        let mut steps: Vec<ProofStep> = t.gen_proof(i).unwrap().into();
        let k = step.index(steps.len());

        let mut sibling = steps[k].sibling.into_bytes();
        sibling[byte] ^= mask;
        steps[k].sibling = Digest::new(sibling);

        prop_assert!(!verify_inclusion::<Sha256>(&t.root(), &blocks[i], &Proof::new(steps)));
    }

    /// Property: swapping two distinct blocks changes the root.
    #[test]
    fn prop_reorder_changes_root(
        blocks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 2..40),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (i, j) = (a.index(blocks.len()), b.index(blocks.len()));
        prop_assume!(blocks[i] != blocks[j]);

        let mut swapped = blocks.clone();
        swapped.swap(i, j);

        let t: MerkleTree<Sha256> = MerkleTree::new(&blocks).unwrap();
        let t2: MerkleTree<Sha256> = MerkleTree::new(&swapped).unwrap();
        prop_assert_ne!(t.root(), t2.root());
    }

    /// Property: appending or dropping one block changes the root.
    #[test]
    fn prop_count_changes_root(
        blocks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 2..40),
        extra in prop::collection::vec(any::<u8>(), 0..48),
    ) {
        let t: MerkleTree<Sha256> = MerkleTree::new(&blocks).unwrap();

        let mut longer = blocks.clone();
        longer.push(extra);
        let t2: MerkleTree<Sha256> = MerkleTree::new(&longer).unwrap();
        prop_assert_ne!(t.root(), t2.root());

        let shorter = &blocks[..blocks.len() - 1];
        let t3: MerkleTree<Sha256> = MerkleTree::new(shorter).unwrap();
        prop_assert_ne!(t.root(), t3.root());
    }

    /// Property: the wire form decodes to the same proof.
    #[test]
    fn prop_wire_form_is_lossless(blocks in blocks_strategy(), pick in any::<prop::sample::Index>()) {
        let t: MerkleTree<Sha256> = MerkleTree::new(&blocks).unwrap();
        let p = t.gen_proof(pick.index(blocks.len())).unwrap();
        prop_assert_eq!(Proof::from_bytes(&p.to_bytes()).unwrap(), p);
    }
}
