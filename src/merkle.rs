use std::fmt;
use std::marker::PhantomData;

use log::{debug, trace};

use crate::algorithms::Sha256;
use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::hash::{Algorithm, Hashable};
use crate::proof::{Proof, ProofStep, Side};

/// Merkle Tree.
///
/// All leafs and nodes are stored in a linear array (vec) and refer to each
/// other by index. There are no parent links: proofs are produced by walking
/// down from the root.
///
/// A merkle tree is a tree in which every non-leaf node is the hash of its
/// children nodes. A diagram depicting how it works:
///
/// ```text
///         root = h1234 = h(h12 + h34)
///        /                           \
///  h12 = h(h1 + h2)            h34 = h(h3 + h4)
///   /            \              /            \
/// h1 = h(tx1)  h2 = h(tx2)    h3 = h(tx3)  h4 = h(tx4)
/// ```
///
/// In memory layout:
///
/// ```text
///     [h1 h2 h3 h4 h12 h34 root]
/// ```
///
/// Leaf `i` is always node `i`. Interior nodes follow in the order the
/// recursive build finishes them, so the root is always the last element.
///
/// The node covering leafs `[start, end)` splits at
/// `mid = start + (end - start) / 2`. For an odd count the right half gets the
/// extra leaf, and no leaf is ever duplicated or padded. Five leafs give:
///
/// ```text
///              root
///          /          \
///       h12           h345
///      /   \         /    \
///    h1     h2     h3     h45
///                        /   \
///                      h4     h5
/// ```
///
/// The tree is immutable once built. It holds only digests and indices and
/// can be shared between threads to serve proofs concurrently.
pub struct MerkleTree<A: Algorithm = Sha256> {
    nodes: Vec<Node>,
    leafs: usize,
    height: usize,
    _a: PhantomData<fn() -> A>,
}

/// A vertex of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Digest of one input block.
    Leaf {
        /// `H(block)`.
        digest: Digest,
    },
    /// Digest of two children, addressed by node index.
    Interior {
        /// `H(left || right)`.
        digest: Digest,
        /// Index of the left child.
        left: usize,
        /// Index of the right child.
        right: usize,
    },
}

impl Node {
    /// Returns the node digest.
    pub fn digest(&self) -> &Digest {
        match self {
            Node::Leaf { digest } | Node::Interior { digest, .. } => digest,
        }
    }

    /// `true` for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

impl<A: Algorithm> MerkleTree<A> {
    /// Creates new merkle tree from a sequence of data blocks.
    ///
    /// Leaf `i` is `H(blocks[i])`. Fails with [`Error::EmptyInput`] if there
    /// are no blocks.
    pub fn new<B, I>(blocks: I) -> Result<MerkleTree<A>>
    where
        B: AsRef<[u8]>,
        I: IntoIterator<Item = B>,
    {
        let mut a = A::default();
        Self::from_leafs(blocks.into_iter().map(|b| a.leaf(b.as_ref())))
    }

    /// Creates new merkle tree from a list of hashable objects.
    pub fn from_data<O, I>(data: I) -> Result<MerkleTree<A>>
    where
        O: Hashable<A>,
        I: IntoIterator<Item = O>,
    {
        let mut a = A::default();
        Self::from_leafs(data.into_iter().map(|x| {
            a.reset();
            x.hash(&mut a);
            a.hash()
        }))
    }

    /// Creates new merkle tree from already computed leaf digests.
    pub fn from_leafs<I: IntoIterator<Item = Digest>>(leafs: I) -> Result<MerkleTree<A>> {
        let mut nodes: Vec<Node> = leafs
            .into_iter()
            .map(|digest| Node::Leaf { digest })
            .collect();

        let leafs = nodes.len();
        if leafs == 0 {
            return Err(Error::EmptyInput);
        }
        nodes.reserve_exact(leafs - 1);

        let mut a = A::default();
        let (_, height) = build(&mut a, &mut nodes, 0, leafs);
        debug_assert_eq!(nodes.len(), 2 * leafs - 1);
        debug_assert_eq!(height, expected_height(leafs));

        let mt = MerkleTree {
            nodes,
            leafs,
            height,
            _a: PhantomData,
        };
        debug!(
            "built merkle tree: {} leafs, height {}, root {}",
            mt.leafs,
            mt.height,
            mt.root()
        );
        Ok(mt)
    }

    /// Generate merkle tree inclusion proof for leaf `i`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `i` is not a leaf index; the
    /// tree stays usable for other indices.
    pub fn gen_proof(&self, i: usize) -> Result<Proof> {
        if i >= self.leafs {
            return Err(Error::IndexOutOfRange {
                index: i,
                leafs: self.leafs,
            });
        }
        Ok(self.proof_for(i))
    }

    /// Generates proofs for every leaf, in leaf order.
    pub fn gen_proofs(&self) -> Vec<Proof> {
        (0..self.leafs).map(|i| self.proof_for(i)).collect()
    }

    /// Descends from the root to leaf `i`, which must be in range.
    fn proof_for(&self, i: usize) -> Proof {
        let mut steps: Vec<ProofStep> = Vec::with_capacity(self.height - 1);
        let mut start = 0;
        let mut end = self.leafs;
        let mut cur = self.root_index();

        while let Node::Interior { left, right, .. } = self.nodes[cur] {
            let mid = start + (end - start) / 2;
            if i < mid {
                steps.push(ProofStep::new(Side::Right, *self.nodes[right].digest()));
                cur = left;
                end = mid;
            } else {
                steps.push(ProofStep::new(Side::Left, *self.nodes[left].digest()));
                cur = right;
                start = mid;
            }
        }
        debug_assert_eq!((start, end, cur), (i, i + 1, i));

        // collected root first, proofs run leaf first
        steps.reverse();
        trace!("generated proof for leaf {}: {} steps", i, steps.len());
        Proof::new(steps)
    }

    /// Returns merkle root
    pub fn root(&self) -> Digest {
        *self.nodes[self.root_index()].digest()
    }

    /// Returns the digest of leaf `i`, if it exists.
    pub fn leaf(&self, i: usize) -> Option<&Digest> {
        self.nodes[..self.leafs].get(i).map(Node::digest)
    }

    /// Returns node `i` of the in-memory layout, if it exists.
    pub fn node(&self, i: usize) -> Option<&Node> {
        self.nodes.get(i)
    }

    /// Returns all nodes in their in-memory layout.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns number of nodes in the tree, `2 * leafs - 1`.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns height of the tree: the number of levels, root and leafs
    /// included. The longest proof has `height - 1` steps.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns original number of elements the tree was built upon.
    pub fn leafs(&self) -> usize {
        self.leafs
    }

    /// Node indices grouped by level, root level first.
    pub fn levels(&self) -> Vec<Vec<usize>> {
        let mut levels = Vec::with_capacity(self.height);
        let mut current = vec![self.root_index()];
        while !current.is_empty() {
            let next = current
                .iter()
                .filter_map(|&n| match self.nodes[n] {
                    Node::Interior { left, right, .. } => Some([left, right]),
                    Node::Leaf { .. } => None,
                })
                .flatten()
                .collect();
            levels.push(current);
            current = next;
        }
        levels
    }

    fn root_index(&self) -> usize {
        self.nodes.len() - 1
    }
}

/// Builds the subtree over leafs `[start, end)` and returns its node index
/// and height.
fn build<A: Algorithm>(
    a: &mut A,
    nodes: &mut Vec<Node>,
    start: usize,
    end: usize,
) -> (usize, usize) {
    if end - start == 1 {
        return (start, 1);
    }

    let mid = start + (end - start) / 2;
    let (left, lh) = build(a, nodes, start, mid);
    let (right, rh) = build(a, nodes, mid, end);
    let digest = a.node(nodes[left].digest(), nodes[right].digest());
    nodes.push(Node::Interior { digest, left, right });
    (nodes.len() - 1, 1 + lh.max(rh))
}

/// Levels of a tree over `leafs` leafs: `ceil(log2(leafs)) + 1`.
fn expected_height(leafs: usize) -> usize {
    leafs.next_power_of_two().trailing_zeros() as usize + 1
}

// Manual impls: derives would demand the same traits from `A`.
impl<A: Algorithm> Clone for MerkleTree<A> {
    fn clone(&self) -> Self {
        MerkleTree {
            nodes: self.nodes.clone(),
            leafs: self.leafs,
            height: self.height,
            _a: PhantomData,
        }
    }
}

impl<A: Algorithm> PartialEq for MerkleTree<A> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl<A: Algorithm> Eq for MerkleTree<A> {}

impl<A: Algorithm> fmt::Debug for MerkleTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("leafs", &self.leafs)
            .field("height", &self.height)
            .field("root", &self.root())
            .finish()
    }
}

/// Prints digests level by level, root first, one line per level.
impl<A: Algorithm> fmt::Display for MerkleTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in self.levels() {
            let mut first = true;
            for n in level {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                write!(f, "{}", self.nodes[n].digest())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
