#![warn(missing_docs)]
use std::fmt::{Debug, Formatter};

use crate::logging::trace;
use crate::FINE_PER_INVERSION;

type OptNode = Option<Box<Node>>;

// Number of previously inserted keys found to be strictly greater than the key
// being inserted.
struct Inversions(u64);

macro_rules! chk_tree {
    ( $x:expr ) => {{
        let t = $x;
        let (chk_len, _) = chk(&t.root, None, None);
        assert_eq!(chk_len, t.len());
        t
    }};
}

// Nodes are ordered by descending priority: everything in `left` is >= key and
// everything in `right` is <= key.  Inserts send equal keys left, but a
// rotation over a run of ties can move one of them to the right side.
struct Node {
    key: i32,
    ht: i8,
    len: usize,
    left: OptNode,
    right: OptNode,
}

impl Node {
    fn new(key: i32) -> Self {
        Node {
            key,
            ht: 1,
            len: 1,
            left: None,
            right: None,
        }
    }

    // Returns the "balance factor" of the node
    fn bal(&self) -> i8 {
        height(&self.left) - height(&self.right)
    }

    // Is the given node balanced, that is -1 <= self.bal() <= 1 ?
    fn is_bal(&self) -> bool {
        // single-branch range inclusion check; requires unsigned wrap around
        ((self.bal() + 1) as u8) <= 2
    }

    // Recomputes the height and subtree size from the children.
    fn update(&mut self) {
        self.ht = height(&self.left).max(height(&self.right)) + 1;
        self.len = len(&self.left) + len(&self.right) + 1;
    }

    // Cheap checks of the node's own bookkeeping, run in debug builds only.
    fn debug_chk(&self) {
        debug_assert!(self.is_bal(), "unbalanced at key {}", self.key);
        debug_assert_eq!(
            self.ht,
            height(&self.left).max(height(&self.right)) + 1
        );
        debug_assert_eq!(self.len, len(&self.left) + len(&self.right) + 1);
    }

    fn chk(&self, lo: Option<i32>, hi: Option<i32>) -> (usize, i8) {
        // is our node in order with its ancestors?
        assert!(lo.iter().all(|&m| m <= self.key));
        assert!(hi.iter().all(|&m| self.key <= m));

        // are we balanced?
        assert!(self.is_bal());

        // left keys are >= ours, right keys are <= ours
        let (lf_len, lf_ht) = chk(&self.left, Some(self.key), hi);
        let (rt_len, rt_ht) = chk(&self.right, lo, Some(self.key));

        // do we know our height and size?
        assert_eq!(self.ht, lf_ht.max(rt_ht) + 1);
        assert_eq!(self.len, lf_len + rt_len + 1);

        (self.len, self.ht)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "(ht: {} #{} {{{}}} ",
            self.ht, self.len, self.key
        ))?;

        match &self.left {
            None => f.write_str(".")?,
            Some(lf) => lf.fmt(f)?,
        }

        f.write_str(" ")?;

        match &self.right {
            None => f.write_str(".")?,
            Some(rt) => rt.fmt(f)?,
        }

        f.write_str(")")
    }
}

fn height(opt_node: &OptNode) -> i8 {
    opt_node.as_ref().map_or(0, |n| n.ht)
}

fn len(opt_node: &OptNode) -> usize {
    opt_node.as_ref().map_or(0, |n| n.len)
}

// Walks the subtree asserting every structural invariant.  Keys must lie in
// the inclusive range [lo, hi].  Returns the subtree's size and height.
fn chk(opt_node: &OptNode, lo: Option<i32>, hi: Option<i32>) -> (usize, i8) {
    match opt_node.as_ref() {
        None => (0, 0),
        Some(n) => n.chk(lo, hi),
    }
}

fn rot_rt(mut a: Box<Node>) -> Box<Node> {
    // We want the following transformation:
    //    a(b(x, y), z)   =>   b(x, a(y, z))
    // x and z retain the same parents.

    let mut b = a.left.take().expect("rotation toward missing child");

    trace!(old_root = a.key, new_root = b.key, "rotate right");

    // move y from b to a
    a.left = b.right.take();
    a.update();

    // move a into b
    b.right = Some(a);
    b.update();

    b
}

fn rot_lf(mut a: Box<Node>) -> Box<Node> {
    // We want the following transformation:
    //    a(x, b(y, z))   =>   b(a(x, y), z)
    // x and z retain the same parents.

    let mut b = a.right.take().expect("rotation toward missing child");

    trace!(old_root = a.key, new_root = b.key, "rotate left");

    // move y from b to a
    a.right = b.left.take();
    a.update();

    // make a be b's left child
    b.left = Some(a);
    b.update();

    b
}

// Restores the AVL property at n, whose children are already balanced and
// whose own height and size are current.  At most one single or double
// rotation is performed.
fn rebal(mut n: Box<Node>) -> Box<Node> {
    let bal = n.bal();

    let n = if bal > 1 {
        // left-right case: straighten the left child first
        if n.left.as_ref().map_or(0, |lf| lf.bal()) < 0 {
            n.left = n.left.take().map(rot_lf);
        }
        rot_rt(n)
    } else if bal < -1 {
        // right-left case
        if n.right.as_ref().map_or(0, |rt| rt.bal()) > 0 {
            n.right = n.right.take().map(rot_rt);
        }
        rot_lf(n)
    } else {
        n
    };

    n.debug_chk();
    n
}

// Inserts k into the tree rooted at opt_node.  Returns the new root of the
// subtree and the number of keys already in it that are strictly greater
// than k.
fn ins(opt_node: OptNode, k: i32) -> (Box<Node>, Inversions) {
    let mut n = match opt_node {
        None => return (Box::new(Node::new(k)), Inversions(0)),
        Some(n) => n,
    };

    let found = if k >= n.key {
        // ties go left and are never counted
        let (lf, found) = ins(n.left.take(), k);
        n.left = Some(lf);
        found
    } else {
        // n and its whole left side are greater than k
        let here = len(&n.left) as u64 + 1;
        let (rt, Inversions(below)) = ins(n.right.take(), k);
        n.right = Some(rt);
        Inversions(here + below)
    };

    n.update();
    (rebal(n), found)
}

/// An AVL tree of `i32` priorities that counts inversions as it grows.
///
/// Every node records the size of its subtree, so at each insertion the tree
/// knows how many earlier priorities were strictly greater than the new one.
/// The running sum of those counts is the number of inversions in the
/// insertion sequence: pairs of positions `i < j` with `values[i] >
/// values[j]`.  Equal priorities never form an inversion.
///
/// The tree only grows.  There is no removal, lookup, or iteration.
///
/// # Examples
/// ```
/// use avl_inversions::OrderStatisticTree;
///
/// let mut t = OrderStatisticTree::new();
/// assert_eq!(t.insert(3), 0);
/// assert_eq!(t.insert(1), 1);
/// assert_eq!(t.insert(2), 1);
/// assert_eq!(t.inversions(), 2);
/// assert_eq!(t.fines(), 200);
/// ```
#[derive(Default)]
pub struct OrderStatisticTree {
    root: OptNode,
    inversions: u64,
}

impl OrderStatisticTree {
    /// Creates a new, empty tree.
    /// # Examples
    /// ```
    /// use avl_inversions::OrderStatisticTree;
    /// let t = OrderStatisticTree::new();
    /// assert!(t.is_empty());
    /// assert_eq!(t.inversions(), 0);
    /// ```
    pub fn new() -> Self {
        OrderStatisticTree {
            root: None,
            inversions: 0,
        }
    }

    /// Inserts a priority and returns how many previously inserted priorities
    /// are strictly greater than it.  That count is also added to the running
    /// total reported by [`inversions`](#method.inversions).
    ///
    /// Duplicates are kept: inserting the same priority twice adds two nodes.
    pub fn insert(&mut self, key: i32) -> u64 {
        let (root, Inversions(found)) = ins(self.root.take(), key);
        self.root = Some(root);
        self.inversions += found;
        found
    }

    /// Returns the number of inversions among the priorities inserted so far.
    pub fn inversions(&self) -> u64 {
        self.inversions
    }

    /// Returns the inversion count priced at [`FINE_PER_INVERSION`] each.
    ///
    /// Saturates at `i64::MAX`.
    pub fn fines(&self) -> i64 {
        i64::try_from(self.inversions)
            .unwrap_or(i64::MAX)
            .saturating_mul(FINE_PER_INVERSION)
    }

    /// Returns the number of priorities inserted, duplicates included.
    pub fn len(&self) -> usize {
        len(&self.root)
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree counted in nodes; 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    /// Asserts the tree's structural invariants, panicking on the first one
    /// that fails: keys non-increasing in order, AVL balance, and stored
    /// heights and sizes.  This walks the whole tree; it is meant for tests.
    #[doc(hidden)]
    pub fn chk(&self) {
        chk_tree!(self);
    }
}

impl Debug for OrderStatisticTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            None => f.write_str("OrderStatisticTree(EMPTY)"),
            Some(n) => {
                // use Node's Debug formatter
                f.write_fmt(format_args!(
                    "OrderStatisticTree(inv: {}, {:?})",
                    self.inversions, n
                ))
            }
        }
    }
}

impl Extend<i32> for OrderStatisticTree {
    fn extend<T: IntoIterator<Item = i32>>(&mut self, iter: T) {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<'a> Extend<&'a i32> for OrderStatisticTree {
    fn extend<T: IntoIterator<Item = &'a i32>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied());
    }
}

impl FromIterator<i32> for OrderStatisticTree {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        let mut t = OrderStatisticTree::new();
        t.extend(iter);
        t
    }
}
