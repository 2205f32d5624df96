//! # Online inversion counting with an order-statistics AVL tree
//!
//! `avl-inversions` counts the inversions in a sequence of `i32` priorities:
//! pairs of positions `i < j` where `values[i] > values[j]`.  Each inversion
//! costs a fine of [`FINE_PER_INVERSION`].  Equal priorities never cost
//! anything.
//!
//! The count is built up while the values are inserted into an AVL tree whose
//! nodes also record their subtree sizes (see [`OrderStatisticTree`]), so a
//! single pass over the input is enough and the whole computation is
//! `O(n log n)`.
//!
//! ```
//! use avl_inversions::{count_inversions, inversion_count};
//!
//! assert_eq!(inversion_count(&[5, 4, 3, 2, 1]), 10);
//! assert_eq!(count_inversions(&[5, 4, 3, 2, 1]), 1000);
//! assert_eq!(count_inversions(&[0, 2, 3, 5, 8, 8, 13]), 0);
//! ```

mod logging;

mod avl;
pub use avl::OrderStatisticTree;

/// The fine charged for each inversion.
pub const FINE_PER_INVERSION: i64 = 100;

/// Returns the total fine for `values`: the number of inversions times
/// [`FINE_PER_INVERSION`].
///
/// An empty slice costs nothing.
pub fn count_inversions(values: &[i32]) -> i64 {
    let tree: OrderStatisticTree = values.iter().copied().collect();
    let fines = tree.fines();
    logging::debug!(
        len = values.len(),
        inversions = tree.inversions(),
        fines,
        "counted inversions"
    );
    fines
}

/// Returns the number of inversions in `values`, without pricing them.
pub fn inversion_count(values: &[i32]) -> u64 {
    let tree: OrderStatisticTree = values.iter().copied().collect();
    tree.inversions()
}
