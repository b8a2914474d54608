//! Various unrelated utilities used internally.

pub use self::sorted_pair::SortedPair;

mod sorted_pair;
