use std::cmp::PartialOrd;
use std::mem;
use std::ops::Deref;

/// A pair of elements sorted in increasing order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }
}

impl<T: PartialOrd> Deref for SortedPair<T> {
    type Target = (T, T);

    fn deref(&self) -> &(T, T) {
        unsafe { mem::transmute(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::SortedPair;

    #[test]
    fn sorted_pair_reorders_its_elements() {
        assert_eq!(SortedPair::new(2u32, 1u32), SortedPair::new(1u32, 2u32));
        assert_eq!((*SortedPair::new(7u32, 7u32)).0, 7);
        assert_eq!((*SortedPair::new(9u32, 3u32)).0, 3);
        assert_eq!((*SortedPair::new(9u32, 3u32)).1, 9);
    }
}
