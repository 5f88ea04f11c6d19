#[macro_use]
extern crate quickcheck_macros;

use quickcheck::{Arbitrary, Gen};

mod tree;

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Clone, Debug)]
pub(crate) enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Remove the K from the data structure
    Remove(K),
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) || bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g), V::arbitrary(g))
        } else {
            Op::Remove(K::arbitrary(g))
        }
    }
}
