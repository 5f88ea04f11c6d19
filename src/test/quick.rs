use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Remove the K from the data structure
    Remove(K),
    /// Compare iterators
    Iter,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are twice as likely as
    /// removals so trees get deep enough to need rotations.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]) {
            Some(0) => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            Some(1) => Op::Remove(K::arbitrary(g)),
            _ => Op::Iter,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Insert(k, v) => {
                let v = v.clone();
                Box::new(k.shrink().map(move |k| Op::Insert(k, v.clone())))
            }
            Op::Remove(k) => Box::new(k.shrink().map(Op::Remove)),
            Op::Iter => Box::new(std::iter::empty()),
        }
    }
}
