//! Property tests over arbitrary operation sequences.

use contig::prelude::*;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(u16),
    Pop,
    Reserve(usize),
    Clear,
    Truncate(usize),
    Assign(usize, u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<u16>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        1 => (0usize..128).prop_map(Op::Reserve),
        1 => Just(Op::Clear),
        1 => (0usize..64).prop_map(Op::Truncate),
        2 => (0usize..64, any::<u16>()).prop_map(|(i, v)| Op::Assign(i, v)),
    ]
}

proptest! {
    #[test]
    fn size_never_exceeds_capacity(ops in proptest::collection::vec(op(), 0..300)) {
        let mut a = DynArray::new();
        for op in ops {
            match op {
                Op::Push(v) => a.push_back(v),
                Op::Pop => { a.pop_back(); }
                Op::Reserve(n) => a.reserve(n),
                Op::Clear => a.clear(),
                Op::Truncate(n) => a.truncate(n),
                Op::Assign(i, v) => {
                    if let Ok(slot) = a.at_mut(i) {
                        *slot = v;
                    }
                }
            }
            prop_assert!(a.size() <= a.capacity());
            prop_assert_eq!(a.empty(), a.size() == 0);
        }
    }

    #[test]
    fn at_rejects_every_index_past_the_end(
        len in 0usize..64,
        extra in prop_oneof![0usize..16, Just(usize::MAX - 64)],
    ) {
        let a: DynArray<usize> = (0..len).collect();
        let index = len + extra;
        prop_assert_eq!(a.at(index), Err(ArrayError::OutOfRange { index, len }));
        for i in 0..len {
            prop_assert_eq!(a.at(i), Ok(&a[i]));
        }
    }

    #[test]
    fn cursor_traversal_matches_slice(values in proptest::collection::vec(any::<i64>(), 0..100)) {
        let a = DynArray::from(values.as_slice());
        prop_assert_eq!(a.end() - a.begin(), a.size() as isize);
        let mut c = a.begin();
        let mut seen = Vec::with_capacity(values.len());
        while c != a.end() {
            seen.push(*c.get(&a).unwrap());
            c.advance();
        }
        prop_assert_eq!(seen, values);
    }

    #[test]
    fn clear_preserves_capacity_and_refill_does_not_reallocate(n in 1usize..200) {
        let mut a: DynArray<usize> = DynArray::new();
        for i in 0..n {
            a.push_back(i);
        }
        let capacity = a.capacity();
        let reallocations = a.stats().reallocations;
        a.clear();
        prop_assert_eq!(a.size(), 0);
        prop_assert_eq!(a.capacity(), capacity);
        for i in 0..n {
            a.push_back(i);
        }
        prop_assert_eq!(a.stats().reallocations, reallocations);
    }

    #[test]
    fn equality_tracks_push_sequences(
        values in proptest::collection::vec(any::<u8>(), 0..50),
        extra in any::<u8>(),
    ) {
        let mut x: DynArray<u8> = values.iter().copied().collect();
        let y: DynArray<u8> = values.iter().copied().collect();
        prop_assert_eq!(&x, &y);
        x.push_back(extra);
        prop_assert_ne!(&x, &y);
    }

    #[test]
    fn growth_is_amortized(n in 1usize..20_000) {
        let mut a = DynArray::new();
        for i in 0..n {
            a.push_back(i as u32);
        }
        let stats = a.stats();
        // ceil(log2 n) + 1 buffers under doubling.
        let bound = u64::from(usize::BITS - (n - 1).leading_zeros()) + 1;
        prop_assert_eq!(stats.reallocations, bound);
        prop_assert!(stats.elements_moved < 2 * n as u64);
    }

    #[test]
    fn capped_arrays_fail_without_mutation(limit in 1usize..64, pushes in 0usize..128) {
        let mut a = DynArray::with_config(ArrayConfig::new().with_max_capacity(limit));
        for i in 0..pushes {
            let before = (a.size(), a.capacity(), a.generation());
            match a.try_push_back(i) {
                Ok(()) => {
                    prop_assert!(i < limit);
                }
                Err(err) => {
                    prop_assert!(err.is_alloc_failure());
                    prop_assert_eq!((a.size(), a.capacity(), a.generation()), before);
                }
            }
        }
        prop_assert_eq!(a.size(), pushes.min(limit));
        prop_assert!(a.capacity() <= limit);
        let expected: Vec<usize> = (0..pushes.min(limit)).collect();
        prop_assert_eq!(a.as_slice(), expected.as_slice());
    }
}
