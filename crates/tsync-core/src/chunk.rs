//! Fixed-size slicing of a sequence

/// Number of variables sent in one batch-create or batch-update call
pub const BATCH_SIZE: usize = 100;

/// Split `items` into consecutive slices of at most `size` elements.
///
/// Order is preserved and only the last slice may be shorter. An empty
/// input yields no slices. A `size` of zero is treated as one.
///
/// # Example
///
/// ```
/// use tsync_core::chunk;
///
/// let batches = chunk(&[1, 2, 3, 4, 5], 2);
/// assert_eq!(batches, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn chunk<T>(items: &[T], size: usize) -> Vec<&[T]> {
    items.chunks(size.max(1)).collect()
}

/// Number of batches `count` items split into at [`BATCH_SIZE`]
pub fn batch_count(count: usize) -> usize {
    count.div_ceil(BATCH_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_chunk_empty() {
        let items: Vec<u32> = vec![];
        assert!(chunk(&items, 100).is_empty());
    }

    #[test]
    fn test_chunk_last_slice_shorter() {
        let items: Vec<u32> = (0..250).collect();
        let batches = chunk(&items, 100);
        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(batches[2][0], 200);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(100, 1)]
    #[case(101, 2)]
    #[case(250, 3)]
    fn test_batch_count(#[case] count: usize, #[case] expected: usize) {
        assert_eq!(batch_count(count), expected);
    }

    proptest! {
        #[test]
        fn test_chunk_concatenation_is_identity(items in proptest::collection::vec(any::<u8>(), 0..400), size in 1usize..150) {
            let batches = chunk(&items, size);
            let flattened: Vec<u8> = batches.iter().flat_map(|b| b.iter().copied()).collect();
            prop_assert_eq!(&flattened, &items);
            prop_assert_eq!(batches.len(), items.len().div_ceil(size));
            for batch in batches.iter().take(batches.len().saturating_sub(1)) {
                prop_assert_eq!(batch.len(), size);
            }
        }
    }
}
