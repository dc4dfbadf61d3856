//! Joining staged chunks into one buffer.

/// Concatenates a list of byte chunks into a new vector, allocating once.
///
/// # Example
///
/// ```
/// use ubjson_buffers::concat_list;
///
/// let chunks = vec![b"a\x02".to_vec(), b"B\x01".to_vec(), b"B\x02".to_vec()];
/// assert_eq!(concat_list(&chunks), b"a\x02B\x01B\x02");
/// ```
pub fn concat_list<T: AsRef<[u8]>>(list: &[T]) -> Vec<u8> {
    let total: usize = list.iter().map(|chunk| chunk.as_ref().len()).sum();
    let mut res = Vec::with_capacity(total);
    for chunk in list {
        res.extend_from_slice(chunk.as_ref());
    }
    res
}
