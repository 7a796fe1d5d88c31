/// Returns `(a, b)` when `first(&a, &b)` holds, `(b, a)` otherwise
///
/// Mostly used to pick the smaller of two collections before folding one
/// into the other.
#[inline]
pub fn sort_by<F, A>(first: F, a: A, b: A) -> (A, A)
where
    F: FnOnce(&A, &A) -> bool,
{
    if first(&a, &b) {
        (a, b)
    } else {
        (b, a)
    }
}

/// [sort_by] keyed on a length-like measure: the shortest comes first
#[inline]
pub fn shortest_first<A, F>(a: A, b: A, mut len: F) -> (A, A)
where
    F: FnMut(&A) -> usize,
{
    sort_by(|a, b| len(a) <= len(b), a, b)
}
