//! Set comparisons over identifier lists
use std::collections::HashSet;
use std::hash::Hash;

/// Whether every element of each collection is also in the other
///
/// Multiplicity and order are ignored, so this is set equality.
pub(crate) fn mutually_inclusive<'a, T, A, B>(one: A, two: B) -> bool
where
    T: Eq + Hash + 'a + ?Sized,
    A: IntoIterator<Item = &'a T>,
    B: IntoIterator<Item = &'a T>,
{
    let one: HashSet<&T> = one.into_iter().collect();
    let two: HashSet<&T> = two.into_iter().collect();
    one == two
}

/// Unique elements in order of first appearance
pub(crate) fn collect_unique<T: Eq + Hash + Clone>(elements: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    elements
        .into_iter()
        .filter(|e| seen.insert(e.clone()))
        .collect()
}
