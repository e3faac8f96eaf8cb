//! Edge-list introspection
//!
//! Pages are dense `u32` indices; the highest index appearing anywhere in
//! the edge list fixes the page count. Duplicate edges collapse to a single
//! link, matching the 0/1 adjacency semantics of the transition matrix.

use rustc_hash::FxHashSet;

/// Number of pages spanned by the edge list: `max index + 1`.
///
/// Every index in `[0, page_count)` is a valid page even if it never appears
/// as a source or target. An empty edge list spans zero pages.
pub fn page_count(edges: &[(u32, u32)]) -> usize {
    edges
        .iter()
        .map(|&(source, target)| source.max(target))
        .max()
        .map_or(0, |max| max as usize + 1)
}

/// Outgoing link count per page, duplicate edges counted once.
pub fn out_degrees(edges: &[(u32, u32)]) -> Vec<u32> {
    let mut degrees = vec![0u32; page_count(edges)];
    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    for &edge in edges {
        if seen.insert(edge) {
            degrees[edge.0 as usize] += 1;
        }
    }
    degrees
}

/// Pages with no outgoing links.
///
/// A dangling page traps the random surfer unless the transition matrix
/// gives it a uniform row, which [`crate::TransitionMatrix`] does.
pub fn dangling_pages(edges: &[(u32, u32)]) -> Vec<u32> {
    out_degrees(edges)
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(page, _)| page as u32)
        .collect()
}
