//! Incremental web graph builder
//!
//! Callers usually hold page URLs rather than pre-assigned integer IDs.
//! The builder interns URLs to dense `u32` IDs with FxHashMap for O(1)
//! lookups and accumulates the directed edge list the ranking core consumes.

use rustc_hash::FxHashMap;

/// A mutable web graph builder optimized for incremental construction.
///
/// Pages are assigned IDs in first-seen order. Links are directed; repeated
/// links and self-links are kept as-is, since the transition matrix treats
/// duplicate edges idempotently.
#[derive(Debug, Default)]
pub struct WebGraphBuilder {
    /// Maps URL -> page ID
    url_to_id: FxHashMap<String, u32>,
    /// Page storage, indexed by ID
    urls: Vec<String>,
    /// Directed links accumulated so far
    edges: Vec<(u32, u32)>,
}

impl WebGraphBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with pre-allocated page capacity
    pub fn with_capacity(page_capacity: usize) -> Self {
        Self {
            url_to_id: FxHashMap::with_capacity_and_hasher(page_capacity, Default::default()),
            urls: Vec::with_capacity(page_capacity),
            edges: Vec::new(),
        }
    }

    /// Get or create the page for the given URL, returning its ID
    pub fn get_or_create_page(&mut self, url: &str) -> u32 {
        if let Some(&id) = self.url_to_id.get(url) {
            return id;
        }

        let id = self.urls.len() as u32;
        self.url_to_id.insert(url.to_string(), id);
        self.urls.push(url.to_string());
        id
    }

    /// Record a directed link between two page IDs
    ///
    /// IDs normally come from [`Self::get_or_create_page`]. An ID beyond the
    /// interned pages is not rejected: the ranking core treats every index up
    /// to the largest one seen as a valid page.
    pub fn add_link(&mut self, from: u32, to: u32) {
        self.edges.push((from, to));
    }

    /// Record a directed link between two URLs, interning them as needed
    ///
    /// Returns the (from, to) page IDs.
    pub fn link_pages(&mut self, from_url: &str, to_url: &str) -> (u32, u32) {
        let from = self.get_or_create_page(from_url);
        let to = self.get_or_create_page(to_url);
        self.edges.push((from, to));
        (from, to)
    }

    /// Number of interned pages
    ///
    /// Note that the ranking core derives its page count from the edge list,
    /// so a page interned here but never linked in either direction does not
    /// participate in ranking.
    pub fn page_count(&self) -> usize {
        self.urls.len()
    }

    /// Number of recorded links, duplicates included
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get the URL for a page ID
    pub fn page(&self, id: u32) -> Option<&str> {
        self.urls.get(id as usize).map(String::as_str)
    }

    /// Get the page ID for a URL
    pub fn page_id(&self, url: &str) -> Option<u32> {
        self.url_to_id.get(url).copied()
    }

    /// Iterate over all interned pages
    pub fn pages(&self) -> impl Iterator<Item = (u32, &str)> {
        self.urls
            .iter()
            .enumerate()
            .map(|(id, url)| (id as u32, url.as_str()))
    }

    /// Check if the builder holds no pages
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// The accumulated edge list
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Consume the builder, keeping only the edge list
    pub fn into_edges(self) -> Vec<(u32, u32)> {
        self.edges
    }
}
