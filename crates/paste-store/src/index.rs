use std::collections::BTreeSet;

use paste_types::{FullId, ShortId};

/// Sorted set of stored ids with prefix lookup.
///
/// `FullId` ordering matches its hex ordering, so every id carrying a given
/// short id sits in one contiguous run starting at
/// [`ShortId::lower_bound`]. Lookups are a range scan over that run instead
/// of a pass over the whole key space.
#[derive(Debug, Default, Clone)]
pub struct PrefixIndex {
    ids: BTreeSet<FullId>,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`. Returns `true` if it was not already indexed.
    pub fn insert(&mut self, id: FullId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &FullId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Every indexed id starting with `short`, in ascending order.
    pub fn matches(&self, short: &ShortId) -> Vec<FullId> {
        self.ids
            .range(short.lower_bound()..)
            .take_while(|id| id.starts_with(short))
            .copied()
            .collect()
    }

    /// All indexed ids, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &FullId> {
        self.ids.iter()
    }
}

impl FromIterator<FullId> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = FullId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(hex_prefix: &str) -> FullId {
        let hex = format!("{hex_prefix:0<64}");
        FullId::from_hex(&hex).unwrap()
    }

    fn short(s: &str) -> ShortId {
        ShortId::from_hex(s).unwrap()
    }

    #[test]
    fn matches_contiguous_run() {
        let index: PrefixIndex = [
            id("aaaaaaaa1"),
            id("aaaaaaab"),
            id("aaaaaaaa2"),
            id("aaaaaaa9ff"),
            id("bbbbbbbb"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            index.matches(&short("aaaaaaaa")),
            vec![id("aaaaaaaa1"), id("aaaaaaaa2")]
        );
        assert_eq!(index.matches(&short("bbbbbbbb")), vec![id("bbbbbbbb")]);
        assert!(index.matches(&short("cccccccc")).is_empty());
    }

    #[test]
    fn lower_bound_id_itself_matches() {
        let mut index = PrefixIndex::new();
        index.insert(short("12345678").lower_bound());
        assert_eq!(index.matches(&short("12345678")).len(), 1);
    }

    #[test]
    fn highest_prefix_does_not_overflow() {
        let mut index = PrefixIndex::new();
        index.insert(id(&"f".repeat(64)));
        assert_eq!(index.matches(&short("ffffffff")).len(), 1);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut index = PrefixIndex::new();
        assert!(index.is_empty());
        assert!(index.insert(id("01")));
        assert!(!index.insert(id("01")));
        assert!(index.contains(&id("01")));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn iter_is_sorted() {
        let index: PrefixIndex = [id("c"), id("a"), id("b")].into_iter().collect();
        let ids: Vec<_> = index.iter().copied().collect();
        assert_eq!(ids, vec![id("a"), id("b"), id("c")]);
    }
}
