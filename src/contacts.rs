use std::collections::HashMap;

use crate::anchors::AnchorSets;

/// Pairs observed fewer times than this never materialize as edges.
pub const MIN_CONTACT_COUNT: u32 = 10;

/// One edge of the contact graph: an unordered contig pair in canonical form
/// (`i < j`), its read-pair contact count, and its anchor-overlap ratio.
/// Immutable once computed; the partition engine only decides which edges
/// survive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub i: u32,
    pub j: u32,
    pub count: u32,
    pub overlap: f64,
}

/// Symmetric contact counts between contig pairs.
///
/// Counts are stored under the canonical ordered pair only, so the tallies
/// are identical regardless of which contig a record names first.
#[derive(Debug, Clone)]
pub struct ContactMap {
    contig_count: usize,
    counts: HashMap<(u32, u32), u32>,
}

impl ContactMap {
    pub fn new(contig_count: usize) -> Self {
        ContactMap {
            contig_count,
            counts: HashMap::new(),
        }
    }

    /// Record one observed linkage between two contigs. Self-pairs are
    /// discarded silently (defined behavior, not an error).
    pub fn record(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        debug_assert!((a as usize) < self.contig_count && (b as usize) < self.contig_count);

        let key = if a < b { (a, b) } else { (b, a) };
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Contact count currently tallied for a pair
    pub fn count(&self, a: u32, b: u32) -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct pairs observed at least once
    pub fn pair_count(&self) -> usize {
        self.counts.len()
    }

    pub fn contig_count(&self) -> usize {
        self.contig_count
    }

    /// Materialize the edge list: one edge per pair with count ≥
    /// [`MIN_CONTACT_COUNT`], scored against the anchor sets, in canonical
    /// pair order.
    pub fn into_edges(self, anchors: &AnchorSets) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .counts
            .into_iter()
            .filter(|&(_, count)| count >= MIN_CONTACT_COUNT)
            .map(|((i, j), count)| Edge {
                i,
                j,
                count,
                overlap: anchors.overlap_ratio(i, j),
            })
            .collect();

        edges.sort_by_key(|e| (e.i, e.j));
        edges
    }
}
