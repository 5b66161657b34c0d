//! Iterative edge elimination over the contact graph.
//!
//! Edges are ordered by elimination priority (anchor overlap descending,
//! then contact count ascending), and a cursor walks that order: everything
//! before the cursor is discarded, everything after is retained. Each round
//! discards the weakest surviving tie block of edges, rebuilds connectivity
//! from scratch with a disjoint-set forest, and checks whether the grouping
//! has reached the target count with acceptably balanced sizes.

use indexmap::IndexMap;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

use crate::contacts::Edge;
use crate::union_find::UnionFind;

/// Largest-to-smallest length ratio tolerated over the top `target_groups`
/// groups. Homologous chromosome-scale groups are expected to be of
/// comparable size.
const MAX_LENGTH_RATIO: u64 = 3;

/// Immutable configuration for one partition run.
#[derive(Debug, Clone)]
pub struct PartitionConfig {
    /// Number of chromosome-scale groups to partition into
    pub target_groups: usize,
    /// Safety cap on elimination rounds; `None` bounds the run only by the
    /// edge count
    pub max_rounds: Option<usize>,
}

/// A connected component of the surviving edge subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Member contig indices, ascending
    pub members: Vec<u32>,
    /// Total sequence length of the members
    pub length: u64,
}

/// How a partition run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStatus {
    /// Target group count reached with the size-balance criterion satisfied
    Balanced,
    /// Every edge was discarded without satisfying the balance target
    EdgesExhausted,
    /// The configured round cap fired first
    RoundLimit,
}

/// Result of a partition run: the priority-ordered edge list, how many of
/// its leading edges were discarded, and the final grouping.
#[derive(Debug, Clone)]
pub struct Partition {
    /// All edges in elimination-priority order
    pub edges: Vec<Edge>,
    /// Edges at positions `[0, removed)` were discarded
    pub removed: usize,
    /// Final groups, total length descending
    pub groups: Vec<Group>,
    /// Elimination rounds executed
    pub rounds: usize,
    pub status: PartitionStatus,
}

impl Partition {
    /// The discarded edges, in elimination order
    pub fn removed_edges(&self) -> &[Edge] {
        &self.edges[..self.removed]
    }

    pub fn is_balanced(&self) -> bool {
        self.status == PartitionStatus::Balanced
    }
}

/// Partition contigs into groups by eliminating contact edges until the
/// grouping meets `config.target_groups` with balanced sizes.
///
/// `lengths` holds the sequence length per contig index and defines the
/// index space; edges must reference indices below `lengths.len()`.
pub fn partition(mut edges: Vec<Edge>, lengths: &[u64], config: &PartitionConfig) -> Partition {
    // Elimination priority: probable allelic redundancy first, then weakest
    // signal. The sort is stable over the canonical pair order, which pins
    // down every tie.
    edges.sort_by_key(|e| (Reverse(OrderedFloat(e.overlap)), e.count));

    let n = lengths.len();
    let total = edges.len();

    let mut groups = components(&edges, n, lengths);
    info!("initial groups: {}, edges: {}", groups.len(), total);

    if satisfied(&groups, config.target_groups) {
        // Nothing to eliminate: the fully merged grouping already meets the
        // target.
        return Partition {
            edges,
            removed: 0,
            groups,
            rounds: 0,
            status: PartitionStatus::Balanced,
        };
    }

    // Edges with positive overlap are the first candidates for removal:
    // they look like cross-allele contamination, not adjacency signal. The
    // grouping is evaluated once with exactly that prefix discarded before
    // any contact-strength block is touched.
    let mut cursor = edges.iter().filter(|e| e.overlap > 0.0).count();
    let mut rounds = 0;

    if cursor > 0 {
        info!("removed {cursor} redundancy edges");
        rounds += 1;
        groups = components(&edges[cursor..], n, lengths);
        if satisfied(&groups, config.target_groups) {
            return Partition {
                edges,
                removed: cursor,
                groups,
                rounds,
                status: PartitionStatus::Balanced,
            };
        }
    }

    let status = loop {
        if let Some(cap) = config.max_rounds {
            if rounds >= cap {
                warn!("round cap {cap} reached before balance target");
                break PartitionStatus::RoundLimit;
            }
        }
        if cursor >= total {
            warn!(
                "could not satisfy balance target: all {total} edges discarded, \
                 {n} singleton groups remain"
            );
            break PartitionStatus::EdgesExhausted;
        }
        rounds += 1;

        // Discard the whole tie block at the cursor: equally weak edges are
        // never split.
        let weakest = edges[cursor].count;
        while cursor < total && edges[cursor].count == weakest {
            cursor += 1;
        }

        groups = components(&edges[cursor..], n, lengths);
        debug!(
            "round {rounds}: groups {}, removed edges {cursor}",
            groups.len()
        );

        if satisfied(&groups, config.target_groups) {
            break PartitionStatus::Balanced;
        }
        if cursor >= total {
            warn!(
                "could not satisfy balance target: all {total} edges discarded, \
                 {n} singleton groups remain"
            );
            break PartitionStatus::EdgesExhausted;
        }

        cursor += 1;
    };

    Partition {
        edges,
        removed: cursor.min(total),
        groups,
        rounds,
        status,
    }
}

/// Stopping predicate: enough groups, and the top `target` of them within
/// the tolerated length spread.
fn satisfied(groups: &[Group], target: usize) -> bool {
    if groups.len() < target || target == 0 {
        return false;
    }
    // Groups are length-descending, so the extremes of the top `target` are
    // its first and last entries.
    let max_len = groups[0].length;
    let min_len = groups[target - 1].length;
    max_len <= MAX_LENGTH_RATIO * min_len
}

/// Connectivity under the given edge subset, rebuilt from scratch: groups in
/// total-length-descending order (ties by smallest member index), members
/// ascending.
fn components(edges: &[Edge], n: usize, lengths: &[u64]) -> Vec<Group> {
    let mut forest = UnionFind::new(n);
    for e in edges {
        forest.union(e.i as usize, e.j as usize);
    }

    // IndexMap keeps first-seen root order, making group materialization
    // deterministic before the length sort is applied.
    let mut by_root: IndexMap<usize, Group> = IndexMap::new();
    for idx in 0..n {
        let root = forest.find(idx);
        let group = by_root.entry(root).or_insert_with(|| Group {
            members: Vec::new(),
            length: 0,
        });
        group.members.push(idx as u32);
        group.length += lengths[idx];
    }

    let mut groups: Vec<Group> = by_root.into_values().collect();
    groups.sort_by(|a, b| {
        b.length
            .cmp(&a.length)
            .then_with(|| a.members[0].cmp(&b.members[0]))
    });
    groups
}
