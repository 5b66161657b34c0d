/// Scenario tests for the elimination engine.
use pretty_assertions::assert_eq;

use hicpart::contacts::Edge;
use hicpart::partition::{partition, PartitionConfig, PartitionStatus};

fn edge(i: u32, j: u32, count: u32, overlap: f64) -> Edge {
    Edge { i, j, count, overlap }
}

fn config(target: usize) -> PartitionConfig {
    PartitionConfig {
        target_groups: target,
        max_rounds: None,
    }
}

fn member_sets(result: &hicpart::partition::Partition) -> Vec<Vec<u32>> {
    result.groups.iter().map(|g| g.members.clone()).collect()
}

#[test]
fn six_contig_scenario_stops_after_redundancy_edges() {
    // Three true pairs chained by two cross-allele edges. The overlap-0.9
    // edges go first; the grouping is balanced as soon as they are gone.
    let lengths = vec![100, 100, 100, 100, 100, 100];
    let edges = vec![
        edge(0, 1, 50, 0.0),
        edge(2, 3, 50, 0.0),
        edge(4, 5, 50, 0.0),
        edge(1, 2, 5, 0.9),
        edge(3, 4, 5, 0.9),
    ];

    let result = partition(edges, &lengths, &config(3));

    assert_eq!(result.status, PartitionStatus::Balanced);
    assert_eq!(result.removed, 2);
    assert_eq!(result.groups.len(), 3);
    for group in &result.groups {
        assert_eq!(group.length, 200);
    }
    assert_eq!(
        member_sets(&result),
        vec![vec![0, 1], vec![2, 3], vec![4, 5]]
    );

    // The discarded set is exactly the redundancy edges, weakest-signal
    // first within the tie.
    let removed: Vec<(u32, u32)> = result.removed_edges().iter().map(|e| (e.i, e.j)).collect();
    assert_eq!(removed, vec![(1, 2), (3, 4)]);
}

#[test]
fn balanced_baseline_returns_without_elimination() {
    let lengths = vec![100, 100, 100, 100];
    let edges = vec![edge(0, 1, 40, 0.0), edge(2, 3, 30, 0.1)];

    let result = partition(edges, &lengths, &config(2));

    assert_eq!(result.status, PartitionStatus::Balanced);
    assert_eq!(result.removed, 0);
    assert_eq!(result.rounds, 0);
    assert_eq!(member_sets(&result), vec![vec![0, 1], vec![2, 3]]);
}

#[test]
fn target_beyond_contig_count_is_surfaced_as_exhaustion() {
    let lengths = vec![100, 100, 100];
    let edges = vec![edge(0, 1, 40, 0.0), edge(1, 2, 40, 0.0)];

    let result = partition(edges, &lengths, &config(5));

    assert_eq!(result.status, PartitionStatus::EdgesExhausted);
    // Every edge ends up discarded; every contig is a singleton.
    assert_eq!(result.removed, 2);
    assert_eq!(result.groups.len(), 3);
}

#[test]
fn empty_edge_list_with_unreachable_target_fails() {
    let lengths = vec![100, 100];
    let result = partition(Vec::new(), &lengths, &config(3));

    assert_eq!(result.status, PartitionStatus::EdgesExhausted);
    assert_eq!(result.removed, 0);
    assert_eq!(result.groups.len(), 2);
}

#[test]
fn singletons_can_satisfy_a_reachable_target() {
    // With no edges at all, the baseline is already n singleton groups.
    let lengths = vec![100, 110, 120];
    let result = partition(Vec::new(), &lengths, &config(3));

    assert_eq!(result.status, PartitionStatus::Balanced);
    assert_eq!(result.removed, 0);
    assert_eq!(result.groups.len(), 3);
}

#[test]
fn tie_blocks_are_discarded_atomically() {
    // Two count-10 edges chain the pairs together. Eliminating one without
    // the other would be an arbitrary choice; both must go in one round.
    let lengths = vec![100; 6];
    let edges = vec![
        edge(0, 1, 50, 0.0),
        edge(2, 3, 50, 0.0),
        edge(4, 5, 50, 0.0),
        edge(1, 2, 10, 0.0),
        edge(3, 4, 10, 0.0),
    ];

    let result = partition(edges, &lengths, &config(3));

    assert_eq!(result.status, PartitionStatus::Balanced);
    assert_eq!(result.removed, 2);
    let removed: Vec<u32> = result.removed_edges().iter().map(|e| e.count).collect();
    assert_eq!(removed, vec![10, 10]);
    assert_eq!(
        member_sets(&result),
        vec![vec![0, 1], vec![2, 3], vec![4, 5]]
    );
}

#[test]
fn unbalanced_groups_force_further_elimination() {
    // Splitting off the chain edge leaves a 2000 vs 200 spread, which fails
    // the 3:1 tolerance, so elimination continues into the stronger blocks
    // until the top groups even out (here, all the way to singletons).
    let lengths = vec![1000, 1000, 100, 100];
    let edges = vec![
        edge(0, 1, 80, 0.0),
        edge(2, 3, 60, 0.0),
        edge(1, 2, 12, 0.0),
    ];

    let result = partition(edges, &lengths, &config(2));

    assert_eq!(result.status, PartitionStatus::Balanced);
    assert_eq!(result.removed, 3);
    assert_eq!(result.groups.len(), 4);
    let group_lengths: Vec<u64> = result.groups.iter().map(|g| g.length).collect();
    assert_eq!(group_lengths, vec![1000, 1000, 100, 100]);
}

#[test]
fn elimination_proceeds_to_a_balanced_split() {
    let lengths = vec![500, 500, 400, 400];
    let edges = vec![
        edge(0, 1, 80, 0.0),
        edge(2, 3, 60, 0.0),
        edge(1, 2, 12, 0.0),
    ];

    let result = partition(edges, &lengths, &config(2));

    assert_eq!(result.status, PartitionStatus::Balanced);
    assert_eq!(result.removed, 1);
    assert_eq!((result.removed_edges()[0].i, result.removed_edges()[0].j), (1, 2));
    assert_eq!(member_sets(&result), vec![vec![0, 1], vec![2, 3]]);
}

#[test]
fn runs_are_deterministic_on_identical_input() {
    let lengths = vec![300, 120, 250, 260, 110, 290];
    let edges = vec![
        edge(0, 1, 15, 0.4),
        edge(0, 2, 44, 0.0),
        edge(1, 3, 15, 0.4),
        edge(2, 4, 11, 0.0),
        edge(3, 5, 44, 0.0),
        edge(1, 4, 27, 0.0),
    ];

    let first = partition(edges.clone(), &lengths, &config(3));
    let second = partition(edges, &lengths, &config(3));

    assert_eq!(first.status, second.status);
    assert_eq!(first.removed, second.removed);
    assert_eq!(first.rounds, second.rounds);
    assert_eq!(first.removed_edges(), second.removed_edges());
    assert_eq!(first.groups, second.groups);
}

#[test]
fn round_cap_is_surfaced() {
    let lengths = vec![1000, 1000, 100, 100];
    let edges = vec![
        edge(0, 1, 80, 0.0),
        edge(2, 3, 60, 0.0),
        edge(1, 2, 12, 0.0),
    ];
    let config = PartitionConfig {
        target_groups: 2,
        max_rounds: Some(1),
    };

    let result = partition(edges, &lengths, &config);
    assert_eq!(result.status, PartitionStatus::RoundLimit);
    assert_eq!(result.rounds, 1);
}

#[test]
fn groups_are_ordered_by_total_length() {
    let lengths = vec![300, 300, 400, 500, 400];
    let edges = vec![edge(0, 1, 20, 0.0), edge(2, 3, 20, 0.0)];

    let result = partition(edges, &lengths, &config(3));

    assert_eq!(result.status, PartitionStatus::Balanced);
    let group_lengths: Vec<u64> = result.groups.iter().map(|g| g.length).collect();
    assert_eq!(group_lengths, vec![900, 600, 400]);
    assert_eq!(member_sets(&result), vec![vec![2, 3], vec![0, 1], vec![4]]);
}
