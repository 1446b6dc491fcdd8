//! Property tests: name normalization, graph building, cycle detection.

mod helpers;

use std::collections::HashSet;

use petgraph::algo::tarjan_scc;
use proptest::prelude::*;

use helpers::SnapshotBuilder;
use pipeline_compiler::codegen::helpers::to_snake_case;
use pipeline_compiler::parse::{DatasetType, DependencyGraph, Snapshot};
use pipeline_compiler::validate::cycles::find_cycles;
use pipeline_compiler::validate::naming::v002_unique_names;

/// A random bipartite graph: `nodes` nodes, one dataset per node that the
/// node writes, and arbitrary dataset → node reads.
fn random_snapshot(nodes: usize, reads: &[(usize, usize)]) -> Snapshot {
    let mut builder = SnapshotBuilder::new("prop");
    for i in 0..nodes {
        builder = builder
            .node(&format!("node-{i}"), &format!("n{i}"))
            .dataset(&format!("dataset-{i}"), &format!("d{i}"), DatasetType::Memory)
            .link(&format!("node-{i}"), &format!("dataset-{i}"));
    }
    for &(dataset, node) in reads {
        builder = builder.link(
            &format!("dataset-{}", dataset % nodes),
            &format!("node-{}", node % nodes),
        );
    }
    builder.build()
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..24)))
}

/// Cycle presence according to petgraph: a non-trivial SCC or a self-loop.
fn has_cycle_oracle(graph: &DependencyGraph) -> bool {
    tarjan_scc(&graph.graph).iter().any(|scc| {
        scc.len() > 1 || graph.graph.contains_edge(scc[0], scc[0])
    })
}

proptest! {
    #[test]
    fn normalization_is_idempotent(s in "[A-Za-z0-9 _\t-]{0,32}") {
        let once = to_snake_case(&s);
        prop_assert_eq!(to_snake_case(&once), once.clone());
        prop_assert!(!once.starts_with('_'));
        prop_assert!(!once.contains("__"));
        prop_assert!(!once.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace()));
    }

    #[test]
    fn no_connections_means_no_edges(n in 0usize..20) {
        let mut builder = SnapshotBuilder::new("prop");
        for i in 0..n {
            builder = builder.node(&format!("node-{i}"), &format!("n{i}"));
        }
        let downstream = DependencyGraph::build(&builder.build()).downstream();
        prop_assert_eq!(downstream.len(), n);
        prop_assert!(downstream.values().all(|next| next.is_empty()));
    }

    #[test]
    fn detector_visits_every_node((n, reads) in graph_strategy()) {
        let snapshot = random_snapshot(n, &reads);
        let report = find_cycles(&DependencyGraph::build(&snapshot));
        for node in &snapshot.nodes {
            prop_assert!(report.visited.contains(&node.id));
        }
    }

    #[test]
    fn detector_agrees_with_scc_oracle((n, reads) in graph_strategy()) {
        let snapshot = random_snapshot(n, &reads);
        let graph = DependencyGraph::build(&snapshot);
        let report = find_cycles(&graph);
        prop_assert_eq!(!report.cycles.is_empty(), has_cycle_oracle(&graph));

        // Every reported trail walks real edges and ends by re-entering itself.
        for cycle in &report.cycles {
            let (last, walk) = cycle.split_last().unwrap();
            prop_assert!(walk.contains(last));
            for pair in cycle.windows(2) {
                prop_assert!(graph.has_edge(&pair[0], &pair[1]));
            }
        }
    }

    #[test]
    fn cycle_report_is_symmetric_under_relabeling((n, reads) in graph_strategy()) {
        let snapshot = random_snapshot(n, &reads);
        let renamed = helpers::relabel(&snapshot, |id| format!("{id}-x"));

        let before = find_cycles(&DependencyGraph::build(&snapshot));
        let after = find_cycles(&DependencyGraph::build(&renamed));

        let translated: Vec<Vec<String>> = before
            .cycles
            .iter()
            .map(|c| c.iter().map(|id| format!("{id}-x")).collect())
            .collect();
        prop_assert_eq!(translated, after.cycles);
    }

    #[test]
    fn duplicates_ignore_case_and_padding(
        name in "[a-z][a-z0-9_]{0,10}",
        pad in 0usize..3,
        upper in any::<bool>(),
    ) {
        let variant = format!(
            "{}{}{}",
            " ".repeat(pad),
            if upper { name.to_uppercase() } else { name.clone() },
            " ".repeat(pad),
        );
        let snapshot = SnapshotBuilder::new("prop")
            .node("node-1", &name)
            .node("node-2", &variant)
            .build();
        let mut findings = Vec::new();
        v002_unique_names(&snapshot, &mut findings);
        prop_assert_eq!(findings.len(), 2);
        let ids: HashSet<&str> = findings.iter().map(|f| f.component_id.as_str()).collect();
        prop_assert_eq!(ids, HashSet::from(["node-1", "node-2"]));
    }
}
