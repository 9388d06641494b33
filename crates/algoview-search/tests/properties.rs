use std::collections::{BTreeSet, VecDeque};

use algoview_graph::Graph;
use algoview_search::{bfs, dfs, dijkstra};
use proptest::prelude::*;

const NAMES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

fn build(directed: bool, edges: &[(usize, usize, u8)]) -> Graph {
    let mut graph = Graph::new(directed);
    for name in NAMES {
        graph.add_node(name);
    }
    for &(a, b, w) in edges {
        graph.add_edge(NAMES[a], NAMES[b], Some(w as f64));
    }
    graph
}

fn reachable(graph: &Graph, start: &str) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([start.to_string()]);
    while let Some(node) = queue.pop_front() {
        if !seen.insert(node.clone()) {
            continue;
        }
        for n in graph.neighbors(&node) {
            queue.push_back(n.to_string());
        }
    }
    seen
}

fn edges() -> impl Strategy<Value = Vec<(usize, usize, u8)>> {
    prop::collection::vec((0usize..7, 0usize..7, 0u8..20), 0..25)
}

proptest! {
    #[test]
    fn visited_equals_reachable(edges in edges(), start in 0usize..7, directed in any::<bool>()) {
        let graph = build(directed, &edges);
        let start = NAMES[start];
        let expected = reachable(&graph, start);

        for trace in [
            dfs(&graph, start).unwrap(),
            bfs(&graph, start).unwrap(),
            dijkstra(&graph, start).unwrap(),
        ] {
            let order = trace.visit_order();
            let visited: BTreeSet<String> = order.iter().cloned().collect();
            prop_assert_eq!(visited.len(), order.len());
            prop_assert_eq!(&visited, &expected);
            prop_assert_eq!(order[0].as_str(), start);
        }
    }

    #[test]
    fn traces_are_bracketed_by_idle_snapshots(edges in edges(), start in 0usize..7) {
        let graph = build(false, &edges);
        let trace = dfs(&graph, NAMES[start]).unwrap();
        let snapshots = trace.snapshots();
        prop_assert!(snapshots.len() >= 3);
        prop_assert!(snapshots[0].is_idle());
        prop_assert!(snapshots[snapshots.len() - 1].is_idle());
        prop_assert!(snapshots[1..snapshots.len() - 1].iter().all(|s| !s.is_idle()));
    }

    #[test]
    fn visited_only_grows(edges in edges(), start in 0usize..7, directed in any::<bool>()) {
        let graph = build(directed, &edges);
        let trace = dijkstra(&graph, NAMES[start]).unwrap();
        for pair in trace.snapshots().windows(2) {
            prop_assert!(pair[1].visited.starts_with(&pair[0].visited));
            prop_assert!(pair[1].tree_edges.len() >= pair[0].tree_edges.len());
        }
    }

    #[test]
    fn settled_distances_match_bellman_ford(edges in edges(), start in 0usize..7, directed in any::<bool>()) {
        let graph = build(directed, &edges);
        let start = NAMES[start];
        let trace = dijkstra(&graph, start).unwrap();
        let last = trace.last().unwrap();

        let mut best: Vec<f64> = NAMES.iter().map(|n| if *n == start { 0.0 } else { f64::INFINITY }).collect();
        for _ in 0..NAMES.len() {
            for (i, from) in NAMES.iter().enumerate() {
                for to in graph.neighbors(from) {
                    let j = NAMES.iter().position(|n| *n == to).unwrap();
                    let w = graph.weight(from, to).unwrap();
                    if best[i] + w < best[j] {
                        best[j] = best[i] + w;
                    }
                }
            }
        }
        for (i, name) in NAMES.iter().enumerate() {
            prop_assert_eq!(last.distance(name), Some(best[i]));
        }
    }
}
