//! Property-based coverage of the quantified invariants in the flow network
//! and solver (feasibility, conservation, residual-capacity laws,
//! determinism), using randomly generated small networks.

use imcut::flow::{FlowNetwork, MaxFlowSolver, Vertex};
use proptest::prelude::*;

fn voxel(id: u64) -> Vertex {
    Vertex::Voxel(id)
}

/// Builds a small random DAG-ish network over `Source, v0..vn, Sink` from a
/// flat list of `(from, to, capacity)` triples, where `from`/`to` index into
/// `[Source, v0, .., vn-1, Sink]`.
fn build_network(num_mid: usize, edges: &[(usize, usize, u16)]) -> (FlowNetwork, Vertex, Vertex) {
    let mut network = FlowNetwork::new();
    let source = Vertex::Source;
    let sink = Vertex::Sink;
    let vertex_at = |i: usize| -> Vertex {
        if i == 0 {
            source
        } else if i == num_mid + 1 {
            sink
        } else {
            voxel((i - 1) as u64)
        }
    };
    for &(from, to, capacity) in edges {
        network.add_edge(vertex_at(from), vertex_at(to), i64::from(capacity));
    }
    // Make sure source and sink are always present, even with no edges
    // touching them directly.
    if !network.contains(source) {
        network.add_edge(source, sink, 0);
    }
    (network, source, sink)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn flow_stays_feasible_and_conserves(
        num_mid in 1usize..5,
        raw_edges in prop::collection::vec((0usize..6, 0usize..6, 1u16..20), 1..20),
    ) {
        let edges: Vec<(usize, usize, u16)> = raw_edges
            .into_iter()
            .map(|(f, t, c)| (f % (num_mid + 2), t % (num_mid + 2), c))
            .filter(|&(f, t, _)| f != t)
            .collect();
        prop_assume!(!edges.is_empty());

        let (mut network, source, sink) = build_network(num_mid, &edges);
        let solver = match MaxFlowSolver::solve(&mut network, source, sink) {
            Ok(s) => s,
            Err(_) => return Ok(()),
        };

        // Every edge's flow stays within [0, capacity].
        for v in network.vertices() {
            for e in network.out_edges(v).unwrap() {
                let flow = network.flow(e);
                prop_assert!(flow >= 0 && flow <= e.capacity());
            }
        }

        // Conservation holds at every non-terminal vertex.
        for i in 0..num_mid {
            let v = voxel(i as u64);
            if network.contains(v) {
                prop_assert_eq!(network.excess(v).unwrap(), 0);
            }
        }

        // The source is marked and the sink is not.
        prop_assert!(solver.in_cut(source));
        prop_assert!(!solver.in_cut(sink));

        // Max flow equals the capacity crossing the reported cut.
        let mut cut_capacity = 0i64;
        for v in network.vertices() {
            if solver.in_cut(v) {
                for e in network.out_edges(v).unwrap() {
                    if !solver.in_cut(e.destination()) {
                        cut_capacity += e.capacity();
                    }
                }
            }
        }
        prop_assert_eq!(cut_capacity, solver.max_flow());

        // Residual capacity law: forward + backward residual = capacity.
        for v in network.vertices() {
            for e in network.out_edges(v).unwrap() {
                let fwd = network.residual_capacity(e, e.destination()).unwrap();
                let bwd = network.residual_capacity(e, e.source()).unwrap();
                prop_assert_eq!(fwd + bwd, e.capacity());
            }
        }
    }

    #[test]
    fn determinism(
        num_mid in 1usize..5,
        raw_edges in prop::collection::vec((0usize..6, 0usize..6, 1u16..20), 1..20),
    ) {
        let edges: Vec<(usize, usize, u16)> = raw_edges
            .into_iter()
            .map(|(f, t, c)| (f % (num_mid + 2), t % (num_mid + 2), c))
            .filter(|&(f, t, _)| f != t)
            .collect();
        prop_assume!(!edges.is_empty());

        let (mut network_a, source, sink) = build_network(num_mid, &edges);
        let (mut network_b, _, _) = build_network(num_mid, &edges);

        let result_a = MaxFlowSolver::solve(&mut network_a, source, sink);
        let result_b = MaxFlowSolver::solve(&mut network_b, source, sink);

        match (result_a, result_b) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.max_flow(), b.max_flow());
                let mut cut_a: Vec<_> = a.min_cut().iter().map(|v| format!("{v:?}")).collect();
                let mut cut_b: Vec<_> = b.min_cut().iter().map(|v| format!("{v:?}")).collect();
                cut_a.sort();
                cut_b.sort();
                prop_assert_eq!(cut_a, cut_b);
            }
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "solver outcome differed between identical runs"),
        }
    }
}
