//! End-to-end max-flow scenarios, run against the public API the way a
//! caller outside this crate would use it.

use imcut::flow::{FlowNetwork, MaxFlowSolver, Vertex};

fn v(id: u64) -> Vertex {
    Vertex::Voxel(id)
}

#[test]
fn trivial_bottleneck() {
    let mut g = FlowNetwork::new();
    g.add_edge(Vertex::Source, v(0), 1);
    g.add_edge(v(0), Vertex::Sink, 2);
    let solver = MaxFlowSolver::solve(&mut g, Vertex::Source, Vertex::Sink).unwrap();
    assert_eq!(solver.max_flow(), 1);
    assert_eq!(solver.min_cut().len(), 1);
    assert!(solver.in_cut(Vertex::Source));
}

#[test]
fn parallel_path() {
    let mut g = FlowNetwork::new();
    g.add_edge(Vertex::Source, v(0), 2);
    g.add_edge(v(0), Vertex::Sink, 1);
    g.add_edge(Vertex::Source, Vertex::Sink, 3);
    let solver = MaxFlowSolver::solve(&mut g, Vertex::Source, Vertex::Sink).unwrap();
    assert_eq!(solver.max_flow(), 4);
    assert_eq!(solver.min_cut().len(), 2);
}

#[test]
fn branching() {
    let mut g = FlowNetwork::new();
    g.add_edge(Vertex::Source, v(0), 2);
    g.add_edge(Vertex::Source, v(1), 1);
    g.add_edge(v(0), v(1), 3);
    g.add_edge(v(0), Vertex::Sink, 1);
    g.add_edge(v(1), Vertex::Sink, 2);
    let solver = MaxFlowSolver::solve(&mut g, Vertex::Source, Vertex::Sink).unwrap();
    assert_eq!(solver.max_flow(), 3);
}

#[test]
fn clrs_canonical_example() {
    let mut g = FlowNetwork::new();
    g.add_edge(Vertex::Source, v(0), 16);
    g.add_edge(Vertex::Source, v(1), 13);
    g.add_edge(v(0), v(1), 10);
    g.add_edge(v(1), v(0), 4);
    g.add_edge(v(0), v(2), 12);
    g.add_edge(v(2), v(1), 9);
    g.add_edge(v(1), v(3), 14);
    g.add_edge(v(3), v(2), 7);
    g.add_edge(v(2), Vertex::Sink, 20);
    g.add_edge(v(3), Vertex::Sink, 4);
    let solver = MaxFlowSolver::solve(&mut g, Vertex::Source, Vertex::Sink).unwrap();
    assert_eq!(solver.max_flow(), 23);
}

#[test]
fn disconnected_sink() {
    let mut g = FlowNetwork::new();
    g.add_edge(Vertex::Source, v(0), 10);
    g.add_edge(Vertex::Sink, v(0), 10);
    let solver = MaxFlowSolver::solve(&mut g, Vertex::Source, Vertex::Sink).unwrap();
    assert_eq!(solver.max_flow(), 0);
}

#[test]
fn removing_any_cut_edge_strictly_reduces_max_flow() {
    let mut g = FlowNetwork::new();
    g.add_edge(Vertex::Source, v(0), 2);
    g.add_edge(v(0), Vertex::Sink, 1);
    g.add_edge(Vertex::Source, Vertex::Sink, 3);
    let solver = MaxFlowSolver::solve(&mut g, Vertex::Source, Vertex::Sink).unwrap();
    let full_flow = solver.max_flow();

    // Rebuild without the Source->Sink edge (the only cut edge with a
    // capacity that can be removed cleanly in this topology) and confirm
    // the max flow strictly drops.
    let mut reduced = FlowNetwork::new();
    reduced.add_edge(Vertex::Source, v(0), 2);
    reduced.add_edge(v(0), Vertex::Sink, 1);
    let reduced_solver =
        MaxFlowSolver::solve(&mut reduced, Vertex::Source, Vertex::Sink).unwrap();
    assert!(reduced_solver.max_flow() < full_flow);
}
