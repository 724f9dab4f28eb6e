//! Dijkstra single-source search shared by every router.
//!
//! The search never mutates the graph.  Callers that need to suppress or
//! penalize edges for one query (the alternative-route generator) pass a
//! [`Constraints`] value instead.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use nav_core::{EdgeId, NodeId};

use crate::graph::Graph;

// ── Path ──────────────────────────────────────────────────────────────────────

/// A vertex path found by the search.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Vertices from source to target, inclusive.
    pub nodes: Vec<NodeId>,
    /// Edges between consecutive `nodes`; always one shorter.
    pub edges: Vec<EdgeId>,
    /// Total cost under the constraints the path was searched with.
    pub cost: f64,
}

impl Path {
    /// `true` if source and target are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Constraints ───────────────────────────────────────────────────────────────

/// Per-query edge suppression and penalties.
#[derive(Clone, Debug, Default)]
pub struct Constraints {
    /// Directed edges the search may not use.
    pub excluded_edges: FxHashSet<EdgeId>,
    /// Vertices the search may not enter (the source itself is exempt).
    pub blocked_nodes:  FxHashSet<NodeId>,
    /// Cost multipliers; edges absent from the map cost their plain weight.
    pub multipliers:    FxHashMap<EdgeId, f64>,
}

impl Constraints {
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    fn edge_cost(&self, weight: f64, edge: EdgeId) -> f64 {
        match self.multipliers.get(&edge) {
            Some(m) => weight * m,
            None => weight,
        }
    }
}

// ── Heap state ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost, then by lower node id for deterministic ties.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

struct Settled {
    dist:      Vec<f64>,
    prev_edge: Vec<EdgeId>,
}

fn run<K, P>(
    graph: &Graph<K, P>,
    from: NodeId,
    target: Option<NodeId>,
    constraints: &Constraints,
) -> Settled
where
    K: Copy + Eq + Hash,
    P: Copy,
{
    let n = graph.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut done      = vec![false; n];

    dist[from.index()] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: from });

    while let Some(State { cost, node }) = heap.pop() {
        if done[node.index()] {
            continue;
        }
        done[node.index()] = true;

        if Some(node) == target {
            break;
        }

        for edge in graph.out_edges(node) {
            if constraints.excluded_edges.contains(&edge) {
                continue;
            }
            let next = graph.edge_to[edge.index()];
            if done[next.index()] || constraints.blocked_nodes.contains(&next) {
                continue;
            }

            let next_cost = cost + constraints.edge_cost(graph.edge_weight[edge.index()], edge);
            if next_cost < dist[next.index()] {
                dist[next.index()] = next_cost;
                prev_edge[next.index()] = edge;
                heap.push(State { cost: next_cost, node: next });
            }
        }
    }

    Settled { dist, prev_edge }
}

/// Shortest path from `from` to `to`, or `None` if `to` is unreachable
/// under `constraints`.
///
/// `from == to` yields a trivial single-vertex path of cost 0.
pub fn shortest_path<K, P>(
    graph: &Graph<K, P>,
    from: NodeId,
    to: NodeId,
    constraints: &Constraints,
) -> Option<Path>
where
    K: Copy + Eq + Hash,
    P: Copy,
{
    if from.index() >= graph.node_count() || to.index() >= graph.node_count() {
        return None;
    }
    if from == to {
        return Some(Path { nodes: vec![from], edges: vec![], cost: 0.0 });
    }

    let settled = run(graph, from, Some(to), constraints);
    let cost = settled.dist[to.index()];
    if !cost.is_finite() {
        return None;
    }

    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = settled.prev_edge[cur.index()];
        edges.push(e);
        cur = graph.edge_from[e.index()];
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|e| graph.edge_to[e.index()]));

    Some(Path { nodes, edges, cost })
}

/// Unconstrained distances from `from` to every vertex; unreachable
/// vertices are `f64::INFINITY`.
pub fn distances_from<K, P>(graph: &Graph<K, P>, from: NodeId) -> Vec<f64>
where
    K: Copy + Eq + Hash,
    P: Copy,
{
    if from.index() >= graph.node_count() {
        return vec![f64::INFINITY; graph.node_count()];
    }
    run(graph, from, None, &Constraints::none()).dist
}
