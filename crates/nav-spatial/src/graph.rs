//! Keyed weighted graph and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_weight`) are sorted by
//! source node and indexed by `EdgeId`.  Within one source node, edges keep
//! their insertion order, so identical inputs always number edges
//! identically.
//!
//! # Keys
//!
//! Every vertex has a caller-defined key `K` (a quantized coordinate
//! outdoors, a floor/entity pair indoors) and a position `P`.  Adding a node
//! whose key already exists returns the existing `NodeId`: this is how
//! segments sharing an endpoint join without any explicit linking step.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use nav_core::{EdgeId, NodeId};

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Weighted directed graph in CSR format with a key → node index.
///
/// Do not construct directly; use [`GraphBuilder`].
#[derive(Clone, Debug)]
pub struct Graph<K, P> {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Key of each node.  Indexed by `NodeId`.
    pub node_key: Vec<K>,

    /// Position of each node (first position seen for its key).
    pub node_pos: Vec<P>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge; needed to walk back-pointers.
    pub edge_from: Vec<NodeId>,

    pub edge_to: Vec<NodeId>,

    /// Non-negative weight (metres, or indoor cost units).
    pub edge_weight: Vec<f64>,

    index: FxHashMap<K, NodeId>,
}

impl<K: Copy + Eq + Hash, P: Copy> Graph<K, P> {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_key.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_key.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Node carrying `key`, if any.
    #[inline]
    pub fn node(&self, key: &K) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    #[inline]
    pub fn key(&self, node: NodeId) -> K {
        self.node_key[node.index()]
    }

    #[inline]
    pub fn pos(&self, node: NodeId) -> P {
        self.node_pos[node.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Lightest edge `from → to`, if one exists.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.out_edges(from)
            .filter(|e| self.edge_to[e.index()] == to)
            .min_by(|a, b| self.edge_weight[a.index()].total_cmp(&self.edge_weight[b.index()]))
    }

    /// Sum of the stored weights of `edges`.
    pub fn path_weight(&self, edges: &[EdgeId]) -> f64 {
        edges.iter().map(|e| self.edge_weight[e.index()]).sum()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use nav_spatial::GraphBuilder;
///
/// let mut b: GraphBuilder<u32, ()> = GraphBuilder::new();
/// let a = b.node(1, ());
/// let c = b.node(2, ());
/// assert_eq!(b.node(1, ()), a); // same key, same node
/// b.add_edge(a, c, 12.5);
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 2); // bidirectional
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder<K, P> {
    keys:      Vec<K>,
    positions: Vec<P>,
    index:     FxHashMap<K, NodeId>,
    raw_edges: Vec<RawEdge>,
}

#[derive(Clone, Copy, Debug)]
struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    weight: f64,
}

impl<K: Copy + Eq + Hash, P: Copy> GraphBuilder<K, P> {
    pub fn new() -> Self {
        Self {
            keys:      Vec::new(),
            positions: Vec::new(),
            index:     FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            keys:      Vec::with_capacity(nodes),
            positions: Vec::with_capacity(nodes),
            index:     FxHashMap::default(),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Return the node for `key`, creating it at `pos` if it does not exist
    /// yet.  Node ids are sequential from 0 in first-seen order.
    pub fn node(&mut self, key: K, pos: P) -> NodeId {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = NodeId(self.keys.len() as u32);
        self.keys.push(key);
        self.positions.push(pos);
        self.index.insert(key, id);
        id
    }

    /// Node for `key` without creating it.
    pub fn node_id(&self, key: &K) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        debug_assert!(weight >= 0.0, "negative edge weight {weight}");
        self.raw_edges.push(RawEdge { from, to, weight });
    }

    /// Add edges in **both directions** with the same weight.  Self-loops
    /// are ignored.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        if a == b {
            return;
        }
        self.add_directed_edge(a, b, weight);
        self.add_directed_edge(b, a, weight);
    }

    /// Drop every edge between `a` and `b`, in both directions.  Returns
    /// how many directed edges were removed.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> usize {
        let before = self.raw_edges.len();
        self.raw_edges
            .retain(|e| !((e.from == a && e.to == b) || (e.from == b && e.to == a)));
        before - self.raw_edges.len()
    }

    pub fn node_pos(&self, id: NodeId) -> P {
        self.positions[id.index()]
    }

    pub fn node_key(&self, id: NodeId) -> K {
        self.keys[id.index()]
    }

    pub fn node_count(&self) -> usize { self.keys.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// Time complexity: O(E log E) for the (stable) edge sort.
    pub fn build(self) -> Graph<K, P> {
        let node_count = self.keys.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps insertion order among one node's edges.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:   Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_weight: Vec<f64>    = raw.iter().map(|e| e.weight).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        Graph {
            node_key: self.keys,
            node_pos: self.positions,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            index: self.index,
        }
    }
}

impl<K: Copy + Eq + Hash, P: Copy> Default for GraphBuilder<K, P> {
    fn default() -> Self {
        Self::new()
    }
}
