//! Diverse alternative routes.
//!
//! # Buckets
//!
//! Kiosk users compare routes by how much longer they are, so alternatives
//! are picked per distance bucket rather than as the strict k shortest:
//!
//! | Bucket | Delta from the shortest route              |
//! |--------|--------------------------------------------|
//! | A      | the shortest route itself                  |
//! | B      | `near_delta_m ..= far_delta_m`             |
//! | C      | `> far_delta_m`                            |
//!
//! # Search
//!
//! A Yen-style spur search with reuse penalties.  Each iteration explores
//! one known path (the shortest first, then the cheapest unexplored
//! candidate): for every vertex `j` along it, the prefix up to `j` is the
//! root, the next edge of every explored or accepted path sharing that root
//! is excluded, the root's earlier vertices are blocked, and every edge
//! already used by an accepted route costs `1 + usage² × penalty_weight`
//! times its weight.  Dijkstra from the spur vertex completes the
//! candidate.  Candidates are ranked by their true, unpenalized length.
//!
//! The search stops once `k` routes are accepted, when no unexplored
//! candidate remains, or after `k × iterations_per_route` iterations.
//! Unfilled slots are then backfilled with the remaining candidates that
//! overlap least with what was already accepted.

use std::hash::Hash;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use nav_core::{AlternativeConfig, EdgeId, GeoPoint, NodeId, TravelMode};

use crate::graph::Graph;
use crate::records::PathRecord;
use crate::router::{Route, disconnected, snap_endpoints};
use crate::search::{Constraints, Path, shortest_path};
use crate::SpatialResult;

// ── Public entry points ───────────────────────────────────────────────────────

/// Up to `cfg.k` diverse routes between two points, shortest first.
///
/// Endpoints are snapped exactly as in [`DijkstraRouter`](crate::DijkstraRouter).
/// If the network does not connect them, walking/driving return the single
/// straight-line fallback and accessible mode returns
/// [`SpatialError::NoRoute`](crate::SpatialError::NoRoute).
pub fn alternative_routes(
    paths: &[PathRecord],
    from: GeoPoint,
    to: GeoPoint,
    mode: TravelMode,
    cfg: &AlternativeConfig,
) -> SpatialResult<Vec<Route>> {
    let snapped = snap_endpoints(paths, from, to, mode)?;
    let found = k_diverse_paths(&snapped.graph, snapped.from, snapped.to, cfg);

    if found.is_empty() {
        return disconnected(from, to, mode).map(|r| vec![r]);
    }
    Ok(found.iter().map(|p| Route::from_path(&snapped.graph, p)).collect())
}

/// Up to `cfg.k` diverse paths from `from` to `to` on any graph; each
/// returned path's `cost` is its true length.  Empty when `to` is
/// unreachable.
pub fn k_diverse_paths<K, P>(
    graph: &Graph<K, P>,
    from: NodeId,
    to: NodeId,
    cfg: &AlternativeConfig,
) -> Vec<Path>
where
    K: Copy + Eq + Hash,
    P: Copy,
{
    let Some(base) = shortest_path(graph, from, to, &Constraints::none()) else {
        return Vec::new();
    };
    if cfg.k <= 1 || base.is_trivial() {
        return vec![base];
    }

    let mut search = DiverseSearch::new(graph, to, cfg, base);
    search.run();
    search.finish()
}

// ── Search state ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Bucket {
    Shortest,
    Near,
    Far,
}

struct Candidate {
    path:     Path,
    explored: bool,
    accepted: bool,
}

struct DiverseSearch<'g, K, P> {
    graph: &'g Graph<K, P>,
    to:    NodeId,
    cfg:   &'g AlternativeConfig,

    /// Every distinct path seen, base route first.
    candidates: Vec<Candidate>,
    /// Index into `candidates` for each filled bucket.
    near: Option<usize>,
    far:  Option<usize>,
    /// Accepted-route usage per undirected segment (lower node id first).
    usage: FxHashMap<(NodeId, NodeId), u32>,
}

impl<'g, K, P> DiverseSearch<'g, K, P>
where
    K: Copy + Eq + Hash,
    P: Copy,
{
    fn new(graph: &'g Graph<K, P>, to: NodeId, cfg: &'g AlternativeConfig, base: Path) -> Self {
        let mut s = Self {
            graph,
            to,
            cfg,
            candidates: Vec::new(),
            near: None,
            far:  None,
            usage: FxHashMap::default(),
        };
        s.candidates.push(Candidate { path: base, explored: false, accepted: false });
        s.accept(0);
        s
    }

    fn base_cost(&self) -> f64 {
        self.candidates[0].path.cost
    }

    fn accepted_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.accepted).count()
    }

    fn bucket_of(&self, cost: f64) -> Option<Bucket> {
        let delta = cost - self.base_cost();
        if delta > self.cfg.far_delta_m {
            Some(Bucket::Far)
        } else if delta >= self.cfg.near_delta_m {
            Some(Bucket::Near)
        } else if delta <= 0.0 {
            Some(Bucket::Shortest)
        } else {
            None
        }
    }

    fn segment(&self, e: EdgeId) -> (NodeId, NodeId) {
        let a = self.graph.edge_from[e.index()];
        let b = self.graph.edge_to[e.index()];
        if a <= b { (a, b) } else { (b, a) }
    }

    fn accept(&mut self, idx: usize) {
        self.candidates[idx].accepted = true;
        let edges = self.candidates[idx].path.edges.clone();
        for e in edges {
            let key = self.segment(e);
            *self.usage.entry(key).or_insert(0) += 1;
        }
    }

    // ── Main loop ─────────────────────────────────────────────────────────

    fn run(&mut self) {
        for iteration in 0..self.cfg.max_iterations() {
            if self.accepted_count() >= self.cfg.k {
                break;
            }
            let Some(next) = self.next_unexplored() else {
                break;
            };
            self.candidates[next].explored = true;

            let added = self.spur_from(next);
            trace!("alternatives: iteration {iteration} explored candidate {next}, {added} new");
            self.select();
        }
    }

    /// Cheapest candidate whose spurs have not been generated yet.
    fn next_unexplored(&self) -> Option<usize> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.explored)
            .min_by(|(_, l), (_, r)| l.path.cost.total_cmp(&r.path.cost))
            .map(|(i, _)| i)
    }

    /// Generate spur candidates along `candidates[idx]`; returns how many
    /// new distinct paths were added.
    fn spur_from(&mut self, idx: usize) -> usize {
        let route = self.candidates[idx].path.clone();
        let multipliers = self.penalties();
        let mut added = 0;

        for j in 0..route.edges.len() {
            let root_nodes = &route.nodes[..=j];
            let root_edges = &route.edges[..j];
            let spur = route.nodes[j];

            let mut constraints = Constraints {
                multipliers: multipliers.clone(),
                ..Constraints::default()
            };
            for c in self.candidates.iter().filter(|c| c.explored || c.accepted) {
                if c.path.nodes.len() > j + 1 && c.path.nodes[..=j] == *root_nodes {
                    constraints.excluded_edges.insert(c.path.edges[j]);
                }
            }
            constraints.blocked_nodes.extend(root_nodes[..j].iter().copied());

            let Some(tail) = shortest_path(self.graph, spur, self.to, &constraints) else {
                continue;
            };

            let mut nodes = root_nodes.to_vec();
            nodes.extend_from_slice(&tail.nodes[1..]);
            let mut edges = root_edges.to_vec();
            edges.extend_from_slice(&tail.edges);

            if self.candidates.iter().any(|c| c.path.nodes == nodes) {
                continue;
            }
            let cost = self.graph.path_weight(&edges);
            trace!("alternatives: spur at {spur} gives {} vertices, {cost:.1} m", nodes.len());
            self.candidates.push(Candidate {
                path: Path { nodes, edges, cost },
                explored: false,
                accepted: false,
            });
            added += 1;
        }
        added
    }

    /// Cost multipliers for every directed edge on an accepted segment.
    fn penalties(&self) -> FxHashMap<EdgeId, f64> {
        let mut m = FxHashMap::default();
        for i in 0..self.graph.edge_count() {
            let e = EdgeId(i as u32);
            if let Some(&u) = self.usage.get(&self.segment(e)) {
                m.insert(e, self.cfg.penalty_multiplier(u));
            }
        }
        m
    }

    /// Unaccepted candidate indices, cheapest first.
    fn ranked_pool(&self) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..self.candidates.len())
            .filter(|&i| !self.candidates[i].accepted)
            .collect();
        pool.sort_by(|&l, &r| {
            self.candidates[l].path.cost.total_cmp(&self.candidates[r].path.cost)
        });
        pool
    }

    /// Fill empty buckets from the pool; once every bucket is filled, take
    /// the cheapest remaining candidate per iteration until `k` is reached.
    fn select(&mut self) {
        for bucket in [Bucket::Near, Bucket::Far] {
            if self.accepted_count() >= self.cfg.k {
                return;
            }
            let slot = match bucket {
                Bucket::Near => self.near,
                _ => self.far,
            };
            if slot.is_some() {
                continue;
            }
            let pick = self
                .ranked_pool()
                .into_iter()
                .find(|&i| self.bucket_of(self.candidates[i].path.cost) == Some(bucket));
            if let Some(i) = pick {
                debug!(
                    "alternatives: {bucket:?} bucket filled, +{:.1} m",
                    self.candidates[i].path.cost - self.base_cost()
                );
                self.accept(i);
                match bucket {
                    Bucket::Near => self.near = Some(i),
                    _ => self.far = Some(i),
                }
            }
        }

        if self.near.is_some() && self.far.is_some() && self.accepted_count() < self.cfg.k {
            if let Some(&i) = self.ranked_pool().first() {
                self.accept(i);
            }
        }
    }

    // ── Result ────────────────────────────────────────────────────────────

    fn finish(mut self) -> Vec<Path> {
        while self.accepted_count() < self.cfg.k {
            let Some(i) = self.most_diverse() else {
                break;
            };
            debug!("alternatives: backfilling with candidate {i}");
            self.accept(i);
        }

        let mut routes: Vec<Path> = self
            .candidates
            .into_iter()
            .filter(|c| c.accepted)
            .map(|c| c.path)
            .collect();
        // Stable: the base route stays first among equal lengths.
        routes.sort_by(|l, r| l.cost.total_cmp(&r.cost));
        routes
    }

    /// Unaccepted candidate sharing the smallest fraction of its segments
    /// with accepted routes; shorter wins ties.
    fn most_diverse(&self) -> Option<usize> {
        let overlap = |i: usize| {
            let edges = &self.candidates[i].path.edges;
            if edges.is_empty() {
                return 1.0;
            }
            let shared = edges.iter().filter(|&&e| self.usage.contains_key(&self.segment(e))).count();
            shared as f64 / edges.len() as f64
        };
        self.ranked_pool()
            .into_iter()
            .min_by(|&l, &r| overlap(l).total_cmp(&overlap(r)))
    }
}
