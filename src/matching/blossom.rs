//! Maximum-weight matching on general graphs.
//!
//! Edmonds' blossom algorithm with the primal-dual formulation of Galil
//! ("Efficient algorithms for finding maximum matching in graphs", 1986).
//! Runs in O(n^3) time for n vertices.
//!
//! Every vertex and every (possibly nested) blossom is a [`Node`] in a single
//! arena. Vertices occupy ids `0..n` and blossoms `n..2n`, but code never
//! relies on that split: each node carries its [`NodeKind`].
//!
//! Edge endpoints are numbered `2k` (the `u` end of edge `k`) and `2k + 1`
//! (the `v` end), so `p ^ 1` is the opposite endpoint of the same edge.
//!
//! Dual variables are stored doubled for vertices so that all arithmetic
//! stays integral: `slack(k) = dual(u) + dual(v) - 2 * weight(k)`.

use serde::{Deserialize, Serialize};

/// An undirected weighted edge between two vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: i64,
}

impl Edge {
    pub fn new(u: usize, v: usize, weight: i64) -> Self {
        Self { u, v, weight }
    }
}

/// What the solver optimizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Largest possible number of pairs; among those, the heaviest
    #[default]
    MaxCardinality,
    /// Heaviest matching regardless of size
    MaxWeight,
}

/// Result of a matching run: the partner of each vertex, if any
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matching {
    mate: Vec<Option<usize>>,
}

impl Matching {
    /// Partner of vertex `v`
    #[must_use]
    pub fn mate(&self, v: usize) -> Option<usize> {
        self.mate.get(v).copied().flatten()
    }

    /// Matched pairs as `(u, v)` with `u < v`, ordered by `u`
    #[must_use]
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.mate
            .iter()
            .enumerate()
            .filter_map(|(u, m)| m.filter(|&v| u < v).map(|v| (u, v)))
            .collect()
    }

    /// Number of matched pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.mate.iter().filter(|m| m.is_some()).count() / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of vertices the matching was computed over
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.mate.len()
    }

    /// True if every vertex has a partner
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.mate.iter().all(Option::is_some)
    }
}

/// Compute a matching over `edges`
///
/// The vertex set is `0..vertex_count`, widened if an edge names a larger
/// index. Self-loops are ignored. An empty edge list yields an empty matching.
#[must_use]
pub fn max_weight_matching(vertex_count: usize, edges: &[Edge], mode: MatchMode) -> Matching {
    let edges: Vec<Edge> = edges.iter().filter(|e| e.u != e.v).copied().collect();
    let n = edges
        .iter()
        .map(|e| e.u.max(e.v) + 1)
        .max()
        .unwrap_or(0)
        .max(vertex_count);

    if edges.is_empty() {
        return Matching {
            mate: vec![None; n],
        };
    }

    Solver::new(n, shift_weights(edges, mode), mode).solve()
}

/// All maximum-cardinality matchings have the same number of edges, so
/// adding a constant to every weight does not change which one is heaviest.
/// Lifting weights to at least 1 keeps the initial duals meaningful.
fn shift_weights(mut edges: Vec<Edge>, mode: MatchMode) -> Vec<Edge> {
    if mode == MatchMode::MaxCardinality {
        let min = edges.iter().map(|e| e.weight).min().unwrap_or(1);
        if min < 1 {
            let shift = 1 - min;
            for e in &mut edges {
                e.weight += shift;
            }
        }
    }
    edges
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Free,
    /// Even distance from a tree root ("S")
    Outer,
    /// Odd distance from a tree root ("T")
    Inner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Vertex,
    Blossom,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    label: Label,
    /// Breadcrumb left while tracing back from two outer nodes
    marked: bool,
    /// Endpoint through which this node got its label
    label_end: Option<usize>,
    /// Enclosing blossom
    parent: Option<usize>,
    /// Sub-blossoms in cycle order, starting at the base
    children: Vec<usize>,
    /// `endpoints[i]` connects `children[i]` to `children[i + 1]`
    endpoints: Vec<usize>,
    /// Base vertex; `None` marks an unused blossom slot
    base: Option<usize>,
    /// Least-slack edge to a different outer node
    best_edge: Option<usize>,
    /// For outer blossoms: least-slack edges to each neighbouring outer blossom
    best_edges: Option<Vec<usize>>,
    dual: i64,
}

impl Node {
    fn vertex(id: usize, dual: i64) -> Self {
        Self {
            kind: NodeKind::Vertex,
            label: Label::Free,
            marked: false,
            label_end: None,
            parent: None,
            children: Vec::new(),
            endpoints: Vec::new(),
            base: Some(id),
            best_edge: None,
            best_edges: None,
            dual,
        }
    }

    fn blossom() -> Self {
        Self {
            kind: NodeKind::Blossom,
            base: None,
            dual: 0,
            ..Self::vertex(0, 0)
        }
    }

    fn is_blossom(&self) -> bool {
        self.kind == NodeKind::Blossom
    }
}

/// Outcome of a dual adjustment
enum Delta {
    /// No further progress possible in this stage
    Done,
    /// Edge from an outer node to a free vertex became tight
    FreeEdge(usize),
    /// Edge between two outer blossoms became tight
    OuterEdge(usize),
    /// Inner blossom's dual reached zero
    Expand(usize),
}

/// Index into a cycle list, counting from the back for negative `i`
fn cyclic(list: &[usize], i: isize) -> usize {
    let len = list.len() as isize;
    list[i.rem_euclid(len) as usize]
}

struct Solver {
    n: usize,
    mode: MatchMode,
    edges: Vec<Edge>,
    /// Vertex at each endpoint
    endpoint: Vec<usize>,
    /// Remote endpoints of the edges at each vertex
    neighbend: Vec<Vec<usize>>,
    /// Remote endpoint of each vertex's matched edge
    mate: Vec<Option<usize>>,
    /// Top-level node containing each vertex
    in_blossom: Vec<usize>,
    nodes: Vec<Node>,
    unused: Vec<usize>,
    allow_edge: Vec<bool>,
    queue: Vec<usize>,
}

impl Solver {
    fn new(n: usize, edges: Vec<Edge>, mode: MatchMode) -> Self {
        let max_weight = edges.iter().map(|e| e.weight).max().unwrap_or(0).max(0);

        let endpoint = (0..2 * edges.len())
            .map(|p| {
                let e = &edges[p / 2];
                if p % 2 == 0 {
                    e.u
                } else {
                    e.v
                }
            })
            .collect();

        let mut neighbend = vec![Vec::new(); n];
        for (k, e) in edges.iter().enumerate() {
            neighbend[e.u].push(2 * k + 1);
            neighbend[e.v].push(2 * k);
        }

        let nodes = (0..2 * n)
            .map(|i| {
                if i < n {
                    Node::vertex(i, max_weight)
                } else {
                    Node::blossom()
                }
            })
            .collect();

        Self {
            n,
            mode,
            allow_edge: vec![false; edges.len()],
            edges,
            endpoint,
            neighbend,
            mate: vec![None; n],
            in_blossom: (0..n).collect(),
            nodes,
            unused: (n..2 * n).collect(),
            queue: Vec::new(),
        }
    }

    fn slack(&self, k: usize) -> i64 {
        let e = &self.edges[k];
        self.nodes[e.u].dual + self.nodes[e.v].dual - 2 * e.weight
    }

    fn top_label(&self, v: usize) -> Label {
        self.nodes[self.in_blossom[v]].label
    }

    fn leaves(&self, b: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(b, &mut out);
        out
    }

    fn collect_leaves(&self, b: usize, out: &mut Vec<usize>) {
        if self.nodes[b].is_blossom() {
            for &c in &self.nodes[b].children {
                self.collect_leaves(c, out);
            }
        } else {
            out.push(b);
        }
    }

    fn assign_label(&mut self, w: usize, label: Label, via: Option<usize>) {
        let b = self.in_blossom[w];
        for id in [w, b] {
            self.nodes[id].label = label;
            self.nodes[id].label_end = via;
            self.nodes[id].best_edge = None;
        }
        match label {
            Label::Outer => {
                let leaves = self.leaves(b);
                self.queue.extend(leaves);
            }
            Label::Inner => {
                // The base of an inner blossom is matched; its mate becomes outer.
                if let Some(m) = self.nodes[b].base.and_then(|base| self.mate[base]) {
                    self.assign_label(self.endpoint[m], Label::Outer, Some(m ^ 1));
                }
            }
            Label::Free => {}
        }
    }

    /// Trace back from two outer vertices. Returns the base of a new blossom,
    /// or `None` if the trees are distinct (an augmenting path exists).
    fn scan_blossom(&mut self, v: usize, w: usize) -> Option<usize> {
        let mut path = Vec::new();
        let mut base = None;
        let (mut v, mut w) = (Some(v), Some(w));

        while let Some(cur) = v {
            let b = self.in_blossom[cur];
            if self.nodes[b].marked {
                base = self.nodes[b].base;
                break;
            }
            path.push(b);
            self.nodes[b].marked = true;

            v = self.nodes[b].label_end.and_then(|e| {
                let t = self.in_blossom[self.endpoint[e]];
                self.nodes[t].label_end.map(|e2| self.endpoint[e2])
            });
            if w.is_some() {
                std::mem::swap(&mut v, &mut w);
            }
        }

        for b in path {
            self.nodes[b].marked = false;
        }
        base
    }

    /// Contract the odd cycle closed by edge `k` into a new outer blossom
    fn add_blossom(&mut self, base: usize, k: usize) {
        let Some(b) = self.unused.pop() else {
            return;
        };
        let Edge { u: v, v: w, .. } = self.edges[k];
        let bb = self.in_blossom[base];
        let mut bv = self.in_blossom[v];
        let mut bw = self.in_blossom[w];

        self.nodes[b].base = Some(base);
        self.nodes[b].parent = None;
        self.nodes[bb].parent = Some(b);

        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.nodes[bv].parent = Some(b);
            path.push(bv);
            let Some(e) = self.nodes[bv].label_end else {
                break;
            };
            endps.push(e);
            bv = self.in_blossom[self.endpoint[e]];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.nodes[bw].parent = Some(b);
            path.push(bw);
            let Some(e) = self.nodes[bw].label_end else {
                break;
            };
            endps.push(e ^ 1);
            bw = self.in_blossom[self.endpoint[e]];
        }

        self.nodes[b].label = Label::Outer;
        self.nodes[b].label_end = self.nodes[bb].label_end;
        self.nodes[b].dual = 0;
        self.nodes[b].children = path.clone();
        self.nodes[b].endpoints = endps;

        for v in self.leaves(b) {
            if self.top_label(v) == Label::Inner {
                // Former inner vertices are now outer and must be scanned.
                self.queue.push(v);
            }
            self.in_blossom[v] = b;
        }

        let mut best_to: Vec<Option<usize>> = vec![None; 2 * self.n];
        for &sub in &path {
            let candidates: Vec<usize> = match self.nodes[sub].best_edges.take() {
                Some(list) => list,
                None => self
                    .leaves(sub)
                    .into_iter()
                    .flat_map(|v| self.neighbend[v].iter().map(|p| p / 2))
                    .collect(),
            };
            for k in candidates {
                let e = self.edges[k];
                let j = if self.in_blossom[e.v] == b { e.u } else { e.v };
                let bj = self.in_blossom[j];
                if bj != b
                    && self.nodes[bj].label == Label::Outer
                    && best_to[bj].map_or(true, |cur| self.slack(k) < self.slack(cur))
                {
                    best_to[bj] = Some(k);
                }
            }
            self.nodes[sub].best_edge = None;
        }

        let best_edges: Vec<usize> = best_to.into_iter().flatten().collect();
        self.nodes[b].best_edge = best_edges.iter().copied().min_by_key(|&k| self.slack(k));
        self.nodes[b].best_edges = Some(best_edges);
    }

    /// Undo the contraction of blossom `b`
    fn expand_blossom(&mut self, b: usize, end_stage: bool) {
        let children = self.nodes[b].children.clone();
        for &s in &children {
            self.nodes[s].parent = None;
            if !self.nodes[s].is_blossom() {
                self.in_blossom[s] = s;
            } else if end_stage && self.nodes[s].dual == 0 {
                self.expand_blossom(s, end_stage);
            } else {
                for v in self.leaves(s) {
                    self.in_blossom[v] = s;
                }
            }
        }

        if !end_stage && self.nodes[b].label == Label::Inner {
            if let Some(label_end) = self.nodes[b].label_end {
                self.relabel_expanded(b, &children, label_end);
            }
        }

        let node = &mut self.nodes[b];
        node.label = Label::Free;
        node.label_end = None;
        node.children.clear();
        node.endpoints.clear();
        node.base = None;
        node.best_edges = None;
        node.best_edge = None;
        self.unused.push(b);
    }

    /// After expanding an inner blossom mid-stage, relabel the sub-blossoms
    /// on the even path from the entry child to the base as inner/outer.
    fn relabel_expanded(&mut self, b: usize, children: &[usize], label_end: usize) {
        let endps = self.nodes[b].endpoints.clone();
        let entry = self.in_blossom[self.endpoint[label_end ^ 1]];
        let Some(pos) = children.iter().position(|&c| c == entry) else {
            return;
        };

        let mut j = pos as isize;
        let (step, trick) = if j & 1 == 1 {
            j -= children.len() as isize;
            (1, 0)
        } else {
            (-1, 1)
        };
        let flip = trick as usize;

        let mut p = label_end;
        while j != 0 {
            let q = cyclic(&endps, j - trick);
            self.nodes[self.endpoint[p ^ 1]].label = Label::Free;
            self.nodes[self.endpoint[q ^ flip ^ 1]].label = Label::Free;
            self.assign_label(self.endpoint[p ^ 1], Label::Inner, Some(p));
            self.allow_edge[q / 2] = true;
            j += step;
            p = cyclic(&endps, j - trick) ^ flip;
            self.allow_edge[p / 2] = true;
            j += step;
        }

        let bv = cyclic(children, j);
        let ep = self.endpoint[p ^ 1];
        for id in [ep, bv] {
            self.nodes[id].label = Label::Inner;
            self.nodes[id].label_end = Some(p);
        }
        self.nodes[bv].best_edge = None;
        j += step;

        while cyclic(children, j) != entry {
            let bv = cyclic(children, j);
            j += step;
            if self.nodes[bv].label == Label::Outer {
                continue;
            }
            let reached = self
                .leaves(bv)
                .into_iter()
                .find(|&v| self.nodes[v].label != Label::Free);
            if let Some(v) = reached {
                self.nodes[v].label = Label::Free;
                if let Some(m) = self.nodes[bv].base.and_then(|base| self.mate[base]) {
                    self.nodes[self.endpoint[m]].label = Label::Free;
                }
                let via = self.nodes[v].label_end;
                self.assign_label(v, Label::Inner, via);
            }
        }
    }

    /// Swap matched and unmatched edges on the path from `v` to the base of `b`
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.nodes[t].parent != Some(b) {
            match self.nodes[t].parent {
                Some(parent) => t = parent,
                None => return,
            }
        }
        if self.nodes[t].is_blossom() {
            self.augment_blossom(t, v);
        }

        let children = self.nodes[b].children.clone();
        let endps = self.nodes[b].endpoints.clone();
        let Some(i) = children.iter().position(|&c| c == t) else {
            return;
        };

        let mut j = i as isize;
        let (step, trick) = if i & 1 == 1 {
            j -= children.len() as isize;
            (1, 0)
        } else {
            (-1, 1)
        };
        let flip = trick as usize;

        while j != 0 {
            j += step;
            let t = cyclic(&children, j);
            let p = cyclic(&endps, j - trick) ^ flip;
            if self.nodes[t].is_blossom() {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += step;
            let t = cyclic(&children, j);
            if self.nodes[t].is_blossom() {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = Some(p ^ 1);
            self.mate[self.endpoint[p ^ 1]] = Some(p);
        }

        let node = &mut self.nodes[b];
        node.children.rotate_left(i);
        node.endpoints.rotate_left(i);
        let first = node.children[0];
        self.nodes[b].base = self.nodes[first].base;
    }

    /// Flip the augmenting path through edge `k` between two tree roots
    fn augment_matching(&mut self, k: usize) {
        let Edge { u, v, .. } = self.edges[k];
        for (mut s, mut p) in [(u, 2 * k + 1), (v, 2 * k)] {
            loop {
                let bs = self.in_blossom[s];
                if self.nodes[bs].is_blossom() {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = Some(p);
                let Some(e) = self.nodes[bs].label_end else {
                    break;
                };
                let bt = self.in_blossom[self.endpoint[e]];
                let Some(et) = self.nodes[bt].label_end else {
                    break;
                };
                s = self.endpoint[et];
                let j = self.endpoint[et ^ 1];
                if self.nodes[bt].is_blossom() {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = Some(et);
                p = et ^ 1;
            }
        }
    }

    /// Scan the neighbours of outer vertex `v`. Returns true on augmentation.
    fn scan_vertex(&mut self, v: usize) -> bool {
        for idx in 0..self.neighbend[v].len() {
            let p = self.neighbend[v][idx];
            let k = p / 2;
            let w = self.endpoint[p];
            if self.in_blossom[v] == self.in_blossom[w] {
                continue;
            }

            let mut kslack = 0;
            if !self.allow_edge[k] {
                kslack = self.slack(k);
                if kslack <= 0 {
                    self.allow_edge[k] = true;
                }
            }

            let w_label = self.top_label(w);
            if self.allow_edge[k] {
                match w_label {
                    Label::Free => self.assign_label(w, Label::Inner, Some(p ^ 1)),
                    Label::Outer => match self.scan_blossom(v, w) {
                        Some(base) => self.add_blossom(base, k),
                        None => {
                            self.augment_matching(k);
                            return true;
                        }
                    },
                    Label::Inner => {
                        if self.nodes[w].label == Label::Free {
                            self.nodes[w].label = Label::Inner;
                            self.nodes[w].label_end = Some(p ^ 1);
                        }
                    }
                }
            } else if w_label == Label::Outer {
                let b = self.in_blossom[v];
                if self.nodes[b]
                    .best_edge
                    .map_or(true, |cur| kslack < self.slack(cur))
                {
                    self.nodes[b].best_edge = Some(k);
                }
            } else if self.nodes[w].label == Label::Free
                && self.nodes[w]
                    .best_edge
                    .map_or(true, |cur| kslack < self.slack(cur))
            {
                self.nodes[w].best_edge = Some(k);
            }
        }
        false
    }

    fn is_top_blossom(&self, b: usize) -> bool {
        self.nodes[b].is_blossom() && self.nodes[b].base.is_some() && self.nodes[b].parent.is_none()
    }

    /// Pick the smallest dual change that creates a tight edge or
    /// exhausts an inner blossom, and apply it.
    fn adjust_duals(&mut self) -> Delta {
        let mut best: Option<(i64, Delta)> = None;
        let consider = |d: i64, kind: Delta, best: &mut Option<(i64, Delta)>| {
            if best.as_ref().map_or(true, |(cur, _)| d < *cur) {
                *best = Some((d, kind));
            }
        };

        let min_vertex_dual = (0..self.n).map(|v| self.nodes[v].dual).min().unwrap_or(0);
        if self.mode == MatchMode::MaxWeight {
            best = Some((min_vertex_dual, Delta::Done));
        }

        for v in 0..self.n {
            if self.top_label(v) == Label::Free {
                if let Some(k) = self.nodes[v].best_edge {
                    consider(self.slack(k), Delta::FreeEdge(k), &mut best);
                }
            }
        }

        for b in 0..2 * self.n {
            let node = &self.nodes[b];
            if node.parent.is_none() && node.label == Label::Outer {
                if let Some(k) = node.best_edge {
                    consider(self.slack(k) / 2, Delta::OuterEdge(k), &mut best);
                }
            }
        }

        for b in 0..2 * self.n {
            if self.is_top_blossom(b) && self.nodes[b].label == Label::Inner {
                consider(self.nodes[b].dual, Delta::Expand(b), &mut best);
            }
        }

        let (delta, kind) = best.unwrap_or((min_vertex_dual.max(0), Delta::Done));

        for v in 0..self.n {
            match self.top_label(v) {
                Label::Outer => self.nodes[v].dual -= delta,
                Label::Inner => self.nodes[v].dual += delta,
                Label::Free => {}
            }
        }
        for b in 0..2 * self.n {
            if self.is_top_blossom(b) {
                match self.nodes[b].label {
                    Label::Outer => self.nodes[b].dual += delta,
                    Label::Inner => self.nodes[b].dual -= delta,
                    Label::Free => {}
                }
            }
        }

        kind
    }

    fn solve(mut self) -> Matching {
        for _stage in 0..self.n {
            for node in &mut self.nodes {
                node.label = Label::Free;
                node.best_edge = None;
                if node.is_blossom() {
                    node.best_edges = None;
                }
            }
            self.allow_edge.fill(false);
            self.queue.clear();

            for v in 0..self.n {
                if self.mate[v].is_none() && self.top_label(v) == Label::Free {
                    self.assign_label(v, Label::Outer, None);
                }
            }

            let mut augmented = false;
            loop {
                while let Some(v) = self.queue.pop() {
                    if self.scan_vertex(v) {
                        augmented = true;
                        break;
                    }
                }
                if augmented {
                    break;
                }

                match self.adjust_duals() {
                    Delta::Done => break,
                    Delta::FreeEdge(k) => {
                        self.allow_edge[k] = true;
                        let e = self.edges[k];
                        let outer = if self.top_label(e.u) == Label::Free {
                            e.v
                        } else {
                            e.u
                        };
                        self.queue.push(outer);
                    }
                    Delta::OuterEdge(k) => {
                        self.allow_edge[k] = true;
                        self.queue.push(self.edges[k].u);
                    }
                    Delta::Expand(b) => self.expand_blossom(b, false),
                }
            }

            if !augmented {
                break;
            }

            for b in 0..2 * self.n {
                if self.is_top_blossom(b)
                    && self.nodes[b].label == Label::Outer
                    && self.nodes[b].dual == 0
                {
                    self.expand_blossom(b, true);
                }
            }
        }

        let mate = self
            .mate
            .iter()
            .map(|m| m.map(|p| self.endpoint[p]))
            .collect();
        Matching { mate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(list: &[(usize, usize, i64)]) -> Vec<Edge> {
        list.iter().map(|&(u, v, w)| Edge::new(u, v, w)).collect()
    }

    #[test]
    fn test_empty_edges_yield_empty_matching() {
        let m = max_weight_matching(4, &[], MatchMode::MaxCardinality);
        assert!(m.is_empty());
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.pairs(), vec![]);
    }

    #[test]
    fn test_single_edge() {
        let m = max_weight_matching(0, &edges(&[(0, 1, 1)]), MatchMode::MaxCardinality);
        assert_eq!(m.pairs(), vec![(0, 1)]);
        assert!(m.is_perfect());
    }

    #[test]
    fn test_self_loop_ignored() {
        let m = max_weight_matching(2, &edges(&[(0, 0, 100)]), MatchMode::MaxCardinality);
        assert!(m.is_empty());
    }

    #[test]
    fn test_path_prefers_heavier_middle_without_cardinality() {
        let e = edges(&[(1, 2, 10), (2, 3, 11)]);
        let m = max_weight_matching(0, &e, MatchMode::MaxWeight);
        assert_eq!(m.pairs(), vec![(2, 3)]);
    }

    #[test]
    fn test_cardinality_beats_weight() {
        // 1-2 heavy, but 0-1 + 2-3 covers everything
        let e = edges(&[(0, 1, 2), (1, 2, 10), (2, 3, 2)]);
        let mw = max_weight_matching(0, &e, MatchMode::MaxWeight);
        assert_eq!(mw.pairs(), vec![(1, 2)]);
        let mc = max_weight_matching(0, &e, MatchMode::MaxCardinality);
        assert_eq!(mc.pairs(), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_negative_weights_with_max_cardinality() {
        let e = edges(&[(0, 1, -5), (2, 3, -5), (0, 2, -1), (1, 3, -1)]);
        let m = max_weight_matching(0, &e, MatchMode::MaxCardinality);
        assert_eq!(m.pairs(), vec![(0, 2), (1, 3)]);
        let mw = max_weight_matching(0, &e, MatchMode::MaxWeight);
        assert!(mw.is_empty());
    }

    #[test]
    fn test_blossom_triangle_with_tail() {
        // odd cycle 1-2-3 with pendant 0-1 and 3-4
        let e = edges(&[(1, 2, 8), (1, 3, 9), (2, 3, 10), (3, 4, 7)]);
        let m = max_weight_matching(0, &e, MatchMode::MaxWeight);
        assert_eq!(m.pairs(), vec![(1, 2), (3, 4)]);
        let e = edges(&[(1, 2, 8), (1, 3, 9), (2, 3, 10), (3, 4, 7), (1, 6, 5), (4, 5, 6)]);
        let m = max_weight_matching(0, &e, MatchMode::MaxCardinality);
        assert_eq!(m.pairs(), vec![(1, 6), (2, 3), (4, 5)]);
    }

    #[test]
    fn test_nested_blossom_expansion() {
        // create nested S-blossom, relabel as T, expand
        let e = edges(&[
            (1, 2, 19),
            (1, 3, 20),
            (1, 8, 8),
            (2, 3, 25),
            (2, 4, 18),
            (3, 5, 18),
            (4, 5, 13),
            (4, 7, 7),
            (5, 6, 7),
        ]);
        let m = max_weight_matching(0, &e, MatchMode::MaxWeight);
        assert_eq!(m.pairs(), vec![(1, 8), (2, 3), (4, 7), (5, 6)]);
    }

    #[test]
    fn test_blossom_relabel_after_expand() {
        // create blossom, relabel as T in more than one way, expand, augment
        let e = edges(&[
            (1, 2, 45),
            (1, 5, 45),
            (2, 3, 50),
            (3, 4, 45),
            (4, 5, 50),
            (1, 6, 30),
            (3, 9, 35),
            (4, 8, 35),
            (5, 7, 26),
            (9, 10, 5),
        ]);
        let m = max_weight_matching(0, &e, MatchMode::MaxWeight);
        assert_eq!(m.pairs(), vec![(1, 6), (2, 3), (4, 8), (5, 7), (9, 10)]);
    }

    #[test]
    fn test_isolated_vertex_stays_unmatched() {
        let m = max_weight_matching(3, &edges(&[(0, 1, 4)]), MatchMode::MaxCardinality);
        assert_eq!(m.mate(2), None);
        assert_eq!(m.mate(0), Some(1));
        assert_eq!(m.len(), 1);
    }
}
