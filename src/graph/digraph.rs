//! Ordered directed graph.

use crate::model::Entity;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Directed graph with insertion-ordered nodes.
///
/// An edge points from a dependent node to its dependency. Nodes are kept in
/// the order they were first seen, and each appears exactly once whether it
/// was added directly or as an edge endpoint. The node type's [`Ord`] must
/// agree with its display form, since query results are sorted by it.
///
/// The graph is only mutated while it is being built. All query methods take
/// `&self`, so a built graph can be shared across threads for reading.
#[derive(Debug, Clone)]
#[must_use]
pub struct Graph<N = Entity> {
    /// Dependencies of each node, in node insertion order
    edges_by_source: IndexMap<N, BTreeSet<N>>,
    /// Dependents of each node
    edges_by_target: HashMap<N, BTreeSet<N>>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            edges_by_source: IndexMap::new(),
            edges_by_target: HashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash + Ord> Graph<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node if it is not present yet.
    pub fn add_node(&mut self, node: N) {
        self.edges_by_source.entry(node).or_default();
    }

    /// Add `item` and an edge from it to each of `links`.
    pub fn add(&mut self, item: N, links: impl IntoIterator<Item = N>) {
        self.add_node(item.clone());
        for to in links {
            self.add_edge(item.clone(), to);
        }
    }

    /// Add an edge, inserting missing endpoints (source first).
    pub fn add_edge(&mut self, from: N, to: N) {
        self.add_node(from.clone());
        self.add_node(to.clone());
        self.edges_by_target
            .entry(to.clone())
            .or_default()
            .insert(from.clone());
        if let Some(deps) = self.edges_by_source.get_mut(&from) {
            deps.insert(to);
        }
    }

    /// Nodes sorted by ascending depth, ties broken by node order.
    ///
    /// For an acyclic graph this is a topological order: every dependency
    /// reaches strictly fewer nodes than its dependents do, so it sorts
    /// earlier.
    #[must_use]
    pub fn ordered(&self) -> Vec<N> {
        let mut keyed: Vec<(usize, &N)> = self
            .edges_by_source
            .keys()
            .map(|node| (self.depth(node), node))
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, node)| node.clone()).collect()
    }

    /// Direct dependencies of `node`, sorted. Empty for unknown nodes.
    #[must_use]
    pub fn dependencies_of(&self, node: &N) -> Vec<N> {
        self.edges_by_source
            .get(node)
            .map(|deps| deps.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Nodes that depend directly on `node`, sorted. Empty for unknown nodes.
    #[must_use]
    pub fn dependents_of(&self, node: &N) -> Vec<N> {
        self.edges_by_target
            .get(node)
            .map(|deps| deps.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of distinct nodes reachable from `node`, not counting `node`.
    ///
    /// Each node is visited once, so this terminates on cyclic graphs too. A
    /// node on a cycle does not count itself.
    #[must_use]
    pub fn depth(&self, node: &N) -> usize {
        let mut seen: HashSet<&N> = HashSet::new();
        seen.insert(node);
        let mut pending = vec![node];
        let mut count = 0;

        while let Some(from) = pending.pop() {
            let Some(deps) = self.edges_by_source.get(from) else {
                continue;
            };
            for to in deps {
                if seen.insert(to) {
                    count += 1;
                    pending.push(to);
                }
            }
        }

        count
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.edges_by_source.keys()
    }

    /// All edges as `(from, to)`, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(N, N)> {
        let mut edges: Vec<(N, N)> = self
            .edges_by_source
            .iter()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (from.clone(), to.clone())))
            .collect();
        edges.sort();
        edges
    }

    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.edges_by_source.contains_key(node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges_by_source.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges_by_source.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges_by_source.values().map(BTreeSet::len).sum()
    }
}

impl<N: fmt::Display> fmt::Display for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, deps) in &self.edges_by_source {
            writeln!(f, "{node}:")?;
            for dep in deps {
                writeln!(f, "- {dep}")?;
            }
        }
        Ok(())
    }
}
