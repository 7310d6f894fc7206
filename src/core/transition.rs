//! Transition edges and the whitelist that holds them.

use super::key::StateKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A directed (from, to) pair of state keys.
///
/// Equality is structural. Self-loops are legal only when authored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<K> {
    pub from: K,
    pub to: K,
}

impl<K: StateKey> Edge<K> {
    pub fn new(from: K, to: K) -> Self {
        Self { from, to }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Whitelist of permitted transitions.
///
/// Keeps insertion order for listing while membership checks go through a
/// hash set. Inserting an edge twice leaves the table unchanged.
#[derive(Clone, Debug)]
pub struct TransitionTable<K: StateKey> {
    ordered: Vec<Edge<K>>,
    lookup: HashSet<Edge<K>>,
}

impl<K: StateKey> Default for TransitionTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> TransitionTable<K> {
    pub fn new() -> Self {
        Self {
            ordered: Vec::new(),
            lookup: HashSet::new(),
        }
    }

    /// Add an edge. Returns `false` if it was already present.
    pub fn allow(&mut self, from: K, to: K) -> bool {
        let edge = Edge::new(from, to);
        if self.lookup.insert(edge) {
            self.ordered.push(edge);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, from: K, to: K) -> bool {
        self.lookup.contains(&Edge::new(from, to))
    }

    /// Edges in the order they were first allowed.
    pub fn edges(&self) -> &[Edge<K>] {
        &self.ordered
    }

    /// Targets reachable in one step from `from`, in insertion order.
    pub fn targets_from(&self, from: K) -> impl Iterator<Item = K> + '_ {
        self.ordered
            .iter()
            .filter(move |edge| edge.from == from)
            .map(|edge| edge.to)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl<K: StateKey> FromIterator<Edge<K>> for TransitionTable<K> {
    fn from_iter<I: IntoIterator<Item = Edge<K>>>(iter: I) -> Self {
        let mut table = Self::new();
        for edge in iter {
            table.allow(edge.from, edge.to);
        }
        table
    }
}
