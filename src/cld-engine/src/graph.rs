// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use smallvec::SmallVec;
use tracing::debug;

use crate::datamodel::{Edge, Node};

/// Validated, indexed view of a diagram snapshot.
///
/// Nodes are stored sorted by id, so a node's index is its position in the
/// lexicographic total order the cycle search roots on.  At most one edge
/// is kept per ordered (source, target) pair and self-loops are dropped.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    /// Successor indices, ascending.
    successors: Vec<SmallVec<[usize; 4]>>,
    edges: HashMap<(usize, usize), Edge>,
}

impl CausalGraph {
    pub fn new<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = Edge>,
    {
        let mut nodes: Vec<Node> = nodes.into_iter().filter(|n| !n.id.is_empty()).collect();
        // stable, so the first occurrence of a duplicated id survives dedup_by
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes.dedup_by(|later, first| later.id == first.id);

        let index: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        let mut kept: HashMap<(usize, usize), Edge> = HashMap::new();
        let mut dangling = 0usize;
        let mut self_loops = 0usize;
        let mut parallel = 0usize;

        for edge in edges {
            let (Some(&from), Some(&to)) = (index.get(&edge.source), index.get(&edge.target))
            else {
                dangling += 1;
                continue;
            };
            if from == to {
                self_loops += 1;
                continue;
            }
            match kept.entry((from, to)) {
                Entry::Vacant(slot) => {
                    slot.insert(edge);
                }
                Entry::Occupied(mut slot) => {
                    parallel += 1;
                    if slot.get().impact_magnitude() < edge.impact_magnitude() {
                        slot.insert(edge);
                    }
                }
            }
        }

        if dangling + self_loops + parallel > 0 {
            debug!(
                dangling,
                self_loops, parallel, "dropped edges while building causal graph"
            );
        }

        let mut successors: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); nodes.len()];
        for &(from, to) in kept.keys() {
            successors[from].push(to);
        }
        for succ in successors.iter_mut() {
            succ.sort_unstable();
        }

        CausalGraph {
            nodes,
            index,
            successors,
            edges: kept,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn id(&self, idx: usize) -> &str {
        &self.nodes[idx].id
    }

    pub fn label(&self, idx: usize) -> &str {
        self.nodes[idx].display_label()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.successors[idx]
    }

    pub fn edge(&self, from: usize, to: usize) -> Option<&Edge> {
        self.edges.get(&(from, to))
    }

    /// Edge lookup by node ids rather than indices.
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&Edge> {
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        self.edge(from, to)
    }
}
