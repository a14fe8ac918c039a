// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::Serialize;

use crate::common::NodeId;
use crate::graph::CausalGraph;

/// How many loops each factor takes part in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorFrequency {
    counts: Vec<usize>,
}

/// One row of the frequency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorCount {
    pub id: NodeId,
    pub label: String,
    pub loop_count: usize,
}

impl FactorFrequency {
    pub fn new(graph: &CausalGraph, cycles: &[Vec<usize>]) -> Self {
        let mut counts = vec![0usize; graph.node_count()];
        for cycle in cycles {
            // cycles are simple, so each node is counted once per loop
            for &node in cycle {
                counts[node] += 1;
            }
        }
        FactorFrequency { counts }
    }

    pub fn get(&self, node: usize) -> usize {
        self.counts.get(node).copied().unwrap_or(0)
    }

    /// Sum of the frequencies of a loop's nodes.
    pub fn total_overlap(&self, cycle: &[usize]) -> usize {
        cycle.iter().map(|&node| self.get(node)).sum()
    }

    /// Factors that appear in at least one loop, most frequent first, then by id.
    pub fn report(&self, graph: &CausalGraph) -> Vec<FactorCount> {
        let mut rows: Vec<FactorCount> = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(node, &loop_count)| FactorCount {
                id: graph.id(node).to_owned(),
                label: graph.label(node).to_owned(),
                loop_count,
            })
            .collect();
        rows.sort_by(|a, b| b.loop_count.cmp(&a.loop_count).then_with(|| a.id.cmp(&b.id)));
        rows
    }
}
