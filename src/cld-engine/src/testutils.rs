// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::datamodel::{Edge, Node};
use crate::graph::CausalGraph;
use crate::polarity::LinkPolarity;

pub(crate) fn x_node(id: &str) -> Node {
    Node::new(id, "")
}

pub(crate) fn x_edge(
    source: &str,
    target: &str,
    sign: Option<LinkPolarity>,
    impact: f64,
    control: f64,
) -> Edge {
    Edge::new(source, target, sign).with_weights(Some(impact), Some(control))
}

pub(crate) fn x_graph(ids: &[&str], edges: Vec<Edge>) -> CausalGraph {
    CausalGraph::new(ids.iter().map(|id| x_node(id)), edges)
}

/// Every ordered pair of distinct nodes connected with a positive link.
pub(crate) fn complete_graph(n: usize) -> CausalGraph {
    let ids: Vec<String> = (0..n).map(|i| format!("n{i:02}")).collect();
    let mut edges = Vec::new();
    for a in &ids {
        for b in &ids {
            if a != b {
                edges.push(x_edge(a, b, Some(LinkPolarity::Positive), 1.0, 1.0));
            }
        }
    }
    CausalGraph::new(ids.iter().map(|id| x_node(id)), edges)
}
