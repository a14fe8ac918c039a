// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Pairwise influence weights.
//!
//! The scorer only needs `weight(a, b)`; where that number comes from is up
//! to the caller.  `BlendedWeight` is the standard provider, blending each
//! edge's impact and control ratings as `W = α·I + (1 − α)·C`.

use crate::graph::CausalGraph;

/// Source of per-edge scalar weights, addressed by node id.
pub trait PairwiseWeight {
    fn weight(&self, from: &str, to: &str) -> f64;
}

impl<F> PairwiseWeight for F
where
    F: Fn(&str, &str) -> f64,
{
    fn weight(&self, from: &str, to: &str) -> f64 {
        self(from, to)
    }
}

/// `α·impact + (1 − α)·control`.  Missing or non-finite inputs count as 0,
/// including α itself.
pub fn blend(alpha: f64, impact: Option<f64>, control: Option<f64>) -> f64 {
    let finite_or_zero = |v: Option<f64>| v.filter(|v| v.is_finite()).unwrap_or(0.0);
    let alpha = finite_or_zero(Some(alpha));
    alpha * finite_or_zero(impact) + (1.0 - alpha) * finite_or_zero(control)
}

/// Weights derived from the impact/control ratings stored on the graph's edges.
pub struct BlendedWeight<'a> {
    graph: &'a CausalGraph,
    alpha: f64,
}

impl<'a> BlendedWeight<'a> {
    pub fn new(graph: &'a CausalGraph, alpha: f64) -> Self {
        BlendedWeight { graph, alpha }
    }
}

impl PairwiseWeight for BlendedWeight<'_> {
    fn weight(&self, from: &str, to: &str) -> f64 {
        match self.graph.edge_between(from, to) {
            Some(edge) => blend(self.alpha, edge.impact, edge.control),
            None => 0.0,
        }
    }
}
