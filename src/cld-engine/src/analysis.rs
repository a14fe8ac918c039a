// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The loop analysis pipeline: enumerate, dedupe, classify, score.
//!
//! Every call recomputes everything from the inputs; nothing is cached
//! between calls and the result is owned by the caller.

use std::collections::BTreeSet;
use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canonical::cycle_key;
use crate::common::{NodeId, Result};
use crate::cycles::{self, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN, DEFAULT_TOP_K, SearchBounds};
use crate::datamodel::{Edge, Node};
use crate::frequency::{FactorCount, FactorFrequency};
use crate::graph::CausalGraph;
use crate::options_err;
use crate::polarity::{self, LoopPolarity};
use crate::render::{loop_path, pairwise_details};
use crate::score::{Coefficients, IndependenceMode, LoopScorer, LoopScores};
use crate::weight::{BlendedWeight, PairwiseWeight};

pub const DEFAULT_ALPHA: f64 = 0.5;

/// Everything that parameterizes a pass besides the diagram itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub max_len: usize,
    pub min_len: usize,
    pub top_k: usize,
    /// Blend between impact (1.0) and control (0.0) for pairwise weights.
    pub alpha: f64,
    pub steering_factors: BTreeSet<NodeId>,
    pub coefficients: Coefficients,
    /// Report the length-adjusted overlap as the CIV instead of the plain
    /// normalized overlap.
    pub use_adjusted_independence: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            max_len: DEFAULT_MAX_LEN,
            min_len: DEFAULT_MIN_LEN,
            top_k: DEFAULT_TOP_K,
            alpha: DEFAULT_ALPHA,
            steering_factors: BTreeSet::new(),
            coefficients: Coefficients::default(),
            use_adjusted_independence: false,
        }
    }
}

impl AnalysisOptions {
    /// Reject options a user most likely got wrong.  `analyze` itself
    /// accepts anything and simply finds no loops for degenerate bounds.
    pub fn validate(&self) -> Result<()> {
        if self.max_len < 2 {
            return options_err!(
                BadMaxLength,
                format!("max_len must be at least 2, not {}", self.max_len)
            );
        }
        if self.min_len < 2 || self.min_len > self.max_len {
            return options_err!(
                BadMinLength,
                format!(
                    "min_len must be between 2 and max_len ({}), not {}",
                    self.max_len, self.min_len
                )
            );
        }
        if self.top_k == 0 {
            return options_err!(BadLoopLimit, "top_k must be positive".to_owned());
        }
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return options_err!(
                BadBlendCoefficient,
                format!("alpha must be within [0, 1], not {}", self.alpha)
            );
        }
        let c = &self.coefficients;
        for (name, value) in [
            ("composite", c.composite),
            ("steer", c.steer),
            ("independence", c.independence),
        ] {
            if !value.is_finite() {
                return options_err!(
                    BadScoringCoefficient,
                    format!("{name} coefficient must be finite")
                );
            }
        }
        Ok(())
    }

    pub fn bounds(&self) -> SearchBounds {
        SearchBounds {
            max_len: self.max_len,
            min_len: self.min_len,
            top_k: self.top_k,
        }
    }
}

/// A scored feedback loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loop {
    /// `r1`, `b1`, `u1`, ...; stable only for identical inputs.
    pub id: String,
    pub nodes: Vec<NodeId>,
    pub labels: Vec<String>,
    pub length: usize,
    pub polarity: LoopPolarity,
    /// STELLA-style rendering, e.g. `a ->(+) b ->(-) a`.
    pub path: String,
    pub pairwise_details: String,
    #[serde(skip)]
    pub key: String,
    #[serde(flatten)]
    pub scores: LoopScores,
}

impl Loop {
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopAnalysis {
    pub loops: Vec<Loop>,
    /// The loop limit was reached, so `loops` may be incomplete.
    pub truncated: bool,
    pub cancelled: bool,
    pub factors: Vec<FactorCount>,
}

/// Build the graph from raw records and score with impact/control blended
/// by `options.alpha`.
pub fn analyze_diagram<N, E>(nodes: N, edges: E, options: &AnalysisOptions) -> LoopAnalysis
where
    N: IntoIterator<Item = Node>,
    E: IntoIterator<Item = Edge>,
{
    let graph = CausalGraph::new(nodes, edges);
    let weights = BlendedWeight::new(&graph, options.alpha);
    analyze(&graph, &weights, options)
}

pub fn analyze(
    graph: &CausalGraph,
    weight: &dyn PairwiseWeight,
    options: &AnalysisOptions,
) -> LoopAnalysis {
    analyze_with_cancel(graph, weight, options, None)
}

/// Setting `cancel` aborts the cycle search; the loops found up to that
/// point are still scored (against each other only) and returned.
pub fn analyze_with_cancel(
    graph: &CausalGraph,
    weight: &dyn PairwiseWeight,
    options: &AnalysisOptions,
    cancel: Option<&AtomicBool>,
) -> LoopAnalysis {
    let found = cycles::enumerate_with_cancel(graph, options.bounds(), cancel);
    let frequency = FactorFrequency::new(graph, &found.cycles);

    let scores = LoopScorer::new(graph, weight)
        .with_steering_factors(&options.steering_factors)
        .with_coefficients(options.coefficients)
        .with_independence(IndependenceMode::from_toggle(
            options.use_adjusted_independence,
        ))
        .score(&found.cycles, &frequency);

    let mut loops: Vec<Loop> = found
        .cycles
        .iter()
        .zip(scores)
        .map(|(cycle, scores)| Loop {
            id: String::new(),
            nodes: cycle.iter().map(|&n| graph.id(n).to_owned()).collect(),
            labels: cycle.iter().map(|&n| graph.label(n).to_owned()).collect(),
            length: cycle.len(),
            polarity: polarity::classify(cycle, graph),
            path: loop_path(graph, cycle),
            pairwise_details: pairwise_details(graph, weight, cycle),
            key: cycle_key(graph, cycle),
            scores,
        })
        .collect();

    assign_loop_ids(&mut loops);

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        loops = loops.len(),
        truncated = found.truncated,
        "loop analysis complete"
    );

    LoopAnalysis {
        loops,
        truncated: found.truncated,
        cancelled: found.cancelled,
        factors: frequency.report(graph),
    }
}

/// Put loops in their default order (shortest first, then by rendered
/// path) and number them per polarity in that order.
fn assign_loop_ids(loops: &mut [Loop]) {
    loops.sort_by(|a, b| {
        a.length
            .cmp(&b.length)
            .then_with(|| a.path.cmp(&b.path))
            .then_with(|| a.key.cmp(&b.key))
    });

    let mut counters = [0usize; 3];
    for l in loops.iter_mut() {
        let slot = match l.polarity {
            LoopPolarity::Reinforcing => 0,
            LoopPolarity::Balancing => 1,
            LoopPolarity::Uncoded => 2,
        };
        counters[slot] += 1;
        l.id = format!("{}{}", l.polarity.id_prefix(), counters[slot]);
    }
}
