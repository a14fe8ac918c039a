// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Loop scoring: from per-edge weights to the Normalised Weighted Loop Value.
//!
//! Every "normalized" metric is relative to the maximum over the loop set
//! being scored, so scores from different passes are not comparable.  A
//! normalization with no usable maximum yields `None` rather than NaN.

use std::collections::HashSet;

use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

use crate::common::round3;
use crate::frequency::FactorFrequency;
use crate::graph::CausalGraph;
use crate::polarity::cycle_links;
use crate::weight::PairwiseWeight;

/// Weights of the three terms of the weighted loop value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    pub composite: f64,
    pub steer: f64,
    pub independence: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Coefficients {
            composite: 1.0,
            steer: 1.0,
            independence: 1.0,
        }
    }
}

/// Which overlap-derived metric is reported as the CIV.
///
/// Note that both grow with overlap: a loop made of frequently shared
/// factors scores *higher*.  Downstream rankings depend on that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndependenceMode {
    #[default]
    NormalizedOverlap,
    NormalizedAdjustedIndependent,
}

impl IndependenceMode {
    pub fn from_toggle(use_adjusted: bool) -> Self {
        if use_adjusted {
            IndependenceMode::NormalizedAdjustedIndependent
        } else {
            IndependenceMode::NormalizedOverlap
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopScores {
    pub raw_composite_value: f64,
    /// aLCV: geometric mean of the absolute raw value over the loop length.
    pub adjusted_composite_value: Option<f64>,
    /// nLCV
    pub normalized_composite_value: Option<f64>,
    /// SFC
    pub steering_factor_count: usize,
    #[serde(rename = "normalizedSFC")]
    pub normalized_sfc: Option<f64>,
    pub total_overlap: usize,
    pub normalized_overlap: Option<f64>,
    pub adjusted_independent_value: Option<f64>,
    pub normalized_adjusted_independent_value: Option<f64>,
    /// CIV
    pub conditional_independence_value: Option<f64>,
    pub weighted_loop_value: Option<f64>,
    /// nWLV, on a 0-100 scale.
    pub normalized_weighted_loop_value: Option<f64>,
}

pub struct LoopScorer<'a> {
    graph: &'a CausalGraph,
    weight: &'a dyn PairwiseWeight,
    steering: HashSet<usize>,
    coefficients: Coefficients,
    independence: IndependenceMode,
}

impl<'a> LoopScorer<'a> {
    pub fn new(graph: &'a CausalGraph, weight: &'a dyn PairwiseWeight) -> Self {
        LoopScorer {
            graph,
            weight,
            steering: HashSet::new(),
            coefficients: Coefficients::default(),
            independence: IndependenceMode::default(),
        }
    }

    /// Ids that aren't nodes of the graph are ignored, and don't count
    /// toward the size of the steering set.
    pub fn with_steering_factors<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.steering = ids
            .into_iter()
            .filter_map(|id| self.graph.index_of(id.as_ref()))
            .collect();
        self
    }

    pub fn with_coefficients(mut self, coefficients: Coefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_independence(mut self, independence: IndependenceMode) -> Self {
        self.independence = independence;
        self
    }

    pub fn steering_set_size(&self) -> usize {
        self.steering.len()
    }

    /// Product of pairwise weights around the loop, wrap-around edge
    /// included.  Non-finite weights are skipped.
    pub fn raw_composite_value(&self, cycle: &[usize]) -> f64 {
        let product: f64 = cycle_links(cycle)
            .map(|(from, to)| self.weight.weight(self.graph.id(from), self.graph.id(to)))
            .filter(|w| w.is_finite())
            .product();
        round3(product)
    }

    pub fn score(&self, cycles: &[Vec<usize>], frequency: &FactorFrequency) -> Vec<LoopScores> {
        let mut scores: Vec<LoopScores> = cycles
            .iter()
            .map(|cycle| self.score_one(cycle, frequency))
            .collect();

        let max_alcv = max_of(scores.iter().map(|s| s.adjusted_composite_value));
        let max_overlap = max_of(scores.iter().map(|s| Some(s.total_overlap as f64)));
        for s in scores.iter_mut() {
            s.normalized_composite_value = ratio(s.adjusted_composite_value, max_alcv).map(round3);
            s.normalized_overlap = ratio(Some(s.total_overlap as f64), max_overlap).map(round3);
        }

        for (s, cycle) in scores.iter_mut().zip(cycles) {
            s.adjusted_independent_value = s
                .normalized_overlap
                .map(|overlap| round3(cycle.len() as f64 * overlap));
        }
        let max_adjusted = max_of(scores.iter().map(|s| s.adjusted_independent_value));
        for s in scores.iter_mut() {
            s.normalized_adjusted_independent_value =
                ratio(s.adjusted_independent_value, max_adjusted).map(round3);
            s.conditional_independence_value = match self.independence {
                IndependenceMode::NormalizedOverlap => s.normalized_overlap,
                IndependenceMode::NormalizedAdjustedIndependent => {
                    s.normalized_adjusted_independent_value
                }
            };
            s.weighted_loop_value = self.weighted_loop_value(s);
        }

        let max_wlv = max_of(scores.iter().map(|s| s.weighted_loop_value));
        for s in scores.iter_mut() {
            s.normalized_weighted_loop_value = ratio(s.weighted_loop_value, max_wlv)
                .map(|r| round3(r * 100.0))
                .filter(|v| v.is_finite());
        }

        scores
    }

    /// The per-loop metrics that don't depend on the rest of the loop set.
    fn score_one(&self, cycle: &[usize], frequency: &FactorFrequency) -> LoopScores {
        let raw = self.raw_composite_value(cycle);
        let alcv = finite(round3(raw.abs().powf(1.0 / cycle.len() as f64)));

        let sfc = cycle.iter().filter(|n| self.steering.contains(n)).count();
        let nsfc = if self.steering.is_empty() {
            None
        } else {
            Some(round3(sfc as f64 / self.steering.len() as f64))
        };

        LoopScores {
            raw_composite_value: raw,
            adjusted_composite_value: alcv,
            normalized_composite_value: None,
            steering_factor_count: sfc,
            normalized_sfc: nsfc,
            total_overlap: frequency.total_overlap(cycle),
            normalized_overlap: None,
            adjusted_independent_value: None,
            normalized_adjusted_independent_value: None,
            conditional_independence_value: None,
            weighted_loop_value: None,
            normalized_weighted_loop_value: None,
        }
    }

    /// Not-applicable terms contribute nothing; the value itself is only
    /// `None` when every term is.
    fn weighted_loop_value(&self, s: &LoopScores) -> Option<f64> {
        let c = &self.coefficients;
        let terms = [
            (s.normalized_composite_value, c.composite),
            (s.normalized_sfc, c.steer),
            (s.conditional_independence_value, c.independence),
        ];
        if terms.iter().all(|(value, _)| value.is_none()) {
            return None;
        }
        let sum: f64 = terms
            .iter()
            .filter_map(|(value, coefficient)| value.map(|v| v * coefficient))
            .sum();
        finite(round3(sum * 100.0))
    }
}

fn finite(v: f64) -> Option<f64> {
    if v.is_finite() { Some(v) } else { None }
}

fn max_of<I>(values: I) -> Option<f64>
where
    I: Iterator<Item = Option<f64>>,
{
    values.flatten().filter(|v| v.is_finite()).reduce(f64::max)
}

/// `value / max`, or `None` when the maximum is missing, non-finite or not positive.
fn ratio(value: Option<f64>, max: Option<f64>) -> Option<f64> {
    let (value, max) = (value?, max?);
    if !max.is_finite() || max <= 0.0 || approx_eq!(f64, max, 0.0) {
        return None;
    }
    finite(value / max)
}
