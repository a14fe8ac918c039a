// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Ordering and filtering of analysed loops for listing.

use std::cmp::Ordering;
use std::str::FromStr;

use ordered_float::OrderedFloat;

use crate::analysis::Loop;
use crate::common::{Error, ErrorCode, ErrorKind};
use crate::polarity::LoopPolarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Length,
    RawCompositeValue,
    AdjustedCompositeValue,
    NormalizedCompositeValue,
    SteeringFactorCount,
    NormalizedSfc,
    ConditionalIndependenceValue,
    WeightedLoopValue,
    NormalizedWeightedLoopValue,
}

impl SortKey {
    fn value(self, l: &Loop) -> Option<f64> {
        let s = &l.scores;
        match self {
            SortKey::Length => Some(l.length as f64),
            SortKey::RawCompositeValue => Some(s.raw_composite_value).filter(|v| v.is_finite()),
            SortKey::AdjustedCompositeValue => s.adjusted_composite_value,
            SortKey::NormalizedCompositeValue => s.normalized_composite_value,
            SortKey::SteeringFactorCount => Some(s.steering_factor_count as f64),
            SortKey::NormalizedSfc => s.normalized_sfc,
            SortKey::ConditionalIndependenceValue => s.conditional_independence_value,
            SortKey::WeightedLoopValue => s.weighted_loop_value,
            SortKey::NormalizedWeightedLoopValue => s.normalized_weighted_loop_value,
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "length" => SortKey::Length,
            "raw" => SortKey::RawCompositeValue,
            "alcv" => SortKey::AdjustedCompositeValue,
            "nlcv" => SortKey::NormalizedCompositeValue,
            "sfc" => SortKey::SteeringFactorCount,
            "nsfc" => SortKey::NormalizedSfc,
            "civ" => SortKey::ConditionalIndependenceValue,
            "wlv" => SortKey::WeightedLoopValue,
            "nwlv" => SortKey::NormalizedWeightedLoopValue,
            _ => {
                return Err(Error::new(
                    ErrorKind::Options,
                    ErrorCode::BadSortKey,
                    Some(format!("unknown sort key '{s}'")),
                ));
            }
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort by a metric.  Loops without a value (`None`) go last in either
/// direction; ties keep their current relative order.
pub fn sort_loops(loops: &mut [Loop], key: SortKey, direction: SortDirection) {
    loops.sort_by(|a, b| match (key.value(a), key.value(b)) {
        (Some(va), Some(vb)) => {
            let ord = OrderedFloat(va).cmp(&OrderedFloat(vb));
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarityOrder {
    ReinforcingFirst,
    BalancingFirst,
}

/// Group loops by polarity, uncoded always last, shortest first within a group.
pub fn sort_by_polarity(loops: &mut [Loop], order: PolarityOrder) {
    let rank = |p: LoopPolarity| match (order, p) {
        (_, LoopPolarity::Uncoded) => 2,
        (PolarityOrder::ReinforcingFirst, LoopPolarity::Reinforcing) => 0,
        (PolarityOrder::BalancingFirst, LoopPolarity::Balancing) => 0,
        _ => 1,
    };
    loops.sort_by(|a, b| {
        rank(a.polarity)
            .cmp(&rank(b.polarity))
            .then_with(|| a.length.cmp(&b.length))
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Loops with a node whose label or id contains `term`, ignoring case.
/// An empty term matches everything.
pub fn filter_loops<'a>(loops: &'a [Loop], term: &str) -> Vec<&'a Loop> {
    let term = term.trim().to_lowercase();
    loops
        .iter()
        .filter(|l| {
            term.is_empty()
                || l
                    .labels
                    .iter()
                    .chain(l.nodes.iter())
                    .any(|name| name.to_lowercase().contains(&term))
        })
        .collect()
}
