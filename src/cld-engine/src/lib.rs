// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Feedback loop identification and scoring for causal loop diagrams.
//!
//! Given a signed, weighted directed graph of factors and influences, the
//! engine enumerates its simple cycles within configured bounds, removes
//! rotations of the same cycle, classifies each loop as reinforcing,
//! balancing or uncoded, and ranks loops by their Normalised Weighted Loop
//! Value.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod canonical;
pub mod common;
pub mod cycles;
pub mod datamodel;
pub mod frequency;
pub mod graph;
pub mod json;
pub mod polarity;
pub mod render;
pub mod score;
pub mod sort;
pub mod weight;

#[cfg(test)]
mod cycles_proptest;
#[cfg(test)]
mod testutils;

pub use self::analysis::{
    AnalysisOptions, Loop, LoopAnalysis, analyze, analyze_diagram, analyze_with_cancel,
};
pub use self::common::{Error, ErrorCode, ErrorKind, NodeId, Result};
pub use self::cycles::{Enumeration, SearchBounds};
pub use self::datamodel::{Edge, Node};
pub use self::graph::CausalGraph;
pub use self::polarity::{LinkPolarity, LoopPolarity};
pub use self::score::{Coefficients, IndependenceMode, LoopScores};
pub use self::weight::{BlendedWeight, PairwiseWeight};
