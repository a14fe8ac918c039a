// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Rotation-invariant, direction-preserving cycle identity.

use std::collections::HashSet;

use crate::graph::CausalGraph;

/// Joins node ids inside a canonical key.  A control character, so ids
/// that contain arrows or commas can't collide.
pub const KEY_SEPARATOR: char = '\u{1}';

/// The lexicographically smallest rotation of `ids`, joined with
/// [`KEY_SEPARATOR`].  A cycle and its reverse produce different keys.
pub fn canonical_key<S: AsRef<str>>(ids: &[S]) -> String {
    let n = ids.len();
    let mut best: Option<String> = None;
    for start in 0..n {
        let mut key = String::new();
        for i in 0..n {
            if i > 0 {
                key.push(KEY_SEPARATOR);
            }
            key.push_str(ids[(start + i) % n].as_ref());
        }
        if best.as_ref().is_none_or(|b| key < *b) {
            best = Some(key);
        }
    }
    best.unwrap_or_default()
}

/// Canonical key of a cycle given as node indices of `graph`.
pub fn cycle_key(graph: &CausalGraph, cycle: &[usize]) -> String {
    let ids: Vec<&str> = cycle.iter().map(|&i| graph.id(i)).collect();
    canonical_key(&ids)
}

/// Accumulates cycles, keeping only the first occurrence of each canonical key.
#[derive(Debug, Default)]
pub struct CycleSet {
    seen: HashSet<String>,
    cycles: Vec<Vec<usize>>,
}

impl CycleSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns false if an equivalent rotation was already present.
    pub fn insert(&mut self, graph: &CausalGraph, cycle: &[usize]) -> bool {
        if !self.seen.insert(cycle_key(graph, cycle)) {
            return false;
        }
        self.cycles.push(cycle.to_vec());
        true
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn into_cycles(self) -> Vec<Vec<usize>> {
        self.cycles
    }
}

/// Drop rotations of cycles that appear earlier in `cycles`, preserving order.
pub fn dedupe(graph: &CausalGraph, cycles: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    let mut set = CycleSet::new();
    for cycle in cycles.iter() {
        set.insert(graph, cycle);
    }
    set.into_cycles()
}
