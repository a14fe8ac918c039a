// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Bounded enumeration of simple directed cycles.
//!
//! Each cycle is found from its least vertex: the search rooted at `s` only
//! ever steps to vertices ordered at or after `s`.  This replaces the
//! block/unblock bookkeeping of Johnson's algorithm; the extra revisits it
//! costs are bounded by `max_len` and `top_k`.  Both limits are enforced
//! inside the search, so runtime on dense graphs is bounded by them rather
//! than by the (exponential) number of simple cycles.

use std::sync::atomic::{AtomicBool, Ordering};

use smallvec::{SmallVec, smallvec};
use tracing::{debug, warn};

use crate::canonical::CycleSet;
use crate::graph::CausalGraph;

pub const DEFAULT_MAX_LEN: usize = 8;
pub const DEFAULT_MIN_LEN: usize = 2;
pub const DEFAULT_TOP_K: usize = 1000;

/// Resource limits for a single enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBounds {
    /// Longest cycle (in nodes) to report.
    pub max_len: usize,
    /// Shortest cycle to report; 2 includes mutual A<->B influences.
    pub min_len: usize,
    /// Stop searching once this many distinct cycles have been found.
    pub top_k: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        SearchBounds {
            max_len: DEFAULT_MAX_LEN,
            min_len: DEFAULT_MIN_LEN,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Cycles found by a search, as node indices without a repeated start.
#[derive(Debug, Default)]
pub struct Enumeration {
    pub cycles: Vec<Vec<usize>>,
    /// The `top_k` cap was reached; more cycles may exist.
    pub truncated: bool,
    /// The search was aborted through the cancellation flag.
    pub cancelled: bool,
}

pub fn enumerate(graph: &CausalGraph, bounds: SearchBounds) -> Enumeration {
    enumerate_with_cancel(graph, bounds, None)
}

/// Like [`enumerate`], but polls `cancel` on every search step and returns
/// what was found so far once it is set.
pub fn enumerate_with_cancel(
    graph: &CausalGraph,
    bounds: SearchBounds,
    cancel: Option<&AtomicBool>,
) -> Enumeration {
    let min_len = bounds.min_len.max(2);
    if bounds.top_k == 0 || bounds.max_len < min_len {
        debug!(?bounds, "search bounds admit no cycles");
        return Enumeration::default();
    }

    let n = graph.node_count();
    let mut found = CycleSet::new();
    let mut on_path = vec![false; n];
    let mut truncated = false;
    let mut cancelled = false;

    'roots: for root in 0..n {
        // current path, and for each path entry the next successor to try
        let mut path: SmallVec<[usize; 12]> = smallvec![root];
        let mut cursors: SmallVec<[usize; 12]> = smallvec![0];
        on_path[root] = true;

        while let Some(&v) = path.last() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break 'roots;
            }

            let succ = graph.successors(v);
            let depth = path.len() - 1;
            let cursor = cursors[depth];
            if cursor >= succ.len() {
                path.pop();
                cursors.pop();
                on_path[v] = false;
                continue;
            }
            cursors[depth] += 1;

            let w = succ[cursor];
            if w < root {
                continue;
            }
            if w == root {
                if path.len() >= min_len
                    && found.insert(graph, &path)
                    && found.len() >= bounds.top_k
                {
                    truncated = true;
                    break 'roots;
                }
                continue;
            }
            if on_path[w] || path.len() >= bounds.max_len {
                continue;
            }

            on_path[w] = true;
            path.push(w);
            cursors.push(0);
        }
    }

    if truncated {
        warn!(
            top_k = bounds.top_k,
            "cycle enumeration stopped at the loop limit; results are incomplete"
        );
    }
    if cancelled {
        warn!(found = found.len(), "cycle enumeration cancelled");
    }

    Enumeration {
        cycles: found.into_cycles(),
        truncated,
        cancelled,
    }
}
