// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Property-based tests for loop enumeration and scoring.
//!
//! These tests verify that on arbitrary small diagrams:
//! 1. Every reported loop is a simple cycle within the search bounds
//! 2. No loop is reported twice under rotation
//! 3. The top-ranked loops normalize to exactly 1 and 100

use std::collections::HashSet;

use proptest::prelude::*;

use crate::analysis::{AnalysisOptions, analyze_diagram};
use crate::canonical::cycle_key;
use crate::cycles::{SearchBounds, enumerate};
use crate::datamodel::{Edge, Node};
use crate::graph::CausalGraph;
use crate::polarity::{LinkPolarity, LoopPolarity};

const MAX_NODES: usize = 7;

fn sign_strategy() -> impl Strategy<Value = Option<LinkPolarity>> {
    prop_oneof![
        4 => Just(Some(LinkPolarity::Positive)),
        3 => Just(Some(LinkPolarity::Negative)),
        1 => Just(None),
    ]
}

fn weight_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(1.0),
        (1i32..20).prop_map(|x| x as f64 / 4.0),
    ]
}

fn edge_strategy() -> impl Strategy<Value = Edge> {
    (
        0..MAX_NODES,
        0..MAX_NODES,
        sign_strategy(),
        weight_strategy(),
        weight_strategy(),
    )
        .prop_map(|(from, to, sign, impact, control)| {
            Edge::new(&format!("v{from}"), &format!("v{to}"), sign)
                .with_weights(Some(impact), Some(control))
        })
}

fn diagram_strategy() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
    (
        2..=MAX_NODES,
        prop::collection::vec(edge_strategy(), 0..24),
    )
        .prop_map(|(n, edges)| {
            let nodes = (0..n).map(|i| Node::new(&format!("v{i}"), "")).collect();
            (nodes, edges)
        })
}

fn bounds_strategy() -> impl Strategy<Value = SearchBounds> {
    (2usize..6, 0usize..3, 1usize..40).prop_map(|(max_len, extra, top_k)| SearchBounds {
        max_len,
        min_len: (2 + extra).min(max_len),
        top_k,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn enumerated_loops_are_simple_and_bounded(
        (nodes, edges) in diagram_strategy(),
        bounds in bounds_strategy(),
    ) {
        let graph = CausalGraph::new(nodes, edges);
        let found = enumerate(&graph, bounds);

        prop_assert!(found.cycles.len() <= bounds.top_k);
        if found.truncated {
            prop_assert_eq!(bounds.top_k, found.cycles.len());
        }

        let mut keys = HashSet::new();
        for cycle in &found.cycles {
            prop_assert!(cycle.len() >= bounds.min_len);
            prop_assert!(cycle.len() <= bounds.max_len);

            let distinct: HashSet<usize> = cycle.iter().copied().collect();
            prop_assert_eq!(cycle.len(), distinct.len());

            for (i, &from) in cycle.iter().enumerate() {
                let to = cycle[(i + 1) % cycle.len()];
                prop_assert!(graph.edge(from, to).is_some());
            }

            prop_assert!(keys.insert(cycle_key(&graph, cycle)));
        }
    }

    #[test]
    fn untruncated_search_is_complete(
        (nodes, edges) in diagram_strategy(),
    ) {
        let graph = CausalGraph::new(nodes, edges);
        let narrow = enumerate(&graph, SearchBounds { max_len: 3, min_len: 2, top_k: 10_000 });
        let wide = enumerate(&graph, SearchBounds { max_len: MAX_NODES, min_len: 2, top_k: 10_000 });
        prop_assert!(!narrow.truncated);
        prop_assert!(!wide.truncated);

        let wide_keys: HashSet<String> =
            wide.cycles.iter().map(|c| cycle_key(&graph, c)).collect();
        for cycle in &narrow.cycles {
            prop_assert!(wide_keys.contains(&cycle_key(&graph, cycle)));
        }
        let short_in_wide = wide.cycles.iter().filter(|c| c.len() <= 3).count();
        prop_assert_eq!(narrow.cycles.len(), short_in_wide);
    }

    #[test]
    fn normalized_scores_peak_at_one(
        (nodes, edges) in diagram_strategy(),
    ) {
        let analysis = analyze_diagram(nodes, edges, &AnalysisOptions::default());

        let max_alcv = analysis
            .loops
            .iter()
            .filter_map(|l| l.scores.adjusted_composite_value)
            .fold(0.0f64, f64::max);
        if max_alcv > 0.0 {
            prop_assert!(analysis
                .loops
                .iter()
                .any(|l| l.scores.normalized_composite_value == Some(1.0)));
        }

        let max_wlv = analysis
            .loops
            .iter()
            .filter_map(|l| l.scores.weighted_loop_value)
            .fold(0.0f64, f64::max);
        if max_wlv > 0.0 {
            prop_assert!(analysis
                .loops
                .iter()
                .any(|l| l.scores.normalized_weighted_loop_value == Some(100.0)));
        }

        for l in &analysis.loops {
            if let Some(v) = l.scores.normalized_weighted_loop_value {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }
    }

    #[test]
    fn polarity_follows_link_signs(
        (nodes, edges) in diagram_strategy(),
    ) {
        let graph = CausalGraph::new(nodes.clone(), edges.clone());
        let analysis = analyze_diagram(nodes, edges, &AnalysisOptions::default());

        for l in &analysis.loops {
            let signs: Vec<Option<LinkPolarity>> = l
                .nodes
                .iter()
                .zip(l.nodes.iter().cycle().skip(1))
                .map(|(from, to)| graph.edge_between(from, to).and_then(|e| e.sign))
                .collect();
            let negatives = signs
                .iter()
                .filter(|s| **s == Some(LinkPolarity::Negative))
                .count();
            let expected = if signs.contains(&None) {
                LoopPolarity::Uncoded
            } else if negatives % 2 == 0 {
                LoopPolarity::Reinforcing
            } else {
                LoopPolarity::Balancing
            };
            prop_assert_eq!(expected, l.polarity);
            prop_assert_eq!(l.id.chars().next(), Some(l.polarity.id_prefix()));
        }
    }
}
