// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Human-readable loop descriptions.

use crate::common::round3;
use crate::graph::CausalGraph;
use crate::polarity::cycle_links;
use crate::weight::PairwiseWeight;

/// Quote a label unless it only uses characters that are safe unquoted in a
/// STELLA-style path (`[A-Za-z0-9_/-]`).
pub fn quote_label(label: &str) -> String {
    let bare = label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '/');
    if bare {
        label.to_owned()
    } else {
        format!("\"{label}\"")
    }
}

/// Render a loop as `a ->(+) b ->(-) c ->(+) a`, closing on the first node.
/// Links with an uncoded sign render as a bare `->`.
pub fn loop_path(graph: &CausalGraph, cycle: &[usize]) -> String {
    let Some(&first) = cycle.first() else {
        return String::new();
    };

    let mut parts: Vec<String> = Vec::with_capacity(cycle.len() + 1);
    for (from, to) in cycle_links(cycle) {
        let arrow = match graph.edge(from, to).and_then(|edge| edge.sign) {
            Some(sign) => format!("->({})", sign.symbol()),
            None => "->".to_owned(),
        };
        parts.push(format!("{} {}", quote_label(graph.label(from)), arrow));
    }
    parts.push(quote_label(graph.label(first)));
    parts.join(" ")
}

fn format_weight(w: f64) -> String {
    let w = round3(w);
    if w.fract() == 0.0 {
        format!("{w:.0}")
    } else {
        format!("{w}")
    }
}

/// `a→b: 1.5, b→c: 1, c→a: 1`, skipping links whose weight isn't finite.
pub fn pairwise_details(
    graph: &CausalGraph,
    weight: &dyn PairwiseWeight,
    cycle: &[usize],
) -> String {
    cycle_links(cycle)
        .filter_map(|(from, to)| {
            let w = weight.weight(graph.id(from), graph.id(to));
            if !w.is_finite() {
                return None;
            }
            Some(format!(
                "{}→{}: {}",
                quote_label(graph.label(from)),
                quote_label(graph.label(to)),
                format_weight(w)
            ))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
