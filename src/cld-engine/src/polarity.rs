// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Link and loop polarity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::CausalGraph;

/// Polarity of a causal link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkPolarity {
    // Increase in 'from' causes increase in 'to'
    #[serde(rename = "+", alias = "plus")]
    Positive,
    // Increase in 'from' causes decrease in 'to'
    #[serde(rename = "-", alias = "minus")]
    Negative,
}

impl LinkPolarity {
    pub fn symbol(self) -> &'static str {
        match self {
            LinkPolarity::Positive => "+",
            LinkPolarity::Negative => "-",
        }
    }
}

/// Loop polarity (Reinforcing, Balancing, or Uncoded when any link sign is unknown)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopPolarity {
    Reinforcing, // R loop - even number of negative links
    Balancing,   // B loop - odd number of negative links
    Uncoded,
}

impl LoopPolarity {
    /// Prefix used for loop ids: `r1`, `b2`, `u3`.
    pub fn id_prefix(self) -> char {
        match self {
            LoopPolarity::Reinforcing => 'r',
            LoopPolarity::Balancing => 'b',
            LoopPolarity::Uncoded => 'u',
        }
    }
}

impl fmt::Display for LoopPolarity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LoopPolarity::Reinforcing => "R",
            LoopPolarity::Balancing => "B",
            LoopPolarity::Uncoded => "uncoded",
        };
        write!(f, "{name}")
    }
}

/// Combine link signs into a loop polarity.  A single unknown sign makes
/// the whole loop uncoded; loops are never partially classified.
pub fn classify_signs<I>(signs: I) -> LoopPolarity
where
    I: IntoIterator<Item = Option<LinkPolarity>>,
{
    let mut negative_count = 0usize;
    for sign in signs {
        match sign {
            None => return LoopPolarity::Uncoded,
            Some(LinkPolarity::Negative) => negative_count += 1,
            Some(LinkPolarity::Positive) => {}
        }
    }

    if negative_count % 2 == 0 {
        LoopPolarity::Reinforcing
    } else {
        LoopPolarity::Balancing
    }
}

/// Classify a cycle of node indices, including the wrap-around link from
/// the last node back to the first.
pub fn classify(cycle: &[usize], graph: &CausalGraph) -> LoopPolarity {
    classify_signs(
        cycle_links(cycle).map(|(from, to)| graph.edge(from, to).and_then(|edge| edge.sign)),
    )
}

/// Consecutive (from, to) pairs of a cycle, closing back on the first node.
pub(crate) fn cycle_links(cycle: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = cycle.len();
    (0..n).map(move |i| (cycle[i], cycle[(i + 1) % n]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{x_edge, x_graph};
    use LinkPolarity::{Negative, Positive};

    #[test]
    fn test_parity() {
        assert_eq!(LoopPolarity::Reinforcing, classify_signs(vec![]));
        assert_eq!(
            LoopPolarity::Reinforcing,
            classify_signs(vec![Some(Positive), Some(Positive)])
        );
        assert_eq!(
            LoopPolarity::Balancing,
            classify_signs(vec![Some(Positive), Some(Negative), Some(Positive)])
        );
        assert_eq!(
            LoopPolarity::Reinforcing,
            classify_signs(vec![Some(Negative), Some(Negative)])
        );
    }

    #[test]
    fn test_any_unknown_sign_is_uncoded() {
        assert_eq!(
            LoopPolarity::Uncoded,
            classify_signs(vec![Some(Negative), None, Some(Negative)])
        );
        assert_eq!(LoopPolarity::Uncoded, classify_signs(vec![None]));
    }

    #[test]
    fn test_classify_includes_wraparound_link() {
        let graph = x_graph(
            &["a", "b", "c"],
            vec![
                x_edge("a", "b", Some(Positive), 1.0, 1.0),
                x_edge("b", "c", Some(Positive), 1.0, 1.0),
                x_edge("c", "a", Some(Negative), 1.0, 1.0),
            ],
        );
        let cycle = vec![0, 1, 2];
        assert_eq!(LoopPolarity::Balancing, classify(&cycle, &graph));

        // rotations agree
        assert_eq!(LoopPolarity::Balancing, classify(&[2, 0, 1], &graph));
    }

    #[test]
    fn test_classify_missing_edge_is_uncoded() {
        let graph = x_graph(&["a", "b"], vec![x_edge("a", "b", Some(Positive), 1.0, 1.0)]);
        assert_eq!(LoopPolarity::Uncoded, classify(&[0, 1], &graph));
    }

    #[test]
    fn test_link_polarity_serde() {
        assert_eq!("\"+\"", serde_json::to_string(&Positive).unwrap());
        assert_eq!("\"-\"", serde_json::to_string(&Negative).unwrap());
        let p: LinkPolarity = serde_json::from_str("\"minus\"").unwrap();
        assert_eq!(Negative, p);
    }
}
