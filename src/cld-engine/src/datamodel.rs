// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Raw diagram records as supplied by the diagram and matrix editors.
//!
//! Nothing here is validated; `CausalGraph::new` is responsible for
//! filtering dangling, self-referencing and parallel edges.

use serde::{Deserialize, Serialize};

use crate::common::NodeId;
use crate::polarity::LinkPolarity;

/// A factor in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Display name; not unique. Falls back to `id` when empty.
    #[serde(default)]
    pub label: String,
}

impl Node {
    pub fn new(id: &str, label: &str) -> Self {
        Node {
            id: id.to_owned(),
            label: label.to_owned(),
        }
    }

    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// A directed influence between two factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// `None` means the influence's direction has not been coded yet.
    #[serde(default)]
    pub sign: Option<LinkPolarity>,
    #[serde(default)]
    pub impact: Option<f64>,
    #[serde(default)]
    pub control: Option<f64>,
}

impl Edge {
    pub fn new(source: &str, target: &str, sign: Option<LinkPolarity>) -> Self {
        Edge {
            source: source.to_owned(),
            target: target.to_owned(),
            sign,
            impact: None,
            control: None,
        }
    }

    pub fn with_weights(mut self, impact: Option<f64>, control: Option<f64>) -> Self {
        self.impact = impact;
        self.control = control;
        self
    }

    /// Magnitude used to pick between parallel edges; a missing impact counts as 0.
    pub(crate) fn impact_magnitude(&self) -> f64 {
        self.impact.map(f64::abs).filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_deserialize_optional_fields() {
        let edge: Edge = serde_json::from_str(r#"{"source": "a", "target": "b"}"#).unwrap();
        assert_eq!(None, edge.sign);
        assert_eq!(None, edge.impact);
        assert_eq!(None, edge.control);

        let edge: Edge = serde_json::from_str(
            r#"{"source": "a", "target": "b", "sign": "-", "impact": 3, "control": null}"#,
        )
        .unwrap();
        assert_eq!(Some(LinkPolarity::Negative), edge.sign);
        assert_eq!(Some(3.0), edge.impact);
        assert_eq!(None, edge.control);
    }

    #[test]
    fn test_display_label_falls_back_to_id() {
        assert_eq!("a", Node::new("a", "").display_label());
        assert_eq!("Food supply", Node::new("a", "Food supply").display_label());

        let node: Node = serde_json::from_str(r#"{"id": "n1"}"#).unwrap();
        assert_eq!("n1", node.display_label());
    }

    #[test]
    fn test_impact_magnitude() {
        let edge = Edge::new("a", "b", None);
        assert_eq!(0.0, edge.impact_magnitude());
        let edge = edge.with_weights(Some(-2.0), None);
        assert_eq!(2.0, edge.impact_magnitude());
        let edge = Edge::new("a", "b", None).with_weights(Some(f64::NAN), None);
        assert_eq!(0.0, edge.impact_magnitude());
    }
}
