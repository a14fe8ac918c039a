// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! JSON diagram documents.
//!
//! A document is the snapshot a diagram editor hands over: nodes, edges
//! and optionally the analysis options to use.
//!
//! # Example
//! ```no_run
//! use cld_engine::json::Document;
//!
//! let doc = Document::from_json(r#"{"nodes": [], "edges": []}"#)?;
//! let analysis = doc.analyze();
//! println!("{}", serde_json::to_string_pretty(&analysis)?);
//! # Ok::<(), cld_engine::Error>(())
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, LoopAnalysis, analyze_diagram};
use crate::common::Result;
use crate::datamodel::{Edge, Node};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl Document {
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn analyze(&self) -> LoopAnalysis {
        analyze_diagram(self.nodes.clone(), self.edges.clone(), &self.options)
    }
}
