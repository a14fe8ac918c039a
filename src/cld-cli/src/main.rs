// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cld_engine::json::Document;
use cld_engine::sort::{
    PolarityOrder, SortDirection, SortKey, filter_loops, sort_by_polarity, sort_loops,
};
use cld_engine::{AnalysisOptions, Loop, LoopAnalysis};

/// Identify and rank feedback loops in causal loop diagrams.
#[derive(Debug, Parser)]
#[command(name = "cld", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the loops of a diagram with their scores
    Loops {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Metric to sort by: length, raw, alcv, nlcv, sfc, nsfc, civ, wlv, nwlv
        #[arg(long, value_name = "KEY", conflicts_with = "polarity_first")]
        sort: Option<SortKey>,

        /// Sort ascending instead of descending
        #[arg(long, requires = "sort")]
        asc: bool,

        /// Group loops by polarity, uncoded loops last
        #[arg(long, value_enum, value_name = "POLARITY")]
        polarity_first: Option<PolarityArg>,

        /// Only show loops through a factor whose label or id contains TERM
        #[arg(long, value_name = "TERM")]
        filter: Option<String>,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the factors that take part in loops, most frequent first
    Factors {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Overrides for the options embedded in the diagram document.
#[derive(Debug, Args)]
struct AnalysisArgs {
    /// Diagram document (JSON); `-` reads stdin
    file: PathBuf,

    /// Longest loop to report
    #[arg(long, value_name = "N")]
    max_len: Option<usize>,

    /// Shortest loop to report
    #[arg(long, value_name = "N")]
    min_len: Option<usize>,

    /// Stop after finding this many loops
    #[arg(long, value_name = "N")]
    top_k: Option<usize>,

    /// Blend between impact (1) and control (0) for link weights
    #[arg(long, value_name = "A")]
    alpha: Option<f64>,

    /// Mark a factor as a steering factor (repeatable)
    #[arg(long = "steer", value_name = "ID")]
    steering_factors: Vec<String>,

    /// Use the length-adjusted overlap as the conditional independence value
    #[arg(long)]
    adjusted_independence: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolarityArg {
    Reinforcing,
    Balancing,
}

impl From<PolarityArg> for PolarityOrder {
    fn from(arg: PolarityArg) -> Self {
        match arg {
            PolarityArg::Reinforcing => PolarityOrder::ReinforcingFirst,
            PolarityArg::Balancing => PolarityOrder::BalancingFirst,
        }
    }
}

impl AnalysisArgs {
    fn apply(&self, options: &mut AnalysisOptions) {
        if let Some(max_len) = self.max_len {
            options.max_len = max_len;
        }
        if let Some(min_len) = self.min_len {
            options.min_len = min_len;
        }
        if let Some(top_k) = self.top_k {
            options.top_k = top_k;
        }
        if let Some(alpha) = self.alpha {
            options.alpha = alpha;
        }
        if !self.steering_factors.is_empty() {
            options.steering_factors = self.steering_factors.iter().cloned().collect();
        }
        if self.adjusted_independence {
            options.use_adjusted_independence = true;
        }
    }

    fn run(&self) -> Result<LoopAnalysis> {
        let mut doc = open_document(&self.file)?;
        self.apply(&mut doc.options);
        doc.options.validate()?;
        debug!(
            nodes = doc.nodes.len(),
            edges = doc.edges.len(),
            "analyzing {}",
            self.file.display()
        );
        Ok(doc.analyze())
    }
}

fn open_document(path: &Path) -> Result<Document> {
    let doc = if path == Path::new("-") {
        Document::from_reader(io::stdin().lock())
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Document::from_reader(BufReader::new(file))
    };
    doc.with_context(|| format!("diagram '{}'", path.display()))
}

fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.3}"),
        None => "-".to_owned(),
    }
}

fn print_loops(out: &mut dyn Write, loops: &[&Loop]) -> io::Result<()> {
    writeln!(
        out,
        "{:<6} {:>3} {:<11} {:>8} {:>8} {:>8} {:>8} {:>8}  path",
        "id", "len", "polarity", "raw", "aLCV", "nLCV", "CIV", "nWLV"
    )?;
    for l in loops {
        let s = &l.scores;
        writeln!(
            out,
            "{:<6} {:>3} {:<11} {:>8.3} {:>8} {:>8} {:>8} {:>8}  {}",
            l.id,
            l.length,
            format!("{:?}", l.polarity).to_lowercase(),
            s.raw_composite_value,
            fmt_metric(s.adjusted_composite_value),
            fmt_metric(s.normalized_composite_value),
            fmt_metric(s.conditional_independence_value),
            fmt_metric(s.normalized_weighted_loop_value),
            l.path
        )?;
    }
    Ok(())
}

fn print_notes(analysis: &LoopAnalysis) {
    if analysis.cancelled {
        eprintln!("note: search was cancelled; the loop list is incomplete");
    } else if analysis.truncated {
        eprintln!(
            "note: loop limit reached after {} loops; raise --top-k to find more",
            analysis.loops.len()
        );
    }
}

fn loops_command(
    analysis_args: &AnalysisArgs,
    sort: Option<SortKey>,
    asc: bool,
    polarity_first: Option<PolarityArg>,
    filter: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut analysis = analysis_args.run()?;

    if let Some(key) = sort {
        let direction = if asc {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        sort_loops(&mut analysis.loops, key, direction);
    } else if let Some(order) = polarity_first {
        sort_by_polarity(&mut analysis.loops, order.into());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        if let Some(term) = filter {
            let kept: Vec<Loop> = filter_loops(&analysis.loops, term)
                .into_iter()
                .cloned()
                .collect();
            analysis.loops = kept;
        }
        serde_json::to_writer_pretty(&mut out, &analysis)?;
        writeln!(out)?;
    } else {
        let shown = filter_loops(&analysis.loops, filter.unwrap_or(""));
        print_loops(&mut out, &shown)?;
    }
    print_notes(&analysis);
    Ok(())
}

fn factors_command(analysis_args: &AnalysisArgs, json: bool) -> Result<()> {
    let analysis = analysis_args.run()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &analysis.factors)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{:>5}  {:<20} label", "loops", "id")?;
        for f in &analysis.factors {
            writeln!(out, "{:>5}  {:<20} {}", f.loop_count, f.id, f.label)?;
        }
    }
    print_notes(&analysis);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Loops {
            analysis,
            sort,
            asc,
            polarity_first,
            filter,
            json,
        } => loops_command(
            analysis,
            *sort,
            *asc,
            *polarity_first,
            filter.as_deref(),
            *json,
        ),
        Command::Factors { analysis, json } => factors_command(analysis, *json),
    }
}
