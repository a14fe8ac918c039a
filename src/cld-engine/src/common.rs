// Copyright 2026 The CLD Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

/// Identifier of a factor (node) in a causal loop diagram.
pub type NodeId = String;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    Generic,
    JsonDeserialization,
    BadMaxLength,
    BadMinLength,
    BadLoopLimit,
    BadBlendCoefficient,
    BadScoringCoefficient,
    BadSortKey,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            Generic => "generic",
            JsonDeserialization => "json_deserialization",
            BadMaxLength => "bad_max_length",
            BadMinLength => "bad_min_length",
            BadLoopLimit => "bad_loop_limit",
            BadBlendCoefficient => "bad_blend_coefficient",
            BadScoringCoefficient => "bad_scoring_coefficient",
            BadSortKey => "bad_sort_key",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Import,
    Options,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Import,
            code: ErrorCode::JsonDeserialization,
            details: Some(err.to_string()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Import => "ImportError",
            ErrorKind::Options => "OptionsError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! options_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Options, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Options, ErrorCode::$code, None))
    }};
}

/// Round to 3 decimal places, the precision every reported metric uses.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Options,
        ErrorCode::BadLoopLimit,
        Some("top_k must be positive".to_owned()),
    );
    assert_eq!(
        "OptionsError{bad_loop_limit: top_k must be positive}",
        format!("{err}")
    );

    let err = Error::new(ErrorKind::Import, ErrorCode::JsonDeserialization, None);
    assert_eq!("ImportError{json_deserialization}", format!("{err}"));
}

#[test]
fn test_round3() {
    assert_eq!(1.145, round3(1.5f64.powf(1.0 / 3.0)));
    assert_eq!(-0.5, round3(-0.5));
    assert_eq!(2.0, round3(1.9996));
}
