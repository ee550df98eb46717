// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A library to split 3D-printer G-code into layers and derive per-move
//! physical quantities: travel distance, extruded volume and weight,
//! velocity and flow.
//!
//! Parsing is best-effort and never fails.  Every non-blank line becomes one
//! [`Command`](model::Command) holding the words found on it, a snapshot of
//! the last known feed rate and Z height, and, for moves that travel in XY
//! while extruding, a set of [`Metrics`](metrics::Metrics).  A Z change on a
//! `G0`/`G1` move starts a new [`Layer`](model::Layer).
//!
//! ## Basic usage
//!
//! ```rust
//! use gcode_layers::ParsedProgram;
//!
//! let prog = ParsedProgram::new("G1 X10 Y0 E1 F600\nG1 X10 Y10 E2\n");
//! assert_eq!(prog.layer_count(), 1);
//!
//! let cmd = prog.command(0, 1).unwrap();
//! assert_eq!(cmd.distance_mm(), Some(10.0));
//! assert_eq!(prog.histogram(0), vec!["G1: 2"]);
//! ```
//!
//! The "gcode-stats" and "gcode-inspect" binaries (enabled with the *cli*
//! feature) print layer summaries and single commands of a file.

pub mod diag;
pub mod metrics;
pub mod model;
pub mod parse;
pub mod query;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::diag::{DiagKind, Diagnostic};
pub use crate::metrics::{Filament, Metrics, Totals};
pub use crate::model::{Command, Layer, Letter, ParsedProgram, COMMENT, NO_CODE};
pub use crate::parse::{parse, parse_with};
