// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::diag::Diagnostic;
use crate::metrics::{Filament, Metrics, Totals};

/// Classifier given to lines that consist only of a comment.
pub const COMMENT: &str = "COMMENT";

/// Histogram label used for commands without a classifier.
pub const NO_CODE: &str = "none";

/// A parameter letter understood by the parser.
///
/// Words starting with any other character are ignored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumString, Serialize)]
pub enum Letter {
    X, Y, Z,
    E, F,
    G, M,
}

/// One instruction line, with the words found on it and the quantities
/// derived from the state carried up to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    /// 1-based line number in the input text.
    pub lineno: usize,
    /// The trimmed source line.
    pub line: String,
    /// Classifier such as `G1`, `M104` or `COMMENT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<f64>,
    /// Feed rate as written, in mm/min.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f: Option<f64>,
    /// Most recent feed rate up to and including this line, in mm/s.
    pub last_seen_feed_rate_mm_per_s: f64,
    /// Most recent Z height up to and including this line.
    pub last_seen_z: f64,
    #[serde(flatten)]
    pub metrics: Option<Metrics>,
}

impl Command {
    pub(crate) fn new(lineno: usize, line: &str) -> Self {
        Command {
            lineno,
            line: line.into(),
            code: None,
            x: None,
            y: None,
            z: None,
            e: None,
            f: None,
            last_seen_feed_rate_mm_per_s: 0.,
            last_seen_z: 0.,
            metrics: None,
        }
    }

    /// The classifier, or `NO_CODE` if the line has none.
    pub fn code_label(&self) -> &str {
        self.code.as_deref().unwrap_or(NO_CODE)
    }

    pub fn is_comment(&self) -> bool {
        self.code.as_deref() == Some(COMMENT)
    }

    /// True if X, Y and E all appear on this line.
    pub fn is_planar_extrusion(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.e.is_some()
    }

    pub fn distance_mm(&self) -> Option<f64> {
        self.metrics.as_ref().map(|m| m.distance_mm)
    }

    pub fn extruded_volume_mm3(&self) -> Option<f64> {
        self.metrics.as_ref().map(|m| m.extruded_volume_mm3)
    }

    pub fn weight_g(&self) -> Option<f64> {
        self.metrics.as_ref().map(|m| m.weight_g)
    }

    pub fn volume_per_distance(&self) -> Option<f64> {
        self.metrics.as_ref().map(|m| m.volume_per_distance)
    }

    pub fn velocity_mm_per_s(&self) -> Option<f64> {
        self.metrics.as_ref().and_then(|m| m.velocity_mm_per_s)
    }

    pub fn flow_mm3_per_s(&self) -> Option<f64> {
        self.metrics.as_ref().and_then(|m| m.flow_mm3_per_s)
    }
}

/// A contiguous run of commands printed at one nominal height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    /// The height that opened this layer; 0 for the first one.
    pub z: f64,
    pub commands: Vec<Command>,
}

impl Layer {
    pub(crate) fn new(z: f64) -> Self {
        Layer { z, commands: vec![] }
    }

    /// Sums of the derived metrics over all commands that carry them.
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for metrics in self.commands.iter().filter_map(|cmd| cmd.metrics.as_ref()) {
            totals.add(metrics);
        }
        totals
    }
}

/// The layers of a whole G-code program.
///
/// Built in a single pass by `ParsedProgram::new` (or `parse::parse`) and
/// never modified afterwards; see the `query` module for accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedProgram {
    pub(crate) layers: Vec<Layer>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    #[serde(skip)]
    pub(crate) filament: Filament,
}

impl ParsedProgram {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Malformed words and lines encountered while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The filament used to compute volumes and weights.
    pub fn filament(&self) -> &Filament {
        &self.filament
    }

    pub fn totals(&self) -> Totals {
        self.layers.iter().fold(Totals::default(), |mut acc, layer| {
            acc.merge(&layer.totals());
            acc
        })
    }
}

impl fmt::Display for ParsedProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (n, layer) in self.layers.iter().enumerate() {
            writeln!(f, "; layer {} Z{}", n, layer.z)?;
            for cmd in &layer.commands {
                writeln!(f, "{}", cmd)?;
            }
        }
        Ok(())
    }
}

/// Normalized form of the line: classifier and numeric words in a fixed
/// order, without comments.  Comment lines and lines without any known word
/// are shown as written.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_comment() {
            return write!(f, "{}", self.line);
        }
        let mut words = vec![];
        if let Some(code) = &self.code {
            words.push(code.clone());
        }
        for (letter, value) in &[(Letter::X, self.x), (Letter::Y, self.y), (Letter::Z, self.z),
                                 (Letter::E, self.e), (Letter::F, self.f)] {
            if let Some(v) = value {
                words.push(format!("{}{}", letter, v));
            }
        }
        if words.is_empty() {
            write!(f, "{}", self.line)
        } else {
            write!(f, "{}", words.join(" "))
        }
    }
}
