// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Read-only accessors over a parsed program.
//!
//! All of them accept any index: out of range layers or commands give an
//! empty, zero or `None` result.

use itertools::Itertools;

use crate::model::{Command, Layer, ParsedProgram};

impl ParsedProgram {
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, layer: usize) -> Option<&Layer> {
        self.layers.get(layer)
    }

    pub fn command_count(&self, layer: usize) -> usize {
        self.commands(layer).len()
    }

    /// Number of commands in `layer` whose classifier is exactly `code`.
    pub fn code_count(&self, layer: usize, code: &str) -> usize {
        self.commands(layer).iter()
            .filter(|cmd| cmd.code.as_deref() == Some(code))
            .count()
    }

    pub fn command(&self, layer: usize, index: usize) -> Option<&Command> {
        self.commands(layer).get(index)
    }

    pub fn commands(&self, layer: usize) -> &[Command] {
        self.layer(layer).map(|l| &l.commands[..]).unwrap_or(&[])
    }

    /// All commands with a Z word, across layers, in program order.
    pub fn z_commands(&self) -> Vec<&Command> {
        self.layers.iter()
            .flat_map(|l| &l.commands)
            .filter(|cmd| cmd.z.is_some())
            .collect()
    }

    /// Classifier frequencies of a layer, in order of first appearance.
    ///
    /// Commands without a classifier are counted under `NO_CODE`.
    pub fn histogram_counts(&self, layer: usize) -> Vec<(String, usize)> {
        let labels = self.commands(layer).iter().map(Command::code_label);
        let counts = labels.clone().counts();
        labels.unique().map(|label| (label.to_owned(), counts[&label])).collect()
    }

    /// `histogram_counts` formatted as `"<code>: <count>"` rows.
    pub fn histogram(&self, layer: usize) -> Vec<String> {
        self.histogram_counts(layer).into_iter()
            .map(|(label, count)| format!("{}: {}", label, count))
            .collect()
    }

    /// Commands of a layer that have X, Y and E words, for path plotting.
    ///
    /// `limit` caps the result to the first N; `None` or `Some(0)` means
    /// no cap.
    pub fn extrusion_moves(&self, layer: usize, limit: Option<usize>) -> Vec<&Command> {
        let moves = self.commands(layer).iter().filter(|cmd| cmd.is_planar_extrusion());
        match limit {
            Some(n) if n > 0 => moves.take(n).collect(),
            _ => moves.collect(),
        }
    }
}
