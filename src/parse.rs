// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::mem;
use itertools::Itertools;
use pest_derive::Parser;
use pest::{Parser, iterators::Pair};
use tracing::{debug, warn};

use crate::diag::{DiagKind, Diagnostic};
use crate::metrics::{Filament, Head};
use crate::model::*;

#[derive(Parser)]
#[grammar = "gcode.pest"]
pub struct GcodeParser;

/// State carried from one line to the next.
#[derive(Default)]
struct State {
    /// Position as of the last extruding move.
    head: Head,
    feed_mm_per_s: f64,
    last_z: f64,
    /// Nominal height of the layer being filled.
    layer_z: f64,
}

/// Parse the longest numeric prefix of `text`, or `None` if it has none.
pub fn parse_number(text: &str) -> Option<f64> {
    let pair = GcodeParser::parse(Rule::number, text).ok()?.next()?;
    pair.as_str().parse().ok()
}

/// Parse a formatted histogram row like `"G1: 12"` into its label and count.
pub fn parse_histogram_row(row: &str) -> Option<(String, usize)> {
    let row = GcodeParser::parse(Rule::histogram_row, row).ok()?.next()?;
    let (label, count) = row.into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .collect_tuple()?;
    Some((label.as_str().into(), count.as_str().parse().ok()?))
}

fn apply_word(lineno: usize, word: Pair<Rule>, cmd: &mut Command, state: &mut State,
              diags: &mut Vec<Diagnostic>) {
    let (letter, value) = word.into_inner().collect_tuple().expect("children");
    let letter: Letter = match letter.as_str().parse() {
        Ok(letter) => letter,
        Err(_) => return,
    };
    let value = match parse_number(value.as_str()) {
        Some(v) => v,
        None => {
            let kind = DiagKind::MalformedNumber { letter, text: value.as_str().into() };
            warn!(lineno, "{}", kind);
            diags.push(Diagnostic { lineno, kind });
            f64::NAN
        }
    };
    match letter {
        Letter::X => cmd.x = Some(value),
        Letter::Y => cmd.y = Some(value),
        Letter::Z => {
            cmd.z = Some(value);
            state.last_z = value;
        }
        Letter::E => cmd.e = Some(value),
        Letter::F => {
            cmd.f = Some(value);
            state.feed_mm_per_s = value / 60.;
        }
        // adding 0 turns -0 into 0, so `G-0` is a G0 move
        Letter::G | Letter::M => cmd.code = Some(format!("{}{}", letter, value + 0.)),
    }
}

fn make_command(lineno: usize, text: &str, state: &mut State,
                diags: &mut Vec<Diagnostic>) -> Command {
    let mut cmd = Command::new(lineno, text);
    // Every blank separated run is a word or a comment, so a trimmed
    // non-empty line always matches.
    let line = GcodeParser::parse(Rule::line, text).expect("valid line")
        .next().expect("line");
    for (n, pair) in line.into_inner().enumerate() {
        match pair.as_rule() {
            Rule::comment => {
                if n == 0 {
                    cmd.code = Some(COMMENT.into());
                }
                break;
            }
            Rule::word => apply_word(lineno, pair, &mut cmd, state, diags),
            _ => (),
        }
    }
    // Both snapshots include updates made by this very line.
    cmd.last_seen_feed_rate_mm_per_s = state.feed_mm_per_s;
    cmd.last_seen_z = state.last_z;
    cmd
}

/// Strip surrounding whitespace and byte order marks.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// A Z change on a G0/G1 move starts a new layer.
fn new_layer_z(cmd: &Command, layer_z: f64) -> Option<f64> {
    let z = cmd.z?;
    match cmd.code.as_deref() {
        Some("G0") | Some("G1") if z != layer_z => Some(z),
        _ => None,
    }
}

/// Parse a whole program using the default filament.
pub fn parse(input: &str) -> ParsedProgram {
    parse_with(input, Filament::default())
}

/// Parse a whole program in one forward pass.
///
/// Blank lines are skipped; every other line yields exactly one command.
/// This never fails: malformed words end up as NaN fields and are listed in
/// `ParsedProgram::diagnostics`.
pub fn parse_with(input: &str, filament: Filament) -> ParsedProgram {
    let mut state = State::default();
    let mut layers = vec![];
    let mut diagnostics = vec![];
    let mut current = Layer::new(state.layer_z);

    for (n, line) in input.lines().enumerate() {
        let text = trim_line(line);
        if text.is_empty() {
            continue;
        }
        let mut cmd = make_command(n + 1, text, &mut state, &mut diagnostics);

        if let Some(z) = new_layer_z(&cmd, state.layer_z) {
            state.layer_z = z;
            let done = mem::replace(&mut current, Layer::new(z));
            if !done.commands.is_empty() {
                layers.push(done);
            }
            debug!(lineno = n + 1, z, "new layer");
        }

        cmd.metrics = state.head.advance(&cmd, &filament);
        current.commands.push(cmd);
    }
    if !current.commands.is_empty() {
        layers.push(current);
    }

    debug!(layers = layers.len(), diagnostics = diagnostics.len(), "parsed program");
    ParsedProgram { layers, diagnostics, filament }
}

impl ParsedProgram {
    /// Parse `input` with the default 1.75 mm PLA filament.
    pub fn new(input: &str) -> Self {
        parse(input)
    }

    pub fn with_filament(input: &str, filament: Filament) -> Self {
        parse_with(input, filament)
    }
}
