// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use serde::Serialize;
use thiserror::Error;

use crate::model::Letter;

/// Something in the input that could not be taken at face value.
///
/// Diagnostics never stop the parse; the affected command is still
/// produced with a best-effort value.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("line {lineno}: {kind}")]
pub struct Diagnostic {
    pub lineno: usize,
    pub kind: DiagKind,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum DiagKind {
    /// The word's value has no numeric prefix; the field was set to NaN.
    #[error("value {text:?} of word {letter} is not a number")]
    MalformedNumber { letter: Letter, text: String },
}
