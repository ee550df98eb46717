// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Pieces shared by the command line tools.

use std::path::Path;
use clap::Args;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::metrics::Filament;
use crate::model::ParsedProgram;

/// Filament options.
#[derive(Args, Debug, Clone)]
pub struct FilamentArgs {
    /// Filament diameter in mm.
    #[arg(long, env = "GCODE_FILAMENT_DIAMETER", default_value_t = 1.75)]
    pub diameter: f64,
    /// Filament density in g/cm³.
    #[arg(long, env = "GCODE_FILAMENT_DENSITY", default_value_t = 1.24)]
    pub density: f64,
}

impl FilamentArgs {
    pub fn filament(&self) -> Filament {
        Filament::new(self.diameter, self.density)
    }
}

/// Install a stderr logger; each `-v` raises the level one step from WARN.
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Read and parse a G-code file.
pub fn load(path: &Path, filament: Filament) -> anyhow::Result<ParsedProgram> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    let prog = ParsedProgram::with_filament(&text, filament);
    info!(file = %path.display(), layers = prog.layer_count(),
          diagnostics = prog.diagnostics().len(), "loaded");
    Ok(prog)
}

/// Format an optional value with three decimals, or `N/A`.
pub fn fixed3(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".into(), |v| format!("{:.3}", v))
}
