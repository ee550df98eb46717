use std::path::PathBuf;
use clap::Parser;
use serde::Serialize;
use gcode_layers::{ParsedProgram, Totals};
use gcode_layers::cli::{init_logging, load, FilamentArgs};

/// Print a per-layer summary of a G-code file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase output verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(flatten)]
    filament: FilamentArgs,
    /// Only show this layer.
    #[arg(short, long)]
    layer: Option<usize>,
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
    /// The G-code file.
    file: PathBuf,
}

#[derive(Serialize)]
struct LayerSummary {
    index: usize,
    z: f64,
    commands: usize,
    histogram: Vec<(String, usize)>,
    totals: Totals,
}

fn summarize(prog: &ParsedProgram, index: usize) -> Option<LayerSummary> {
    let layer = prog.layer(index)?;
    Some(LayerSummary {
        index,
        z: layer.z,
        commands: layer.commands.len(),
        histogram: prog.histogram_counts(index),
        totals: layer.totals(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let prog = load(&cli.file, cli.filament.filament())?;
    let indices: Vec<usize> = match cli.layer {
        Some(n) if n >= prog.layer_count() =>
            anyhow::bail!("layer {} out of range, file has {} layers", n, prog.layer_count()),
        Some(n) => vec![n],
        None => (0..prog.layer_count()).collect(),
    };
    let summaries: Vec<_> = indices.into_iter().filter_map(|n| summarize(&prog, n)).collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{}: {} layers", cli.file.display(), prog.layer_count());
    for summary in &summaries {
        println!("layer {} Z{}: {} commands, {} extruding moves, {:.3} mm, {:.3} mm³, {:.3} g",
                 summary.index, summary.z, summary.commands, summary.totals.moves,
                 summary.totals.distance_mm, summary.totals.extruded_volume_mm3,
                 summary.totals.weight_g);
        for row in prog.histogram(summary.index) {
            println!("    {}", row);
        }
    }
    let totals = prog.totals();
    println!("total: {:.3} mm, {:.3} mm³, {:.3} g", totals.distance_mm,
             totals.extruded_volume_mm3, totals.weight_g);
    for diag in prog.diagnostics() {
        eprintln!("warning: {}", diag);
    }
    Ok(())
}
