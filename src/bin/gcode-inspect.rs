use std::path::PathBuf;
use clap::Parser;
use gcode_layers::Command;
use gcode_layers::cli::{fixed3, init_logging, load, FilamentArgs};

/// Show one command of a G-code file, or the extruding moves of a layer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase output verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(flatten)]
    filament: FilamentArgs,
    /// Show at most this many moves (0 shows all).
    #[arg(short = 'n', long, default_value_t = 0)]
    limit: usize,
    /// The G-code file.
    file: PathBuf,
    /// Layer index, starting at 0.
    layer: usize,
    /// Command index within the layer.
    command: Option<usize>,
}

fn print_details(cmd: &Command) {
    println!("line {}: {}", cmd.lineno, cmd.line);
    println!("  code                {}", cmd.code_label());
    println!("  X                   {} mm", fixed3(cmd.x));
    println!("  Y                   {} mm", fixed3(cmd.y));
    println!("  Z                   {} mm", fixed3(cmd.z));
    println!("  E                   {} mm", fixed3(cmd.e));
    println!("  F                   {} mm/min", fixed3(cmd.f));
    println!("  last seen Z         {:.3} mm", cmd.last_seen_z);
    println!("  last seen feed      {:.3} mm/s", cmd.last_seen_feed_rate_mm_per_s);
    println!("  travel distance     {} mm", fixed3(cmd.distance_mm()));
    println!("  extruded volume     {} mm³", fixed3(cmd.extruded_volume_mm3()));
    println!("  weight              {} g", fixed3(cmd.weight_g()));
    println!("  volume per distance {} mm³/mm", fixed3(cmd.volume_per_distance()));
    println!("  velocity            {} mm/s", fixed3(cmd.velocity_mm_per_s()));
    println!("  flow                {} mm³/s", fixed3(cmd.flow_mm3_per_s()));
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let prog = load(&cli.file, cli.filament.filament())?;
    let layer = prog.layer(cli.layer).ok_or_else(|| anyhow::anyhow!(
        "layer {} out of range, file has {} layers", cli.layer, prog.layer_count()))?;

    match cli.command {
        Some(n) => {
            let cmd = prog.command(cli.layer, n).ok_or_else(|| anyhow::anyhow!(
                "command {} out of range, layer has {} commands", n, layer.commands.len()))?;
            print_details(cmd);
        }
        None => {
            println!("; layer {} Z{}", cli.layer, layer.z);
            for cmd in prog.extrusion_moves(cli.layer, Some(cli.limit)) {
                println!("{:<40} ; {} mm³", cmd.to_string(), fixed3(cmd.extruded_volume_mm3()));
            }
        }
    }
    Ok(())
}
