use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vizbar::viz::{self, IgnoreSet, Viewport};
use vizbar::{render_frame, storage};

#[derive(Parser, Debug)]
#[command(
    name = "vizbar",
    version,
    about = "Classify rows into chart series and compute bar/line/area layout"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a frame (and optionally save it, plot it, and print tooltips).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON document with `metadata`, `config` and optional `data` rows.
    #[arg(short, long)]
    input: PathBuf,
    /// CSV file with a header row; its rows are pushed after the document's rows.
    #[arg(short, long)]
    rows: Option<PathBuf>,
    /// Series names hidden as if their legend entry had been clicked (repeatable).
    #[arg(long)]
    ignore: Vec<String>,
    /// Width of the surface in pixels (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the surface in pixels (default 450).
    #[arg(long, default_value_t = 450)]
    height: u32,
    /// Save the computed frame as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Draw the frame at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Print the tooltip of every rendered point to stdout.
    #[arg(long, default_value_t = false)]
    tooltips: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let doc = storage::load_document(&args.input)?;

    let mut buffer = vizbar::RowBuffer::new();
    buffer.push(doc.data, &doc.metadata, &doc.config)?;
    if let Some(path) = args.rows.as_ref() {
        let rows = storage::load_rows_csv(path, &doc.metadata)?;
        buffer.push(rows, &doc.metadata, &doc.config)?;
    }

    let ignore: IgnoreSet = args.ignore.iter().collect();
    let viewport = Viewport::new(args.width as f64, args.height as f64);
    let frame = render_frame(buffer.rows(), &doc.metadata, &doc.config, &ignore, viewport)
        .context("computing frame")?;

    for warning in &frame.warnings {
        eprintln!("warning: {warning}");
    }

    if let Some(path) = args.out.as_ref() {
        storage::save_frame_json(&frame, path)?;
        eprintln!("Saved frame with {} groups to {}", frame.groups.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        viz::preview::plot_frame(&frame, &doc.config, plot_path, args.width, args.height)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if args.tooltips {
        for (gi, group) in frame.groups.iter().enumerate() {
            for (si, series) in group.series.iter().enumerate() {
                for pi in 0..series.points.len() {
                    if let Some(text) = frame.tooltip(&doc.config, gi, si, pi) {
                        println!("[{}] {}", series.name, text?.replace('\n', " | "));
                    }
                }
            }
        }
    }

    if args.out.is_none() && args.plot.is_none() && !args.tooltips {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    }

    Ok(())
}
