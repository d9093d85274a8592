use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

use mips_disasm::{load_image, render_text, Report};

#[derive(Parser, Debug)]
#[command(author, version, about = "List a mips-asm instruction-memory image", long_about=None)]
struct Cli {
    /// Image path (instruction.mem)
    #[arg(value_name = "IMAGE")]
    input: PathBuf,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Include trailing zero slots
    #[arg(long)]
    all: bool,
    /// Show the 32-digit binary word instead of hex (text format only)
    #[arg(long)]
    show_bits: bool,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let img = load_image(&cli.input)?;
    let report = Report::build(&img, cli.all);
    tracing::debug!(image = %img.name, rows = report.rows.len(), invalid = report.invalid(), "listing built");

    let text = match cli.format {
        OutputFormat::Text => render_text(&report, cli.show_bits),
        OutputFormat::Json => serde_json::to_string_pretty(&report)? + "\n",
    };
    if let Some(path) = cli.out { std::fs::write(path, text)?; } else { print!("{}", text); }
    Ok(())
}
