use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mips_asm::{initialize, AsmConfig, Assembler, ImageKinds, Layout};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble MIPS-subset source into memory images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct ImageOpts {
    /// Directory the .mem images are written to
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,
    /// JSON config (capacities, file names, layout)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// On-disk layout; overrides the config file
    #[arg(long, value_enum)]
    layout: Option<Layout>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write zero-filled instruction, data and register images
    Init {
        #[command(flatten)]
        images: ImageOpts,
    },
    /// Initialize images, then assemble SOURCE into instruction memory
    Assemble {
        #[arg(value_name = "SOURCE", default_value = "test.asm")]
        source: PathBuf,
        #[command(flatten)]
        images: ImageOpts,
    },
}

fn load_config(opts: &ImageOpts) -> Result<AsmConfig> {
    let mut cfg = match &opts.config {
        Some(path) => AsmConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AsmConfig::default(),
    };
    if let Some(layout) = opts.layout {
        cfg.layout = layout;
    }
    Ok(cfg)
}

fn assemble(source: &Path, opts: &ImageOpts) -> Result<()> {
    let cfg = load_config(opts)?;
    let file = File::open(source).with_context(|| format!("opening {}", source.display()))?;
    let mut images = initialize(&opts.dir, &cfg)?;

    let mut asm = Assembler::new(&mut images.instruction);
    let result = asm.assemble(BufReader::new(file));
    drop(asm);

    // The prefix written before a failure is still persisted.
    images.persist(&opts.dir, &cfg, ImageKinds::INSTRUCTION)?;
    let summary = result.with_context(|| format!("assembling {}", source.display()))?;

    println!(
        "{}: {} words written to {}",
        source.display(),
        summary.words,
        opts.dir.join(&cfg.instruction_file).display()
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Init { images } => {
            let cfg = load_config(&images)?;
            initialize(&images.dir, &cfg)?;
        }
        Command::Assemble { source, images } => assemble(&source, &images)?,
    }
    Ok(())
}
