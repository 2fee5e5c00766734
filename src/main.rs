//! emopak CLI - pack, unpack and scaffold device asset images.
//!
//! This is the main entry point for the emopak command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use emopak::manifest::{AssetRole, MANIFEST_FILE};
use emopak::prelude::*;

/// emopak - asset image packer for embedded displays
#[derive(Parser)]
#[command(name = "emopak")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack an asset directory into a binary image
    Pack {
        /// Directory containing index.json and the assets it references
        input_dir: PathBuf,

        /// Output image file
        output_file: PathBuf,

        /// Also pack index.json as the first entry
        #[arg(long)]
        embed_manifest: bool,

        /// Do not read image dimensions; every entry is 0x0
        #[arg(long)]
        no_probe: bool,
    },

    /// Unpack a binary image into a directory
    Unpack {
        /// Image file to read
        input_file: PathBuf,

        /// Output directory
        output_dir: PathBuf,
    },

    /// Write a template index.json
    Template {
        /// Directory to create the template in
        output_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and succeed; anything else is a usage error.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Pack {
            input_dir,
            output_file,
            embed_manifest,
            no_probe,
        } => cmd_pack(&input_dir, &output_file, embed_manifest, no_probe),
        Commands::Unpack {
            input_file,
            output_dir,
        } => cmd_unpack(&input_file, &output_dir),
        Commands::Template { output_dir } => cmd_template(&output_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_pack(input_dir: &Path, output_file: &Path, embed_manifest: bool, no_probe: bool) -> Result<()> {
    println!("Packing: {} -> {}", input_dir.display(), output_file.display());

    let prober: Box<dyn ImageProber> = if no_probe {
        Box::new(NullProber)
    } else {
        default_prober()
    };
    tracing::info!(prober = prober.name(), "image prober selected");

    let options = CollectOptions { embed_manifest };
    let collection = collect_assets(input_dir, &options, prober.as_ref())
        .context("Failed to collect assets")?;

    println!("Found {} files:", collection.assets.len());
    for asset in &collection.assets {
        println!(
            "  {:<32} {:>10} bytes  {}x{}",
            asset.name,
            asset.content.len(),
            asset.width,
            asset.height
        );
    }

    for warning in &collection.warnings {
        eprintln!("Warning: {warning}");
    }

    let bytes = collection
        .to_builder()
        .build()
        .context("Failed to encode asset image")?;

    let archive = AssetArchive::parse(&bytes).context("Failed to verify encoded image")?;
    let header = archive.header();

    fs::write(output_file, &bytes)
        .with_context(|| format!("Failed to write {}", output_file.display()))?;

    println!();
    println!("Entries:        {}", header.entry_count());
    println!("Checksum:       0x{:04X}", header.checksum());
    println!("Payload length: {} bytes", header.payload_length());
    println!("Total size:     {} bytes", bytes.len());
    println!("Output:         {}", output_file.display());

    if !collection.warnings.is_empty() {
        println!("{} warnings", collection.warnings.len());
    }

    Ok(())
}

fn cmd_unpack(input_file: &Path, output_dir: &Path) -> Result<()> {
    println!("Unpacking: {} -> {}", input_file.display(), output_dir.display());

    let data = fs::read(input_file)
        .with_context(|| format!("Failed to read {}", input_file.display()))?;
    let archive = AssetArchive::parse(&data).context("Failed to parse asset image")?;
    let header = archive.header();

    println!("Entries:        {}", header.entry_count());
    println!(
        "Checksum:       0x{:04X} (computed 0x{:04X}, {})",
        header.checksum(),
        archive.computed_checksum(),
        if archive.checksum_valid() { "ok" } else { "MISMATCH" }
    );
    println!("Payload length: {} bytes", header.payload_length());
    println!();

    for entry in archive.iter() {
        println!(
            "  [{:>3}] {:<32} {:>10} bytes @ {:>10}  {}x{} -> {}",
            entry.index,
            entry.name,
            entry.size,
            entry.offset,
            entry.width,
            entry.height,
            output_dir.join(&*entry.name).display()
        );
    }

    let pb = ProgressBar::new(archive.entry_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let report = archive
        .extract_to(output_dir, |_| pb.inc(1))
        .context("Failed to extract assets")?;
    pb.finish_and_clear();

    let mut warnings = 0;
    for diagnostic in archive.diagnostics().iter().chain(&report.skipped) {
        eprintln!("Warning: {diagnostic}");
        warnings += 1;
    }

    println!(
        "Extracted {} of {} entries in {:?} ({} warnings)",
        report.written.len(),
        archive.entry_count(),
        start.elapsed(),
        warnings
    );

    Ok(())
}

fn cmd_template(output_dir: &Path) -> Result<()> {
    let path = write_template(output_dir)
        .with_context(|| format!("Failed to write template into {}", output_dir.display()))?;
    println!("Created {}", path.display());

    let manifest = Manifest::template();
    println!();
    println!("Place these images next to {MANIFEST_FILE} (32x32 PNG recommended):");
    for asset_ref in manifest.asset_refs() {
        if matches!(asset_ref.role, AssetRole::Emoji(_)) {
            println!("  {}", asset_ref.file);
        }
    }

    println!();
    println!("Optional customization in {MANIFEST_FILE}:");
    println!("  - edit the text and background colors under skin.light / skin.dark");
    println!("  - set skin.light/dark.background_image to use a background image");
    println!("  - set \"hide_subtitle\": true to hide subtitles");
    println!("  - add \"text_font\" or \"srmodels\" to pack a font or speech model");

    Ok(())
}
