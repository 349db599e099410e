//! texcarve - recovers block-compressed textures from headerless game-asset
//! archives.
//!
//! Frames are located by signature, decompressed, classified by statistical
//! probes, sized by block-count factorization, and decoded to PNG images.

mod pipeline;
mod store;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "texcarve")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Asset archive to process.
    #[arg(required_unless_present = "convert_only")]
    archive: Option<PathBuf>,

    /// Output directory for decompressed payloads and images.
    #[arg(short, long, default_value = "./out")]
    output: PathBuf,

    /// Only locate frames and print their offsets.
    #[arg(long, default_value_t = false, conflicts_with_all = ["extract_only", "convert_only"])]
    list_frames: bool,

    /// Run only the locate+extract pass.
    #[arg(long, default_value_t = false, conflicts_with = "convert_only")]
    extract_only: bool,

    /// Run only the classify+decode pass over existing payloads.
    #[arg(long, default_value_t = false)]
    convert_only: bool,

    /// Print every frame's classification and dimensions.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_frames {
        let Some(archive) = args.archive.as_deref() else {
            anyhow::bail!("--list-frames requires an archive path");
        };
        return pipeline::run_list(archive);
    }

    let mut extract_summary = None;
    let mut convert_summary = None;

    if !args.convert_only {
        let Some(archive) = args.archive.as_deref() else {
            anyhow::bail!("an archive path is required unless --convert-only is set");
        };
        extract_summary = Some(pipeline::run_extract(archive, &args.output)?);
    }

    if !args.extract_only {
        convert_summary = Some(pipeline::run_convert(&args.output, args.verbose)?);
    }

    pipeline::print_summary(extract_summary.as_ref(), convert_summary.as_ref());

    Ok(())
}
