use anyhow::{Context, Result};
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;

use texcarve_core::{
    carve_spans, codec, ArchiveBuffer, FormatClassifier, FrameExtractor, FrameLocator,
    TextureFormat, ZstdFrameDecompressor,
};

use crate::store::PayloadStore;

pub const PAYLOAD_DIR: &str = "decompressed";
pub const IMAGE_DIR: &str = "images";

const FORMAT_TALLY_ORDER: [TextureFormat; 6] = [
    TextureFormat::Bc1,
    TextureFormat::Bc2,
    TextureFormat::Bc3,
    TextureFormat::Bc4,
    TextureFormat::Bc5,
    TextureFormat::R8,
];

#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractSummary {
    pub frames_located: usize,
    pub frames_extracted: usize,
    pub frames_corrupt: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertSummary {
    pub images_written: usize,
    pub payloads_missing: usize,
    pub frames_degraded: usize,
    pub format_tally: [usize; 6],
}

impl ConvertSummary {
    fn count(&mut self, format: TextureFormat) {
        let slot = FORMAT_TALLY_ORDER
            .iter()
            .position(|f| *f == format)
            .expect("tally covers every format");
        self.format_tally[slot] += 1;
    }
}

/// Pass 1: locate every compressed frame in the archive, decompress each
/// span (with the trim retry), and persist one payload artifact per frame
/// index.
pub fn run_extract(archive_path: &Path, output_dir: &Path) -> Result<ExtractSummary> {
    let started = Instant::now();

    let archive = ArchiveBuffer::open(archive_path)
        .with_context(|| format!("failed to open archive {}", archive_path.display()))?;

    println!(
        "[Extract] Archive: {} ({})",
        archive_path.display(),
        format_size(archive.len() as u64, BINARY)
    );

    let offsets = FrameLocator::new().scan(&archive);
    let spans = carve_spans(&offsets, archive.len());
    println!("[Extract] {} compressed frames located", spans.len());

    let store = PayloadStore::create(&output_dir.join(PAYLOAD_DIR))?;
    let extractor = FrameExtractor::new(ZstdFrameDecompressor::new());

    let pb = ProgressBar::new(spans.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[Extract] [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})")
            .expect("invalid progress bar template - this is a bug")
            .progress_chars("=>-"),
    );

    let mut summary = ExtractSummary {
        frames_located: spans.len(),
        ..Default::default()
    };

    for span in &spans {
        match extractor.extract(&archive, *span) {
            Ok(payload) => {
                store.write(span.index, &payload)?;
                summary.frames_extracted += 1;
            }
            Err(e) => {
                pb.println(format!(
                    "[Extract] frame {} at offset 0x{:X} is corrupt: {}",
                    span.index, span.start, e
                ));
                summary.frames_corrupt += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "[Extract] Complete in {:.1}s - {} extracted, {} corrupt",
        started.elapsed().as_secs_f64(),
        summary.frames_extracted,
        summary.frames_corrupt
    );

    Ok(summary)
}

/// Pass 2: classify every persisted payload, infer its pixel grid, decode
/// the blocks, and write one PNG per frame index. Runs independently of
/// pass 1 and of the archive itself.
pub fn run_convert(output_dir: &Path, verbose: bool) -> Result<ConvertSummary> {
    let started = Instant::now();

    let store = PayloadStore::open(&output_dir.join(PAYLOAD_DIR))?;
    let image_dir = output_dir.join(IMAGE_DIR);
    std::fs::create_dir_all(&image_dir)
        .with_context(|| format!("failed to create image directory {}", image_dir.display()))?;

    let Some(max_index) = store.max_index()? else {
        println!("[Convert] No payloads found, nothing to convert");
        return Ok(ConvertSummary::default());
    };
    let total = max_index + 1;

    let classifier = FormatClassifier::new();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[Convert] [{bar:40.yellow/black}] {pos}/{len} payloads ({eta})")
            .expect("invalid progress bar template - this is a bug")
            .progress_chars("=>-"),
    );

    let mut summary = ConvertSummary::default();

    for index in 0..total {
        let payload = match store.read(index) {
            Ok(payload) => payload,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                pb.println(format!("[Convert] payload {index} missing, skipping"));
                summary.payloads_missing += 1;
                pb.inc(1);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read payload {index}"));
            }
        };

        let format = classifier.classify(&payload);
        summary.count(format);

        let decoded = codec::decode_payload(&payload, format);
        if decoded.layout.block_count == 0 {
            pb.println(format!(
                "[Convert] payload {index} holds no whole {format} block, skipping"
            ));
            summary.frames_degraded += 1;
            pb.inc(1);
            continue;
        }

        if verbose {
            pb.println(format!(
                "[Convert] frame {index}: {format} {}x{}",
                decoded.layout.width_px, decoded.layout.height_px
            ));
        }

        let image = image::RgbaImage::from_raw(
            decoded.layout.width_px as u32,
            decoded.layout.height_px as u32,
            decoded.rgba,
        )
        .context("decoded RGBA buffer does not match inferred dimensions")?;

        let path = image_dir.join(format!("{index}.png"));
        image
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        summary.images_written += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "[Convert] Complete in {:.1}s - {} images, {} missing, {} degraded",
        started.elapsed().as_secs_f64(),
        summary.images_written,
        summary.payloads_missing,
        summary.frames_degraded
    );

    Ok(summary)
}

/// Scan-only mode: print every frame offset and span size without
/// extracting anything.
pub fn run_list(archive_path: &Path) -> Result<()> {
    let archive = ArchiveBuffer::open(archive_path)
        .with_context(|| format!("failed to open archive {}", archive_path.display()))?;

    let offsets = FrameLocator::new().scan(&archive);
    let spans = carve_spans(&offsets, archive.len());

    println!(
        "{} frames in {} ({})\n",
        spans.len(),
        archive_path.display(),
        format_size(archive.len() as u64, BINARY)
    );
    println!("{:<8} {:>12} {:>12}", "FRAME", "OFFSET", "SPAN");
    println!("{}", "-".repeat(34));
    for span in &spans {
        println!(
            "{:<8} {:>12} {:>12}",
            span.index,
            format!("0x{:X}", span.start),
            format_size(span.len() as u64, BINARY)
        );
    }

    Ok(())
}

pub fn print_summary(extract: Option<&ExtractSummary>, convert: Option<&ConvertSummary>) {
    println!("\n╔════════════════════════════════════════╗");
    println!("║          === Run Complete ===          ║");
    println!("╠════════════════════════════════════════╣");
    if let Some(extract) = extract {
        println!("║ Frames Located:     {:>18} ║", extract.frames_located);
        println!("║ Frames Extracted:   {:>18} ║", extract.frames_extracted);
        println!("║ Corrupt Frames:     {:>18} ║", extract.frames_corrupt);
    }
    if let Some(convert) = convert {
        println!("║ Images Written:     {:>18} ║", convert.images_written);
        println!("║ Missing Payloads:   {:>18} ║", convert.payloads_missing);
        println!("║ Degraded Frames:    {:>18} ║", convert.frames_degraded);
        for (slot, format) in FORMAT_TALLY_ORDER.iter().enumerate() {
            if convert.format_tally[slot] > 0 {
                println!(
                    "║   {:<4}              {:>18} ║",
                    format.name(),
                    convert.format_tally[slot]
                );
            }
        }
    }
    println!("╚════════════════════════════════════════╝");
}
