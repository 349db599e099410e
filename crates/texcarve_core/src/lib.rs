//! Core inference pipeline for recovering block-compressed textures from
//! headerless game-asset archives.
//!
//! The archive carries no index and no per-frame metadata, so everything is
//! inferred from the bytes: frame boundaries by signature scanning, payload
//! recovery by bounded retry around the decompressor, texture format by
//! statistical probes, and pixel dimensions by factoring the block count.

pub mod archive;
pub mod classify;
pub mod codec;
pub mod decompress;
mod error;
pub mod extract;
pub mod format;
pub mod geometry;
pub mod locator;

pub use archive::ArchiveBuffer;
pub use classify::{ClassifierConfig, FormatClassifier, FORMAT_REGISTRY};
pub use decompress::{FrameDecompressor, ZstdFrameDecompressor};
pub use error::{CoreError, Result};
pub use extract::{FrameExtractor, TRAILER_TRIM};
pub use format::TextureFormat;
pub use geometry::{squarest_factors, TextureLayout};
pub use locator::{carve_spans, FrameLocator, FrameSpan, FRAME_MAGIC};
