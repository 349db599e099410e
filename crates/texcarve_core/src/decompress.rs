use crate::error::{CoreError, Result};

/// Ceiling on a declared frame content size; a frame claiming more is
/// treated as corrupt rather than allocated.
const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

/// Output capacity used when a frame header does not declare its content
/// size.
const FALLBACK_CAPACITY: usize = 16 * 1024 * 1024;

/// One-shot decompression of exactly one compressed frame.
///
/// The extractor only ever hands in what it believes is a single frame; any
/// mismatch (trailing bytes past the frame end, truncation, a corrupt
/// header) must come back as an error so the caller can apply its retry
/// policy.
pub trait FrameDecompressor {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Production decompressor backed by the zstd one-shot API.
///
/// Output capacity comes from the frame's declared content size where the
/// header carries one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZstdFrameDecompressor;

impl ZstdFrameDecompressor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FrameDecompressor for ZstdFrameDecompressor {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let capacity = match zstd::zstd_safe::get_frame_content_size(input) {
            Ok(Some(declared)) if declared as usize <= MAX_PAYLOAD_SIZE => declared as usize,
            Ok(Some(declared)) => {
                return Err(CoreError::FrameDecompress(format!(
                    "declared content size {declared} exceeds {MAX_PAYLOAD_SIZE} byte ceiling"
                )));
            }
            _ => FALLBACK_CAPACITY,
        };

        zstd::bulk::decompress(input, capacity)
            .map_err(|e| CoreError::FrameDecompress(e.to_string()))
    }
}
