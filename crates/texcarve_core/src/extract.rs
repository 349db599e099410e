use crate::decompress::FrameDecompressor;
use crate::error::Result;
use crate::locator::FrameSpan;

/// Stray metadata bytes that sometimes trail a frame's last meaningful byte
/// before the next magic. Dropped on the single retry after a failed
/// full-span decompression.
pub const TRAILER_TRIM: usize = 39;

/// Decompresses carved frame spans, with a bounded retry for spans that
/// over-read into trailer bytes.
#[derive(Debug, Clone)]
pub struct FrameExtractor<D> {
    decompressor: D,
    trailer_trim: usize,
}

impl<D: FrameDecompressor> FrameExtractor<D> {
    pub fn new(decompressor: D) -> Self {
        Self {
            decompressor,
            trailer_trim: TRAILER_TRIM,
        }
    }

    /// Decompresses one frame span. A failed first attempt is retried
    /// exactly once with the span shortened by the trailer trim; a second
    /// failure is the frame's error. Never more than two attempts.
    pub fn extract(&self, buffer: &[u8], span: FrameSpan) -> Result<Vec<u8>> {
        let frame = &buffer[span.start..span.end];
        match self.decompressor.decompress(frame) {
            Ok(payload) => Ok(payload),
            Err(first) => {
                if frame.len() <= self.trailer_trim {
                    return Err(first);
                }
                self.decompressor
                    .decompress(&frame[..frame.len() - self.trailer_trim])
            }
        }
    }
}
