use memchr::memmem::Finder;

/// Leading signature of every compressed frame, as the bytes appear in the
/// stream (`0x28B52FFD` when read as a big-endian 32-bit integer).
pub const FRAME_MAGIC: &[u8; 4] = &[0x28, 0xB5, 0x2F, 0xFD];

/// Finds frame start offsets by scanning for the fixed magic at every byte
/// position. Frames are packed back to back with no padding, so the scan
/// must be unaligned.
#[derive(Debug, Clone)]
pub struct FrameLocator {
    finder: Finder<'static>,
}

impl FrameLocator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            finder: Finder::new(FRAME_MAGIC),
        }
    }

    /// Every offset whose 4 bytes equal the frame magic, in ascending order.
    /// Each match is treated as a frame start; an empty result simply means
    /// zero frames.
    #[must_use]
    pub fn scan(&self, buffer: &[u8]) -> Vec<usize> {
        self.finder.find_iter(buffer).collect()
    }

    #[inline]
    pub fn scan_callback<F>(&self, buffer: &[u8], mut callback: F)
    where
        F: FnMut(usize),
    {
        for offset in self.finder.find_iter(buffer) {
            callback(offset);
        }
    }
}

impl Default for FrameLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// One frame's byte range in the archive, tagged with its 0-based position
/// in the offset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpan {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl FrameSpan {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Partitions the buffer suffix from the first offset onward into contiguous
/// spans: each span ends where the next frame begins, the last one at
/// `buffer_len`.
#[must_use]
pub fn carve_spans(offsets: &[usize], buffer_len: usize) -> Vec<FrameSpan> {
    offsets
        .iter()
        .enumerate()
        .map(|(index, &start)| {
            let end = offsets.get(index + 1).copied().unwrap_or(buffer_len);
            FrameSpan { index, start, end }
        })
        .collect()
}
