use crate::error::{CoreError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// The whole input file, mapped read-only.
///
/// Frames are carved as subslices of this buffer; nothing is copied until a
/// span reaches the decompressor.
pub struct ArchiveBuffer {
    mmap: Mmap,
}

impl ArchiveBuffer {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        if file.metadata()?.len() == 0 {
            return Err(CoreError::EmptyArchive);
        }

        let mmap = unsafe { Mmap::map(&file) }?;

        #[cfg(target_os = "linux")]
        {
            use memmap2::Advice;
            let _ = mmap.advise(Advice::Sequential);
        }

        Ok(Self { mmap })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }
}

impl std::ops::Deref for ArchiveBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.mmap
    }
}
