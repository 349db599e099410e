use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-run payload artifacts: one `<index>.bin` per extracted frame, so the
/// convert pass can re-run without touching the archive.
pub struct PayloadStore {
    dir: PathBuf,
}

impl PayloadStore {
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create payload directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("payload directory {} does not exist", dir.display());
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    #[must_use]
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{index}.bin"))
    }

    pub fn write(&self, index: usize, payload: &[u8]) -> Result<()> {
        let path = self.path_for(index);
        fs::write(&path, payload)
            .with_context(|| format!("failed to write payload {}", path.display()))
    }

    pub fn read(&self, index: usize) -> std::io::Result<Vec<u8>> {
        fs::read(self.path_for(index))
    }

    /// Highest frame index with a persisted artifact, or `None` for an
    /// empty store. Index holes below the maximum are possible when frames
    /// failed extraction; the convert pass walks and reports them.
    pub fn max_index(&self) -> Result<Option<usize>> {
        let mut max = None;
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list payload directory {}", self.dir.display()))?
        {
            let name = entry?.file_name();
            let path = Path::new(&name);
            if path.extension().and_then(|e| e.to_str()) != Some("bin") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(index) = stem.parse::<usize>() {
                max = Some(max.map_or(index, |m: usize| m.max(index)));
            }
        }
        Ok(max)
    }
}
