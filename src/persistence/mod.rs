//! Level store: level grid files and the best-time record
//!
//! Layout on disk:
//! - `<levels_dir>/level_<N>.txt` for every configured level
//! - the record file (see [`crate::highscores`])
//!
//! Missing level files are generated on demand, so a fresh install needs no
//! data files at all.

pub mod error;
pub mod level_file;

pub use error::{StoreError, StoreResult};
pub use level_file::{Repair, parse_level};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::HighScoreFile;
use crate::sim::grid::Grid;
use crate::sim::state::{LEVELS, level_config};

/// Reads and writes level grids and the highscore
#[derive(Debug, Clone)]
pub struct LevelStore {
    levels_dir: PathBuf,
    highscore: HighScoreFile,
    /// Drives generation of missing levels
    rng: Pcg32,
}

impl LevelStore {
    pub fn new(levels_dir: impl Into<PathBuf>, highscore_path: impl Into<PathBuf>, seed: u64) -> Self {
        Self {
            levels_dir: levels_dir.into(),
            highscore: HighScoreFile::new(highscore_path),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn levels_dir(&self) -> &Path {
        &self.levels_dir
    }

    /// File holding level `level`
    pub fn level_path(&self, level: u32) -> PathBuf {
        self.levels_dir.join(format!("level_{}.txt", level))
    }

    /// Generate every configured level whose file is missing.
    /// Returns how many files were written.
    pub fn ensure_levels(&mut self) -> StoreResult<usize> {
        fs::create_dir_all(&self.levels_dir).map_err(|e| StoreError::io(&self.levels_dir, e))?;

        let mut written = 0;
        for (index, config) in LEVELS.iter().enumerate() {
            let level = index as u32 + 1;
            let path = self.level_path(level);
            if path.exists() {
                continue;
            }
            let grid = Grid::generate(config.size, &mut self.rng);
            fs::write(&path, grid.to_text()).map_err(|e| StoreError::io(&path, e))?;
            log::info!("Generated level {} at {}", level, path.display());
            written += 1;
        }
        Ok(written)
    }

    /// Read level `level`, generating the level set first if its file is
    /// missing. Damaged files are repaired with a warning. Levels outside
    /// the level table fail with [`StoreError::UnknownLevel`].
    pub fn load_level(&mut self, level: u32) -> StoreResult<Grid> {
        let config = level_config(level).ok_or(StoreError::UnknownLevel { level })?;
        let path = self.level_path(level);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Level file {} missing, regenerating", path.display());
                self.ensure_levels()?;
                fs::read_to_string(&path).map_err(|e| match e.kind() {
                    io::ErrorKind::NotFound => StoreError::MissingAfterRegenerate { path: path.clone() },
                    _ => StoreError::io(&path, e),
                })?
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let (grid, repairs) = parse_level(&text, config.size);
        for repair in &repairs {
            log::warn!("{}: {}", path.display(), repair);
        }
        Ok(grid)
    }

    /// Stored best time, or the no-record sentinel
    pub fn load_highscore(&self) -> f64 {
        self.highscore.load()
    }

    /// Persist `candidate` if it beats the stored best. Returns whether it did.
    pub fn save_highscore(&self, candidate: f64) -> StoreResult<bool> {
        self.highscore
            .save(candidate)
            .map_err(|e| StoreError::io(self.highscore.path(), e))
    }
}
