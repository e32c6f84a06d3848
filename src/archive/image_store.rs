use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::archive::ArchiveError;
use crate::archive::mimetype::{detect_mimetype, is_image};

/// Directory of downloaded watercolors, one `{painting_number}.jpg` per record.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn create(dir: &Path) -> Result<Self, ArchiveError> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn path_for(&self, painting_number: u32) -> PathBuf {
        self.dir.join(format!("{}.jpg", painting_number))
    }

    /// Writes the image through a `.part` file and renames it into place, so the
    /// final name only ever refers to a complete download.
    pub fn save(&self, painting_number: u32, bytes: &[u8]) -> Result<PathBuf, ArchiveError> {
        let mime = detect_mimetype(bytes);
        if !is_image(&mime) {
            return Err(ArchiveError::NotAnImage { painting_number, mime });
        }
        if mime != "image/jpeg" {
            warn!("Painting {} is {}, saving under .jpg anyway", painting_number, mime);
        }

        let final_path = self.path_for(painting_number);
        let part_path = final_path.with_extension("jpg.part");
        if let Err(e) = write_and_rename(&part_path, &final_path, bytes) {
            let _ = fs::remove_file(&part_path);
            return Err(e.into());
        }
        Ok(final_path)
    }
}

fn write_and_rename(part_path: &Path, final_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(part_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(part_path, final_path)
}
