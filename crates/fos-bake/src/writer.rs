//! Atlas output: image + index pair

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::baker::BakedAtlas;
use crate::canvas::AtlasCanvas;
use crate::source::ImageEncoder;
use crate::{BakeError, Result};

/// Extension of the glyph index file
pub const INDEX_EXTENSION: &str = "bin";

/// Lossless PNG encoding through tiny-skia
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn extension(&self) -> &str {
        "png"
    }

    fn encode(&self, canvas: &AtlasCanvas) -> Result<Vec<u8>> {
        canvas
            .pixmap()
            .encode_png()
            .map_err(|e| BakeError::ImageEncoding(e.to_string()))
    }
}

/// Paths of a written atlas pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub image: PathBuf,
    pub index: PathBuf,
}

/// Writes a baked atlas as `<dir>/<base>.<ext>` plus `<dir>/<base>.bin`.
///
/// Both files are written to temporary siblings first and renamed into
/// place. Any stale index is removed before the image is replaced and the
/// new index is renamed last, so an index on disk always sits next to the
/// image it describes.
#[derive(Debug, Clone)]
pub struct AtlasWriter {
    output_dir: PathBuf,
    base_name: String,
}

impl AtlasWriter {
    pub fn new(output_dir: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_name: base_name.into(),
        }
    }

    /// Writer named after the font file's stem
    pub fn for_font(output_dir: impl Into<PathBuf>, font_path: &Path) -> Result<Self> {
        let stem = font_path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                BakeError::InvalidConfig(format!(
                    "cannot derive an output name from {}",
                    font_path.display()
                ))
            })?;
        Ok(Self::new(output_dir, stem))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn image_path(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.base_name, extension))
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.base_name, INDEX_EXTENSION))
    }

    /// Encode and write both files
    pub fn write<E>(&self, atlas: &BakedAtlas, encoder: &E) -> Result<OutputPaths>
    where
        E: ImageEncoder + ?Sized,
    {
        let image_bytes = encoder.encode(&atlas.canvas)?;
        let index_bytes = atlas.index.to_bytes();

        fs::create_dir_all(&self.output_dir).map_err(|source| BakeError::OutputWrite {
            path: self.output_dir.clone(),
            source,
        })?;

        let paths = OutputPaths {
            image: self.image_path(encoder.extension()),
            index: self.index_path(),
        };
        let image_tmp = temp_path(&paths.image);
        let index_tmp = temp_path(&paths.index);

        let result = write_synced(&image_tmp, &image_bytes)
            .and_then(|()| write_synced(&index_tmp, &index_bytes))
            .and_then(|()| remove_if_exists(&paths.index))
            .and_then(|()| rename(&image_tmp, &paths.image))
            .and_then(|()| rename(&index_tmp, &paths.index));

        if let Err(e) = result {
            let _ = fs::remove_file(&image_tmp);
            let _ = fs::remove_file(&index_tmp);
            return Err(e);
        }

        tracing::debug!(
            "Wrote {} ({} bytes) and {} ({} bytes)",
            paths.image.display(),
            image_bytes.len(),
            paths.index.display(),
            index_bytes.len()
        );
        Ok(paths)
    }
}

/// `dir/name.ext` -> `dir/.name.ext.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    };
    write().map_err(|source| BakeError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| BakeError::OutputWrite {
        path: to.to_path_buf(),
        source,
    })
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BakeError::OutputWrite {
            path: path.to_path_buf(),
            source,
        }),
    }
}
