use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::dataset::sink::PageSink;
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::template::document::Page;

/// Pages per image shard directory.
pub const SHARD_SIZE: u64 = 10_000;

/// JPEG quality used for page images.
pub const JPEG_QUALITY: u8 = 95;

/// Label file name at the dataset root.
pub const GT_FILE: &str = "gt.txt";

/// Dataset-relative image path of page `index`: `images/<index / 10000>/<index>.jpg`.
pub fn image_rel_path(index: u64) -> String {
    format!("images/{}/{index}.jpg", index / SHARD_SIZE)
}

/// Writes sharded JPEG images and a tab-separated `gt.txt` label file.
///
/// The label file is opened in append mode in `begin` and closed in `end`. A label line is
/// written only after its image has been saved.
#[derive(Debug)]
pub struct DatasetWriter {
    root: PathBuf,
    gt: Option<BufWriter<File>>,
}

impl DatasetWriter {
    /// Writer rooted at `root`. Nothing touches the filesystem until `begin`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            gt: None,
        }
    }

    /// Dataset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write_image(&self, index: u64, page: &Page) -> DocsynthResult<String> {
        let rel = image_rel_path(index);
        let path = self.root.join(&rel);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                DocsynthError::io(format!("create shard dir '{}'", dir.display()), e)
            })?;
        }
        let file = File::create(&path)
            .map_err(|e| DocsynthError::io(format!("create image '{}'", path.display()), e))?;
        let mut out = BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
            .encode_image(&page.to_rgb_image())
            .map_err(|e| {
                DocsynthError::io(
                    format!("encode image '{}'", path.display()),
                    std::io::Error::other(e),
                )
            })?;
        out.flush()
            .map_err(|e| DocsynthError::io(format!("flush image '{}'", path.display()), e))?;
        Ok(rel)
    }
}

impl PageSink for DatasetWriter {
    fn begin(&mut self) -> DocsynthResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            DocsynthError::io(format!("create dataset root '{}'", self.root.display()), e)
        })?;
        let path = self.root.join(GT_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| DocsynthError::io(format!("open '{}'", path.display()), e))?;
        self.gt = Some(BufWriter::new(file));
        Ok(())
    }

    fn push_page(&mut self, index: u64, page: &Page) -> DocsynthResult<()> {
        if self.gt.is_none() {
            return Err(DocsynthError::configuration(
                "dataset writer used before begin()",
            ));
        }
        let rel = self.write_image(index, page)?;
        let label = page.label().replace(['\t', '\n', '\r'], " ");
        let gt = self
            .gt
            .as_mut()
            .ok_or_else(|| DocsynthError::configuration("dataset writer used before begin()"))?;
        writeln!(gt, "{rel}\t{label}")
            .and_then(|()| gt.flush())
            .map_err(|e| DocsynthError::io(format!("append label for page {index}"), e))
    }

    fn end(&mut self) -> DocsynthResult<()> {
        if let Some(mut gt) = self.gt.take() {
            gt.flush()
                .map_err(|e| DocsynthError::io(format!("close {GT_FILE}"), e))?;
        }
        Ok(())
    }
}

impl Drop for DatasetWriter {
    fn drop(&mut self) {
        if let Some(gt) = self.gt.as_mut() {
            let _ = gt.flush();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/writer.rs"]
mod tests;
