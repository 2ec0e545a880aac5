use std::path::{Path, PathBuf};

use crate::error::AppError;

const PAGE_EXTENSION: &str = "png";

/// Writes page images into `{root}/{chapter_title}/{NNN}.png`.
///
/// Directories are created on demand and existing files are overwritten, so a
/// re-run of the same series converges to the same tree.
pub struct PageWriter;

impl PageWriter {
    pub async fn save(
        &self,
        root: &Path,
        chapter_title: &str,
        page_index: u32,
        bytes: &[u8],
    ) -> Result<PathBuf, AppError> {
        let dir = root.join(chapter_title);
        tokio::fs::create_dir_all(&dir).await?;

        let dest = dir.join(format!("{page_index:03}.{PAGE_EXTENSION}"));
        tokio::fs::write(&dest, bytes).await?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_zero_pads_the_page_index() {
        let root = tempfile::tempdir().unwrap();
        let writer = PageWriter;

        let dest = writer
            .save(root.path(), "chapter one", 7, b"data")
            .await
            .unwrap();

        assert_eq!(dest, root.path().join("chapter one").join("007.png"));
        assert_eq!(std::fs::read(dest).unwrap(), b"data");
    }

    #[tokio::test]
    async fn save_overwrites_and_tolerates_existing_directories() {
        let root = tempfile::tempdir().unwrap();
        let writer = PageWriter;

        std::fs::create_dir_all(root.path().join("ch")).unwrap();

        writer.save(root.path(), "ch", 0, b"first").await.unwrap();
        writer.save(root.path(), "ch", 0, b"second").await.unwrap();

        let dest = root.path().join("ch").join("000.png");
        assert_eq!(std::fs::read(dest).unwrap(), b"second");
    }
}
