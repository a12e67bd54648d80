use std::path::{Path, PathBuf};

use crate::{error::IoError, functional::is_supported_extension};

/// List the BMP and JPEG images of a directory, sorted by file name.
///
/// Extensions are matched case-insensitively. Subdirectories are not visited.
pub fn list_images(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, IoError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(IoError::FileDoesNotExist(dir.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_extension(&path) {
            images.push(path);
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    log::debug!("found {} images in {}", images.len(), dir.display());

    Ok(images)
}

/// Pick the `number`-th image (1-based) of [`list_images`].
pub fn select_image(dir: impl AsRef<Path>, number: usize) -> Result<PathBuf, IoError> {
    let images = list_images(dir)?;
    let count = images.len();
    number
        .checked_sub(1)
        .and_then(|idx| images.into_iter().nth(idx))
        .ok_or(IoError::InvalidSelection(number, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_and_select() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        for name in ["b.JPG", "a.bmp", "c.jpeg", "notes.txt", "d.png"] {
            std::fs::write(tmp_dir.path().join(name), b"")?;
        }
        std::fs::create_dir(tmp_dir.path().join("sub.bmp"))?;

        let images = list_images(tmp_dir.path())?;
        let names: Vec<_> = images
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["a.bmp", "b.JPG", "c.jpeg"]);

        assert_eq!(select_image(tmp_dir.path(), 2)?, tmp_dir.path().join("b.JPG"));
        assert!(matches!(
            select_image(tmp_dir.path(), 0),
            Err(IoError::InvalidSelection(0, 3))
        ));
        assert!(matches!(
            select_image(tmp_dir.path(), 4),
            Err(IoError::InvalidSelection(4, 3))
        ));

        Ok(())
    }

    #[test]
    fn list_missing_dir() {
        assert!(matches!(
            list_images("/definitely/not/a/dir"),
            Err(IoError::FileDoesNotExist(_))
        ));
    }
}
