use crate::{GenerationError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn parent_dir(destination: &Path) -> PathBuf {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> GenerationError {
    tracing::error!("Failed to {} {}: {}", action, path.display(), err);
    GenerationError::Download(format!("failed to {} {}: {}", action, path.display(), err))
}

/// Create every missing parent directory of `destination`.
pub async fn prepare_destination(destination: &Path) -> Result<()> {
    let parent = parent_dir(destination);
    tokio::fs::create_dir_all(&parent)
        .await
        .map_err(|e| io_error("create directory", &parent, e))
}

/// Atomically write `bytes` to `destination`, replacing any existing file.
///
/// Returns the absolute path of the written file.
pub async fn save_image(bytes: Vec<u8>, destination: &Path) -> Result<PathBuf> {
    let destination = destination.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic(&bytes, &destination))
        .await
        .map_err(|e| GenerationError::Download(format!("image write task join error: {}", e)))?
}

fn write_atomic(bytes: &[u8], destination: &Path) -> Result<PathBuf> {
    let parent = parent_dir(destination);
    let absolute =
        std::path::absolute(destination).map_err(|e| io_error("resolve", destination, e))?;

    let mut file = NamedTempFile::new_in(&parent)
        .map_err(|e| io_error("create temporary file in", &parent, e))?;
    file.write_all(bytes)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| io_error("write", file.path(), e))?;
    file.persist(&absolute)
        .map_err(|e| io_error("replace", &absolute, e.error))?;

    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_prepare_destination_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("a/b/c/out.jpeg");

        prepare_destination(&destination).await.unwrap();
        assert!(dir.path().join("a/b/c").is_dir());

        // Idempotent when the directory already exists.
        prepare_destination(&destination).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_image_writes_bytes_and_returns_absolute_path() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("out.jpeg");

        let path = save_image(vec![1, 2, 3], &destination).await.unwrap();

        assert!(path.is_absolute());
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_save_image_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("out.jpeg");
        std::fs::write(&destination, b"old contents that are longer").unwrap();

        save_image(b"new".to_vec(), &destination).await.unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"new");
        // Only the final file remains, no stray temporaries.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_save_image_missing_directory_is_download_error() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("missing/out.jpeg");

        let err = save_image(vec![0], &destination).await.unwrap_err();
        assert!(matches!(err, GenerationError::Download(_)));
        assert!(!destination.exists());
    }

    #[test]
    fn test_parent_dir_of_bare_file_name() {
        assert_eq!(parent_dir(Path::new("out.jpeg")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("a/out.jpeg")), PathBuf::from("a"));
    }
}
