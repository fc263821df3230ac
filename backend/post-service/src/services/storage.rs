/// Local filesystem storage for uploaded post media
///
/// Files land under the configured media root as
/// `<timestamp>-<original filename>`. Names carry millisecond precision;
/// collisions are possible and not handled. Deleting a post does not clean
/// up its file.
use chrono::{DateTime, Utc};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<%Y-%m-%d-%H-%M-%S-%3f>-<original>`
    pub fn timestamped_name(original: &str, now: DateTime<Utc>) -> String {
        format!("{}-{}", now.format("%Y-%m-%d-%H-%M-%S-%3f"), original)
    }

    /// Write `bytes` under the media root, returning the full path
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self
            .root
            .join(Self::timestamped_name(original_name, Utc::now()));
        tokio::fs::write(&path, bytes).await?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn name_is_timestamp_dash_original() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap()
            + chrono::Duration::milliseconds(7);
        assert_eq!(
            MediaStore::timestamped_name("clip.mp4", at),
            "2024-03-07-14-05-09-007-clip.mp4"
        );
    }

    #[tokio::test]
    async fn save_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let path = store.save("photo.jpg", b"jpeg bytes").await.unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"jpeg bytes");
    }
}
