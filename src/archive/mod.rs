//! Local message archive
//!
//! Fetched room messages are written to
//! `<base>/room_<id>/<YYYYMMDD>/<HHMM>_<diff|full>.txt`. A second write in
//! the same minute for the same room and mode replaces the earlier file.

mod path;
mod transcript;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::api::ChatworkError;
use crate::models::{Account, Message};

pub use path::normalize_dest_dir;
pub use transcript::format_transcript;

/// Retrieval mode, carried to the API as `force`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveMode {
    /// Only messages the server has not yet delivered (`force=0`)
    Diff,
    /// Latest history regardless of read position (`force=1`)
    Full,
}

impl ArchiveMode {
    pub fn from_force(force: u8) -> Result<Self, ChatworkError> {
        match force {
            0 => Ok(ArchiveMode::Diff),
            1 => Ok(ArchiveMode::Full),
            other => Err(ChatworkError::InvalidArgument(format!(
                "force must be 0 (diff) or 1 (full), got {}",
                other
            ))),
        }
    }

    pub fn force(self) -> u8 {
        match self {
            ArchiveMode::Diff => 0,
            ArchiveMode::Full => 1,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            ArchiveMode::Diff => "diff",
            ArchiveMode::Full => "full",
        }
    }

    /// Full mode always writes; an empty diff writes nothing.
    pub fn should_archive(self, messages: &[Message]) -> bool {
        self == ArchiveMode::Full || !messages.is_empty()
    }
}

/// Target file for an archive written at `now`.
pub fn archive_file(
    base: &Path,
    room_id: i64,
    mode: ArchiveMode,
    now: &DateTime<Local>,
) -> PathBuf {
    base.join(format!("room_{}", room_id))
        .join(now.format("%Y%m%d").to_string())
        .join(format!("{}_{}.txt", now.format("%H%M"), mode.suffix()))
}

/// Write the transcript and return the absolute file path.
///
/// Directories are created as needed. A failure after the directory exists
/// leaves it in place.
pub async fn write_archive(
    base: &Path,
    room_id: i64,
    mode: ArchiveMode,
    messages: &[Message],
    now: &DateTime<Local>,
) -> Result<PathBuf, ChatworkError> {
    let file = archive_file(base, room_id, mode, now);
    if let Some(dir) = file.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    tokio::fs::write(&file, format_transcript(messages)).await?;
    let file = std::path::absolute(&file)?;
    tracing::info!(
        "Archived {} message(s) from room {} to {}",
        messages.len(),
        room_id,
        file.display()
    );
    Ok(file)
}

/// Record returned instead of the messages in full mode.
pub fn confirmation_message(file: &Path, now: &DateTime<Local>) -> Message {
    let stamp = now.timestamp();
    Message {
        message_id: "system".to_string(),
        account: Account::system(),
        body: format!("メッセージ履歴を保存しました: {}", file.display()),
        send_time: stamp,
        update_time: stamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, h, m, 41).unwrap()
    }

    fn message(body: &str) -> Message {
        Message {
            message_id: "42".to_string(),
            account: Account::system(),
            body: body.to_string(),
            send_time: 1_709_950_000,
            update_time: 0,
        }
    }

    #[test]
    fn test_force_parse() {
        assert_eq!(ArchiveMode::from_force(0).unwrap(), ArchiveMode::Diff);
        assert_eq!(ArchiveMode::from_force(1).unwrap(), ArchiveMode::Full);
        assert_eq!(
            ArchiveMode::from_force(2).unwrap_err().kind(),
            "invalid_argument"
        );
    }

    #[test]
    fn test_should_archive() {
        assert!(ArchiveMode::Full.should_archive(&[]));
        assert!(!ArchiveMode::Diff.should_archive(&[]));
        assert!(ArchiveMode::Diff.should_archive(&[message("x")]));
    }

    #[test]
    fn test_archive_file_layout() {
        let file = archive_file(Path::new("/tmp/x"), 123, ArchiveMode::Diff, &at(7, 5));
        assert_eq!(file, PathBuf::from("/tmp/x/room_123/20240309/0705_diff.txt"));

        let file = archive_file(Path::new("/tmp/x"), 123, ArchiveMode::Full, &at(23, 59));
        assert_eq!(file, PathBuf::from("/tmp/x/room_123/20240309/2359_full.txt"));
    }

    #[tokio::test]
    async fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let messages = vec![message("one"), message("two")];

        let file = write_archive(dir.path(), 5, ArchiveMode::Diff, &messages, &at(10, 0))
            .await
            .unwrap();

        assert!(file.is_absolute());
        assert!(file.ends_with("room_5/20240309/1000_diff.txt"));
        let content = std::fs::read_to_string(&file).unwrap();
        assert_eq!(content, format_transcript(&messages));
    }

    #[tokio::test]
    async fn test_same_minute_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path(), 5, ArchiveMode::Full, &[message("old")], &at(10, 0))
            .await
            .unwrap();
        let file = write_archive(dir.path(), 5, ArchiveMode::Full, &[message("new")], &at(10, 0))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&file).unwrap();
        assert!(content.contains("new"));
        assert!(!content.contains("old"));
    }

    #[tokio::test]
    async fn test_unwritable_base_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_archive(&blocker, 5, ArchiveMode::Full, &[], &at(10, 0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "io_error");
    }

    #[test]
    fn test_confirmation_record() {
        let now = at(12, 30);
        let msg = confirmation_message(Path::new("/tmp/x/room_1/20240309/1230_full.txt"), &now);
        assert_eq!(msg.message_id, "system");
        assert_eq!(msg.account, Account::system());
        assert_eq!(msg.send_time, now.timestamp());
        assert!(msg.body.ends_with("/tmp/x/room_1/20240309/1230_full.txt"));
    }
}
