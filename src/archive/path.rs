//! Destination directory normalization
//!
//! Hosts sometimes hand over the directory percent-encoded, and shells on
//! Windows report MSYS-style `/c/...` paths. Both are turned into a path the
//! local filesystem accepts, or rejected with [`ChatworkError::InvalidPath`].

use std::path::PathBuf;

use crate::api::ChatworkError;

/// Normalize for the current platform.
pub fn normalize_dest_dir(raw: &str) -> Result<PathBuf, ChatworkError> {
    normalize(raw, cfg!(windows)).map(PathBuf::from)
}

/// `drive_letter_paths` selects Windows rules.
pub(crate) fn normalize(raw: &str, drive_letter_paths: bool) -> Result<String, ChatworkError> {
    if raw.trim().is_empty() {
        return Err(ChatworkError::InvalidArgument(
            "save_dir_path is required. Run `pwd` in the host shell first and pass the \
             printed directory, e.g. save_dir_path=\"C:\\Users\\me\\Documents\\mcp\"."
                .to_string(),
        ));
    }

    let decoded = urlencoding::decode(raw)
        .map_err(|_| ChatworkError::InvalidPath {
            path: raw.to_string(),
        })?
        .into_owned();

    if !drive_letter_paths || has_drive_prefix(&decoded) {
        return Ok(decoded);
    }

    match mount_point_to_drive(&decoded) {
        Some(path) => Ok(path),
        None => Err(ChatworkError::InvalidPath {
            path: raw.to_string(),
        }),
    }
}

/// `C:\...`
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\'
}

/// `/c/Users/x` -> `C:\Users\x`
fn mount_point_to_drive(path: &str) -> Option<String> {
    let rest = path.strip_prefix('/')?;
    let mut chars = rest.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    let tail = chars.as_str();
    if !(tail.is_empty() || tail.starts_with('/')) {
        return None;
    }

    let tail = tail.strip_prefix('/').unwrap_or(tail);
    Some(format!(
        "{}:\\{}",
        letter.to_ascii_uppercase(),
        tail.replace('/', "\\")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_invalid_argument() {
        let err = normalize("", false).unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
        let err = normalize("  ", true).unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
    }

    #[test]
    fn test_unix_path_passthrough() {
        assert_eq!(normalize("/tmp/x", false).unwrap(), "/tmp/x");
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(
            normalize("/home/me/My%20Docs", false).unwrap(),
            "/home/me/My Docs"
        );
        assert_eq!(
            normalize("C%3A%5CUsers%5Cme", true).unwrap(),
            "C:\\Users\\me"
        );
    }

    #[test]
    fn test_mount_point_rewrite() {
        assert_eq!(normalize("/c/Users/x", true).unwrap(), "C:\\Users\\x");
        assert_eq!(normalize("/d/work", true).unwrap(), "D:\\work");
        assert_eq!(normalize("/c", true).unwrap(), "C:\\");
    }

    #[test]
    fn test_decode_before_drive_check() {
        assert_eq!(normalize("%2Fc%2FUsers%2Fx", true).unwrap(), "C:\\Users\\x");
    }

    #[test]
    fn test_drive_path_kept() {
        assert_eq!(
            normalize("E:\\data\\chat", true).unwrap(),
            "E:\\data\\chat"
        );
    }

    #[test]
    fn test_non_conforming_rejected_on_windows() {
        for raw in ["/home/me", "relative\\dir", "C:/Users/me", "/cd/x"] {
            let err = normalize(raw, true).unwrap_err();
            assert_eq!(err.kind(), "invalid_path", "{}", raw);
            assert!(err.to_string().contains("pwd"));
        }
    }
}
