//! Transcript rendering
//!
//! Each message becomes one block:
//!
//! ```text
//! ===============================
//! 本文（日時：2024-05-01 09:30:00）
//! body
//! 投稿元：https://example.com/source
//! ===============================
//! ```
//!
//! The `投稿元` line only appears when the body carried an `[info]` span.

use chrono::{DateTime, Local, Utc};

use crate::models::Message;

const RULE: &str = "===============================";
const INFO_OPEN: &str = "[info]";
const INFO_CLOSE: &str = "[/info]";

/// Body with the first `[info]...[/info]` span removed, plus its trimmed content.
pub fn split_source(body: &str) -> (String, Option<String>) {
    let Some(start) = body.find(INFO_OPEN) else {
        return (body.to_string(), None);
    };
    let inner_start = start + INFO_OPEN.len();
    let Some(len) = body[inner_start..].find(INFO_CLOSE) else {
        return (body.to_string(), None);
    };
    let inner_end = inner_start + len;

    let source = body[inner_start..inner_end].trim().to_string();
    let mut stripped = String::with_capacity(body.len());
    stripped.push_str(&body[..start]);
    stripped.push_str(&body[inner_end + INFO_CLOSE.len()..]);
    (stripped, Some(source))
}

/// Epoch seconds as local wall-clock time.
fn local_time(epoch_secs: i64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
}

/// Render one transcript block.
pub fn format_message(msg: &Message) -> String {
    let sent = local_time(msg.send_time).format("%Y-%m-%d %H:%M:%S");
    let (body, source) = split_source(&msg.body);

    let mut block = format!("{RULE}\n本文（日時：{sent}）\n{}", body.trim());
    if let Some(source) = source.filter(|s| !s.is_empty()) {
        block.push_str("\n投稿元：");
        block.push_str(&source);
    }
    block.push('\n');
    block.push_str(RULE);
    block
}

/// Render all messages in fetch order, separated by one blank line.
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(format_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    fn message(body: &str, send_time: i64) -> Message {
        Message {
            message_id: "1".to_string(),
            account: Account {
                account_id: 10,
                name: "Taro".to_string(),
                avatar_image_url: String::new(),
            },
            body: body.to_string(),
            send_time,
            update_time: 0,
        }
    }

    #[test]
    fn test_info_span_extracted() {
        let block = format_message(&message("[info]http://x/1[/info]Hello", 1_700_000_000));
        let lines: Vec<&str> = block.lines().collect();
        let stamp = local_time(1_700_000_000).format("%Y-%m-%d %H:%M:%S").to_string();

        assert_eq!(lines[0], RULE);
        assert_eq!(lines[1], format!("本文（日時：{}）", stamp));
        assert_eq!(lines[2], "Hello");
        assert_eq!(lines[3], "投稿元：http://x/1");
        assert_eq!(lines[4], RULE);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_plain_body_trimmed() {
        let block = format_message(&message("\n  line one\nline two  \n", 0));
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[2], "line one");
        assert_eq!(lines[3], "line two");
        assert_eq!(lines[4], RULE);
        assert!(!block.contains("投稿元"));
    }

    #[test]
    fn test_only_first_info_span() {
        let (body, source) = split_source("a[info] one [/info]b[info]two[/info]c");
        assert_eq!(source.as_deref(), Some("one"));
        assert_eq!(body, "ab[info]two[/info]c");
    }

    #[test]
    fn test_unterminated_info_left_alone() {
        let (body, source) = split_source("[/info]oops[info]x");
        assert_eq!(body, "[/info]oops[info]x");
        assert!(source.is_none());
    }

    #[test]
    fn test_transcript_separator_and_determinism() {
        let messages = vec![message("first", 100), message("second", 200)];
        let text = format_transcript(&messages);
        assert_eq!(text.matches(RULE).count(), 4);
        assert!(text.contains(&format!("{RULE}\n\n{RULE}")));
        assert!(!text.ends_with('\n'));
        assert_eq!(text, format_transcript(&messages));
    }

    #[test]
    fn test_empty_transcript() {
        assert_eq!(format_transcript(&[]), "");
    }
}
