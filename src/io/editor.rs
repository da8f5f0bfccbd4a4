use std::fs;
use std::io::Write;
use std::process::Command;

use log::debug;

/// Error type for the external editor round trip
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("could not prepare edit file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not launch editor '{editor}': {source}")]
    Launch {
        editor: String,
        source: std::io::Error,
    },
    #[error("editor '{editor}' exited with {status}")]
    Failed { editor: String, status: String },
    #[error("no editor configured (set $VISUAL or $EDITOR)")]
    NoEditor,
}

/// Editor command from $VISUAL, then $EDITOR, then `vi`
pub fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Open `initial` in the user's editor and return the saved text
pub fn edit_text(initial: &str) -> Result<String, EditorError> {
    edit_text_with(&editor_command(), initial)
}

/// Open `initial` in `editor` (a command line, split on whitespace) and
/// return the saved text without the trailing newline editors append.
pub fn edit_text_with(editor: &str, initial: &str) -> Result<String, EditorError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(EditorError::NoEditor)?;

    let mut file = tempfile::Builder::new()
        .prefix("textdesk-")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    debug!("event=editor_launch editor={}", program);
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .map_err(|e| EditorError::Launch {
            editor: editor.to_string(),
            source: e,
        })?;
    if !status.success() {
        return Err(EditorError::Failed {
            editor: editor.to_string(),
            status: status.to_string(),
        });
    }

    let edited = fs::read_to_string(file.path())?;
    Ok(trim_final_newline(edited))
}

/// Drop one trailing newline (`\n` or `\r\n`), as left by editors and files
pub fn trim_final_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_trailing_newline() {
        assert_eq!(trim_final_newline("a\n".into()), "a");
        assert_eq!(trim_final_newline("a\r\n".into()), "a");
        assert_eq!(trim_final_newline("a\n\n".into()), "a\n");
        assert_eq!(trim_final_newline("a".into()), "a");
    }

    #[test]
    fn blank_editor_command_is_rejected() {
        assert!(matches!(edit_text_with("  ", "x"), Err(EditorError::NoEditor)));
    }

    #[cfg(unix)]
    #[test]
    fn unchanged_file_returns_initial_text() {
        let edited = edit_text_with("true", "line one\nline two").unwrap();
        assert_eq!(edited, "line one\nline two");
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_is_reported() {
        let err = edit_text_with("false", "x").unwrap_err();
        assert!(matches!(err, EditorError::Failed { .. }));
    }

    #[test]
    fn missing_editor_binary_is_reported() {
        let err = edit_text_with("textdesk-no-such-editor-binary", "x").unwrap_err();
        assert!(matches!(err, EditorError::Launch { .. }));
    }
}
