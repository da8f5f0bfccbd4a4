use std::fs;
use std::io::Read;

use crate::cli::commands::BodySource;
use crate::io::editor::{self, trim_final_newline};

/// Resolve the body text for create/edit.
///
/// `--text` is taken as given; `--file` reads a file (`-` reads `stdin`)
/// and drops its final newline. With neither, the user's editor opens on
/// `initial`.
pub fn read_body(
    source: &BodySource,
    initial: &str,
    stdin: &mut impl Read,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(ref text) = source.text {
        return Ok(text.clone());
    }
    match source.file.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            Ok(trim_final_newline(buf))
        }
        Some(path) => {
            let contents =
                fs::read_to_string(path).map_err(|e| format!("could not read {}: {}", path, e))?;
            Ok(trim_final_newline(contents))
        }
        None => Ok(editor::edit_text(initial)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;

    #[test]
    fn text_flag_is_used_verbatim() {
        let source = BodySource {
            text: Some("hola\nmundo\n".into()),
            file: None,
        };
        assert_eq!(read_body(&source, "", &mut io::empty()).unwrap(), "hola\nmundo\n");
    }

    #[test]
    fn file_loses_final_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("body.txt");
        fs::write(&path, "uno\ndos\n").unwrap();
        let source = BodySource {
            text: None,
            file: Some(path.display().to_string()),
        };
        assert_eq!(read_body(&source, "", &mut io::empty()).unwrap(), "uno\ndos");
    }

    #[test]
    fn dash_reads_the_given_stdin() {
        let source = BodySource {
            text: None,
            file: Some("-".into()),
        };
        let mut stdin = "Paso uno\nPaso dos\n".as_bytes();
        assert_eq!(read_body(&source, "", &mut stdin).unwrap(), "Paso uno\nPaso dos");
    }

    #[test]
    fn missing_file_names_the_path() {
        let source = BodySource {
            text: None,
            file: Some("/nonexistent/textdesk-body.txt".into()),
        };
        let err = read_body(&source, "", &mut io::empty()).unwrap_err();
        assert!(err.to_string().contains("textdesk-body.txt"));
    }
}
