// File Loader
// Extracts plain text from uploaded documents (.txt/.md, .docx, .pdf)

use docx_rs::{DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported file type '{0}' (expected .txt, .md, .docx or .pdf)")]
    Unsupported(String),
    #[error("File is not valid UTF-8 text")]
    Encoding,
    #[error("Failed to read .docx: {0}")]
    Docx(String),
    #[error("Failed to read .pdf: {0}")]
    Pdf(String),
}

/// Read a file from disk and extract its text
pub fn load_text_file(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    extract_text(&file_name, &bytes)
}

/// Extract text based on the file extension
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, LoadError> {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let text = match ext.as_str() {
        "" | "txt" | "md" | "text" => {
            String::from_utf8(bytes.to_vec()).map_err(|_| LoadError::Encoding)?
        }
        "docx" => extract_docx(bytes)?,
        "pdf" => pdf_extract::extract_text_from_mem(bytes).map_err(|e| LoadError::Pdf(e.to_string()))?,
        other => return Err(LoadError::Unsupported(other.to_string())),
    };

    info!(
        "[LOADER] {} -> {} chars ({} bytes in)",
        file_name,
        text.chars().count(),
        bytes.len()
    );
    Ok(text)
}

fn extract_docx(bytes: &[u8]) -> Result<String, LoadError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| LoadError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    Ok(paragraphs.join("\n\n"))
}

/// Visible text of a paragraph; tracked deletions are skipped
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut out = String::new();
    collect_paragraph_children(&paragraph.children, &mut out);
    out
}

fn collect_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => collect_run(run, out),
            ParagraphChild::Insert(insert) => {
                for ins in &insert.children {
                    if let InsertChild::Run(run) = ins {
                        collect_run(run, out);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn collect_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Delete, Docx, Insert};
    use std::io::Cursor;

    fn pack(docx: docx_rs::Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_plain_text() {
        let text = extract_text("notes.txt", "Hello world.".as_bytes()).unwrap();
        assert_eq!(text, "Hello world.");
    }

    #[test]
    fn test_invalid_utf8() {
        let err = extract_text("notes.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, LoadError::Encoding));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = extract_text("image.png", b"").unwrap_err();
        assert!(matches!(err, LoadError::Unsupported(ext) if ext == "png"));
    }

    #[test]
    fn test_docx_paragraphs() {
        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("First & foremost.")))
            .add_paragraph(Paragraph::new())
            .add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text("Second")
                        .add_break(docx_rs::BreakType::TextWrapping)
                        .add_text("line.")
                        .add_tab()
                        .add_text("end"),
                ),
            );
        let text = extract_text("report.DOCX", &pack(docx)).unwrap();
        assert_eq!(text, "First & foremost.\n\nSecond\nline.\tend");
    }

    #[test]
    fn test_docx_skips_tracked_deletions() {
        let docx = Docx::new()
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("It\u{2019}s final."))
                    .add_delete(
                        Delete::new().add_run(Run::new().add_delete_text("REMOVED DRAFT WORDS")),
                    ),
            )
            .add_paragraph(Paragraph::new().add_insert(Insert::new(Run::new().add_text("Added."))));
        let text = extract_text("a.docx", &pack(docx)).unwrap();
        assert_eq!(text, "It\u{2019}s final.\n\nAdded.");
    }

    #[test]
    fn test_broken_docx() {
        let err = extract_text("report.docx", b"not a zip").unwrap_err();
        assert!(matches!(err, LoadError::Docx(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_text_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
