use std::fmt;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::translation::error::{TranslationError, TranslationResult};

/// 译文文件名后缀
pub const TRANSLATED_SUFFIX: &str = "_translated";

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Supported input formats
///
/// Format selection is by file extension only; nothing about the content is
/// sniffed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `.txt`
    Text,
    /// `.md`, translated line by line exactly like plain text
    Markdown,
    /// `.html` / `.htm`
    Html,
}

/// How a document is segmented for translation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Fixed-size line batches
    Plain,
    /// DOM text leaves
    Structured,
}

impl DocumentFormat {
    /// Picks the format from a file extension (case-insensitive)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentFormat::Text),
            "md" => Some(DocumentFormat::Markdown),
            "html" | "htm" => Some(DocumentFormat::Html),
            _ => None,
        }
    }

    /// Picks the format from a file name or path
    pub fn from_file_name(file_name: &str) -> TranslationResult<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                TranslationError::UnsupportedFormat(format!("{} (缺少扩展名)", file_name))
            })?;

        Self::from_extension(extension)
            .ok_or_else(|| TranslationError::UnsupportedFormat(file_name.to_string()))
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentFormat::Text | DocumentFormat::Markdown => DocumentKind::Plain,
            DocumentFormat::Html => DocumentKind::Structured,
        }
    }

    /// Media type used when the translated artifact is offered for download
    pub fn media_type(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "text/plain; charset=utf-8",
            DocumentFormat::Markdown => "text/markdown; charset=utf-8",
            DocumentFormat::Html => "text/html; charset=utf-8",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DocumentFormat::Text => "text",
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Html => "html",
        };
        write!(f, "{}", name)
    }
}

/// A decoded source document; immutable once read
#[derive(Clone, Debug)]
pub struct Document {
    file_name: String,
    format: DocumentFormat,
    content: String,
}

impl Document {
    /// Creates a document from already decoded text
    ///
    /// Fails with [`TranslationError::UnsupportedFormat`] before anything
    /// else happens when the extension is not one of txt/md/html/htm.
    pub fn new(file_name: &str, content: String) -> TranslationResult<Self> {
        let format = DocumentFormat::from_file_name(file_name)?;

        Ok(Document {
            file_name: base_file_name(file_name).to_string(),
            format,
            content,
        })
    }

    /// Creates a document from raw file bytes
    ///
    /// The extension is checked first, then the bytes are decoded using the
    /// given charset label, or a byte order mark, or UTF-8.
    pub fn from_bytes(
        file_name: &str,
        data: &[u8],
        encoding_label: Option<&str>,
    ) -> TranslationResult<Self> {
        DocumentFormat::from_file_name(file_name)?;
        let content = decode_document(data, encoding_label)?;
        Self::new(file_name, content)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn kind(&self) -> DocumentKind {
        self.format.kind()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// File name of the translated artifact
    pub fn translated_file_name(&self) -> String {
        translated_file_name(&self.file_name)
    }
}

/// Decodes document bytes
///
/// An explicit label wins over any BOM; only a BOM of that same encoding
/// is dropped. Without a label a BOM is honoured and UTF-8 is assumed.
/// Malformed sequences are replaced rather than rejected.
pub fn decode_document(data: &[u8], encoding_label: Option<&str>) -> TranslationResult<String> {
    let (content, used_encoding, had_errors) = match encoding_label {
        Some(label) => {
            let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                TranslationError::InvalidInput(format!("未知的字符编码: {}", label))
            })?;
            let (content, had_errors) = encoding.decode_with_bom_removal(data);
            (content, encoding, had_errors)
        }
        None => UTF_8.decode(data),
    };

    if had_errors {
        tracing::warn!("文档包含无法以 {} 解码的字节，已替换", used_encoding.name());
    }

    Ok(content.into_owned())
}

/// Builds `<base>_translated.<ext>` from a file name or path
///
/// Only the last extension is split off, so `notes.v2.md` becomes
/// `notes.v2_translated.md`. The extension keeps its original case.
pub fn translated_file_name(file_name: &str) -> String {
    let name = base_file_name(file_name);

    match name.rsplit_once('.') {
        Some((base, extension)) => format!("{}{}.{}", base, TRANSLATED_SUFFIX, extension),
        None => format!("{}{}", name, TRANSLATED_SUFFIX),
    }
}

/// Strips any directory part from a path
fn base_file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}
