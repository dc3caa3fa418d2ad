// crates/robotinterface-xml/src/error.rs

use std::fmt;
use std::io;
use std::path::PathBuf;

use quick_xml::Error as XmlError;

/// Errors that stop a document from being loaded or its inclusions resolved.
///
/// Problems inside a well-formed document (missing attributes, unknown tags)
/// are not errors: they are reported as diagnostics on the `ReaderResult`.
#[derive(Debug)]
pub enum ReaderError {
    /// An error from the underlying `quick-xml` reader (malformed XML).
    /// `line` is the 1-based line where the reader stopped, when known.
    XmlParsing { line: Option<u32>, source: XmlError },

    /// The document ended while `name`, opened at `line`, was still open.
    MissingEndTag { name: String, line: u32 },

    /// An error while writing a document back out (e.g., I/O on the buffer).
    XmlWriting(io::Error),

    /// A file could not be read from disk.
    Io { path: PathBuf, source: io::Error },

    /// The document contains no root element.
    MissingRootElement,

    /// The legacy `<file>` inclusion tag was found.
    LegacyFileTag { file: String, line: u32 },

    /// An `<xi:include>` element has no `href` attribute.
    MissingHref { file: String, line: u32 },

    /// The file referenced by an `<xi:include>` could not be loaded.
    IncludeLoadFailed {
        href: String,
        included_by: String,
        line: u32,
        reason: Box<ReaderError>,
    },

    /// A file includes itself, directly or through other files.
    IncludeCycle { path: PathBuf },

    /// Inclusions are nested deeper than the configured limit.
    IncludeDepthExceeded { limit: usize },

    /// More fragments were spliced than the configured limit allows.
    TooManyInclusions { limit: usize },
}

impl ReaderError {
    /// Line the error points at in the file being read, if it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            ReaderError::XmlParsing { line, .. } => *line,
            ReaderError::MissingEndTag { line, .. }
            | ReaderError::LegacyFileTag { line, .. }
            | ReaderError::MissingHref { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<XmlError> for ReaderError {
    fn from(e: XmlError) -> Self {
        ReaderError::XmlParsing { line: None, source: e }
    }
}

impl From<io::Error> for ReaderError {
    fn from(e: io::Error) -> Self {
        ReaderError::XmlWriting(e)
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::XmlParsing {
                line: Some(line),
                source,
            } => write!(f, "XML parsing error at line {}: {}", line, source),
            ReaderError::XmlParsing { line: None, source } => {
                write!(f, "XML parsing error: {}", source)
            }
            ReaderError::MissingEndTag { name, line } => {
                write!(f, "Missing end tag for <{}> opened at line {}", name, line)
            }
            ReaderError::XmlWriting(e) => write!(f, "XML writing error: {}", e),
            ReaderError::Io { path, source } => {
                write!(f, "Cannot read {}: {}", path.display(), source)
            }
            ReaderError::MissingRootElement => write!(f, "No root element"),
            ReaderError::LegacyFileTag { file, line } => write!(
                f,
                "'file' tag is forbidden in robot interface format 3.0 (found in {} at line {})",
                file, line
            ),
            ReaderError::MissingHref { file, line } => write!(
                f,
                "Syntax error in {} at line {} while searching for the href attribute",
                file, line
            ),
            ReaderError::IncludeLoadFailed {
                href,
                included_by,
                line,
                reason,
            } => write!(
                f,
                "Cannot include {} (included by {} at line {}): {}",
                href, included_by, line, reason
            ),
            ReaderError::IncludeCycle { path } => {
                write!(f, "Inclusion cycle detected at {}", path.display())
            }
            ReaderError::IncludeDepthExceeded { limit } => {
                write!(f, "Inclusions nested deeper than {} levels", limit)
            }
            ReaderError::TooManyInclusions { limit } => {
                write!(f, "More than {} inclusions spliced into one document", limit)
            }
        }
    }
}

impl std::error::Error for ReaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReaderError::XmlParsing { source, .. } => Some(source),
            ReaderError::XmlWriting(e) => Some(e),
            ReaderError::Io { source, .. } => Some(source),
            ReaderError::IncludeLoadFailed { reason, .. } => Some(reason.as_ref()),
            _ => None,
        }
    }
}
