// crates/robotinterface-xml/src/reader.rs

//! Entry points: load a document, resolve its inclusions, parse the robot.

use crate::config::ReaderOptions;
use crate::diagnostics::{Diagnostics, ReaderResult, Severity};
use crate::dom::Document;
use crate::inclusion::InclusionResolver;
use crate::parser::read_robot;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Name reported in diagnostics for documents read from memory.
const RUNTIME_STRING_NAME: &str = " XML runtime string ";

/// Suffix of the file written in verbose mode with the resolved document.
const PREPROCESSOR_LOG_SUFFIX: &str = "_preprocessor_log.xml";

/// Reads robot interface descriptions with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct RobotReader {
    options: ReaderOptions,
}

impl RobotReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Reads the description stored at `path`, resolving `<xi:include>`
    /// elements relative to its directory.
    pub fn read_file(&self, path: impl AsRef<Path>) -> ReaderResult {
        let path = path.as_ref();
        debug!("Reading file {}", path.display());

        let mut diagnostics = Diagnostics::new();
        let mut document = match Document::load_file(path) {
            Ok(document) => document,
            Err(e) => {
                diagnostics.report(
                    Severity::Error,
                    &path.display().to_string(),
                    e.line(),
                    e.to_string(),
                );
                return ReaderResult::failed_with(diagnostics);
            }
        };

        let start = Instant::now();
        let resolution =
            InclusionResolver::new(&self.options, &mut diagnostics).resolve_document(&mut document, path);
        debug!("Preprocessor complete in: {:?}", start.elapsed());

        if let Err(e) = resolution {
            if self.options.abort_on_include_failure {
                return ReaderResult::failed_with(diagnostics);
            }
            warn!("Ignoring inclusion failure in {}: {}", path.display(), e);
        }

        if self.options.verbose {
            self.write_preprocessor_log(&document, path);
        }

        read_robot(document.root(), diagnostics)
    }

    /// Reads a description held in memory. Inclusions are not resolved
    /// because there is no directory to resolve them against.
    pub fn read_str(&self, xml: &str) -> ReaderResult {
        let mut diagnostics = Diagnostics::new();
        let document = match Document::parse_str(xml, RUNTIME_STRING_NAME) {
            Ok(document) => document,
            Err(e) => {
                diagnostics.report(Severity::Error, RUNTIME_STRING_NAME, e.line(), e.to_string());
                return ReaderResult::failed_with(diagnostics);
            }
        };

        read_robot(document.root(), diagnostics)
    }

    /// Writes the resolved document next to `path`. Failures only warn: the
    /// log has no effect on the parsed model.
    fn write_preprocessor_log(&self, document: &Document, path: &Path) {
        let log_path = preprocessor_log_path(path);
        let written = document
            .to_xml_string()
            .and_then(|xml| fs::write(&log_path, xml).map_err(Into::into));
        match written {
            Ok(()) => debug!("Preprocessor output stored in: {}", log_path.display()),
            Err(e) => warn!(
                "Cannot store preprocessor output in {}: {}",
                log_path.display(),
                e
            ),
        }
    }
}

/// `dir/robot.xml` -> `dir/robot_preprocessor_log.xml`
pub(crate) fn preprocessor_log_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}", stem, PREPROCESSOR_LOG_SUFFIX))
}

/// Reads the description at `path` with default options.
pub fn load_robot_from_file(path: impl AsRef<Path>) -> ReaderResult {
    RobotReader::default().read_file(path)
}

/// Reads a description from an XML string with default options.
pub fn load_robot_from_str(xml: &str) -> ReaderResult {
    RobotReader::default().read_str(xml)
}
