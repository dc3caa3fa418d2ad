// crates/robotinterface-xml/src/inclusion.rs

//! Splices `<xi:include href="..."/>` fragments into a document before it is
//! parsed.
//!
//! Only the `href` form is supported. Paths are relative to the directory of
//! the including file, and inclusions inside a fragment are resolved before
//! the fragment is spliced, so multi-level includes compose innermost first.
//! The legacy `<file>` inclusion tag is rejected.

use crate::config::ReaderOptions;
use crate::diagnostics::{Diagnostics, Severity};
use crate::dom::{Document, Element, Node};
use crate::error::ReaderError;
use std::path::{Path, PathBuf};

const INCLUDE_TAG: &str = "xi:include";
const LEGACY_FILE_TAG: &str = "file";
const XINCLUDE_NAMESPACE_ATTR: &str = "xmlns:xi";

/// What to do with one child while scanning a sibling list.
enum Step {
    Legacy { line: u32 },
    Include { href: Option<String>, line: u32 },
    Descend,
}

pub(crate) struct InclusionResolver<'a> {
    options: &'a ReaderOptions,
    diagnostics: &'a mut Diagnostics,
    /// Files currently being resolved, outermost first.
    active: Vec<PathBuf>,
    splices: usize,
}

impl<'a> InclusionResolver<'a> {
    pub(crate) fn new(options: &'a ReaderOptions, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            options,
            diagnostics,
            active: Vec::new(),
            splices: 0,
        }
    }

    /// Resolves every inclusion in `document`, which was loaded from `path`.
    ///
    /// Each problem is recorded as a fatal diagnostic; the first one is also
    /// returned and leaves the document partially resolved.
    pub(crate) fn resolve_document(
        &mut self,
        document: &mut Document,
        path: &Path,
    ) -> Result<(), ReaderError> {
        let dir = parent_dir(path);
        let file_name = display_name(path);

        self.active.push(identity(path));
        let result = self.resolve_children(document.root_mut(), &file_name, &dir);
        self.active.pop();

        log::debug!(
            "Resolved {} inclusion(s) in {}",
            self.splices,
            path.display()
        );
        result
    }

    /// Walks the children of `parent` depth-first.
    ///
    /// Splicing a fragment replaces a node of the sibling list being walked,
    /// so after every splice the scan starts over from the first child.
    fn resolve_children(
        &mut self,
        parent: &mut Element,
        file_name: &str,
        dir: &Path,
    ) -> Result<(), ReaderError> {
        'scan: loop {
            for index in 0..parent.children.len() {
                let step = match &parent.children[index] {
                    Node::Text(_) => continue,
                    Node::Element(child) if child.name == LEGACY_FILE_TAG => {
                        Step::Legacy { line: child.line }
                    }
                    Node::Element(child) if child.name == INCLUDE_TAG => Step::Include {
                        href: child.attribute("href").map(str::to_owned),
                        line: child.line,
                    },
                    Node::Element(_) => Step::Descend,
                };

                match step {
                    Step::Legacy { line } => {
                        self.fatal(
                            file_name,
                            line,
                            "'file' tag is forbidden in robot interface format 3.0",
                        );
                        return Err(ReaderError::LegacyFileTag {
                            file: file_name.to_string(),
                            line,
                        });
                    }
                    Step::Include { href: None, line } => {
                        self.fatal(file_name, line, "Missing href attribute in xi:include");
                        return Err(ReaderError::MissingHref {
                            file: file_name.to_string(),
                            line,
                        });
                    }
                    Step::Include {
                        href: Some(href),
                        line,
                    } => {
                        let fragment = self.load_fragment(&href, file_name, dir, line)?;
                        parent.replace_child(index, fragment);

                        self.splices += 1;
                        if self.splices > self.options.max_splices {
                            let limit = self.options.max_splices;
                            self.fatal(
                                file_name,
                                line,
                                format!("More than {} inclusions spliced", limit),
                            );
                            return Err(ReaderError::TooManyInclusions { limit });
                        }
                        continue 'scan;
                    }
                    Step::Descend => {
                        if let Node::Element(child) = &mut parent.children[index] {
                            self.resolve_children(child, file_name, dir)?;
                        }
                    }
                }
            }
            return Ok(());
        }
    }

    /// Loads the file named by `href`, resolves its own inclusions and
    /// returns its root element ready to be spliced.
    fn load_fragment(
        &mut self,
        href: &str,
        included_by: &str,
        dir: &Path,
        line: u32,
    ) -> Result<Element, ReaderError> {
        let full_path = dir.join(href);
        let id = identity(&full_path);

        if self.active.contains(&id) {
            self.fatal(
                included_by,
                line,
                format!("Inclusion cycle: {} is already being included", href),
            );
            return Err(ReaderError::IncludeCycle { path: full_path });
        }

        if self.active.len() > self.options.max_include_depth {
            let limit = self.options.max_include_depth;
            self.fatal(
                included_by,
                line,
                format!("Inclusions nested deeper than {} levels", limit),
            );
            return Err(ReaderError::IncludeDepthExceeded { limit });
        }

        let mut fragment = match Document::load_file(&full_path) {
            Ok(fragment) => fragment,
            Err(e) => {
                self.fatal(
                    included_by,
                    line,
                    format!(
                        "Cannot load file {} included by {} at line {}: {}",
                        full_path.display(),
                        included_by,
                        line,
                        e
                    ),
                );
                return Err(ReaderError::IncludeLoadFailed {
                    href: href.to_string(),
                    included_by: included_by.to_string(),
                    line,
                    reason: Box::new(e),
                });
            }
        };

        log::debug!("Including {} from {}", full_path.display(), included_by);

        let fragment_dir = parent_dir(&full_path);
        let fragment_name = display_name(&full_path);

        self.active.push(id);
        let result = self.resolve_children(fragment.root_mut(), &fragment_name, &fragment_dir);
        self.active.pop();
        result?;

        let mut root = fragment.into_root();
        root.remove_attribute(XINCLUDE_NAMESPACE_ATTR);
        Ok(root)
    }

    fn fatal(&mut self, file: &str, line: u32, message: impl Into<String>) {
        self.diagnostics
            .report(Severity::Fatal, file, Some(line), message);
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Canonical form of `path` used for cycle detection. Falls back to the
/// path as given when it cannot be canonicalized (e.g., it does not exist).
fn identity(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
