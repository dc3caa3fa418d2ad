// crates/robotinterface-xml/src/config.rs

//! Reader configuration.

/// Default limit on how deeply `<xi:include>` elements may nest.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Default limit on the number of fragments spliced into one document.
pub const DEFAULT_MAX_SPLICES: usize = 4096;

/// Options controlling how a robot description is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Write the document produced by the inclusion pass next to the input
    /// file, as `<stem>_preprocessor_log.xml`.
    pub verbose: bool,
    /// Stop before semantic parsing when the inclusion pass fails.
    /// When `false`, the failure is logged and the partially resolved
    /// document is parsed anyway.
    pub abort_on_include_failure: bool,
    pub max_include_depth: usize,
    pub max_splices: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            abort_on_include_failure: true,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            max_splices: DEFAULT_MAX_SPLICES,
        }
    }
}

impl ReaderOptions {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn abort_on_include_failure(mut self, abort: bool) -> Self {
        self.abort_on_include_failure = abort;
        self
    }

    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    pub fn max_splices(mut self, splices: usize) -> Self {
        self.max_splices = splices;
        self
    }
}
