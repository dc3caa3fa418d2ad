// crates/robotinterface-xml/src/lib.rs

#![doc = "Reads robot interface XML descriptions into a plain data model."]
#![doc = ""]
#![doc = "A description is an XML document rooted at `<robot>` that lists devices,"]
#![doc = "their parameters and the lifecycle actions to run on them. The reader:"]
#![doc = "- `load_robot_from_file`: loads a file, splices `<xi:include href=\"...\"/>`"]
#![doc = "  fragments into it, then parses the resolved tree."]
#![doc = "- `load_robot_from_str`: parses an in-memory document (no inclusion pass)."]
#![doc = ""]
#![doc = "Parsing is best-effort: malformed constructs are reported as diagnostics"]
#![doc = "and lower the success flag of the returned `ReaderResult`, but the reader"]
#![doc = "keeps going so that every problem in a file is reported at once."]

// --- Crate Modules ---

mod config;
mod diagnostics;
mod dom;
mod error;
mod inclusion;
mod parser;
mod reader;
mod types;

// --- Public API Re-exports ---

pub use config::ReaderOptions;
pub use diagnostics::{Diagnostic, ReaderResult, Severity};
pub use dom::{Document, Element, Node};
pub use error::ReaderError;
pub use reader::{RobotReader, load_robot_from_file, load_robot_from_str};
pub use types::{Action, ActionPhase, ActionType, Device, Param, Robot, UnknownToken};
