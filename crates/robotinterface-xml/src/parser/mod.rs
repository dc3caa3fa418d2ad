// crates/robotinterface-xml/src/parser/mod.rs

//! Semantic parsing of a resolved robot interface tree.
//!
//! The grammar is walked by recursive descent. Each production returns the
//! entities it could build and reports problems to the shared `Diagnostics`;
//! a malformed element never stops its siblings from being parsed.
//!
//! This includes:
//! 1. `<robot>` attributes and top-level children (`robot.rs`).
//! 2. `<device>` / `<devices>` (`device.rs`).
//! 3. `<action>` / `<actions>` (`action.rs`).
//! 4. The five parameter forms (`param.rs`).

mod action;
mod device;
mod param;
mod robot;

use crate::diagnostics::Diagnostics;
use crate::dom::Element;

pub(crate) use robot::read_robot;

/// Attributes of the enclosing `<robot>` that nested productions need.
#[derive(Debug, Clone, Default)]
pub(crate) struct RobotContext {
    pub name: String,
    pub build: u32,
    pub portprefix: String,
}

/// Recursive-descent parser state, shared by every production.
pub(crate) struct Parser<'a> {
    diagnostics: &'a mut Diagnostics,
    robot: RobotContext,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(diagnostics: &'a mut Diagnostics, robot: RobotContext) -> Self {
        Self { diagnostics, robot }
    }
}

/// Parses a non-negative integer attribute the way the format expects.
///
/// Returns `None` when the attribute is absent, not an integer, negative or
/// out of range; callers decide whether that is an error or a default.
pub(crate) fn unsigned_attribute(element: &Element, name: &str) -> Option<u32> {
    let raw = element.attribute(name)?;
    let value: i64 = raw.trim().parse().ok()?;
    u32::try_from(value).ok()
}
