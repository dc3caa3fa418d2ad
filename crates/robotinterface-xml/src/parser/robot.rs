// crates/robotinterface-xml/src/parser/robot.rs

use super::{Parser, RobotContext, unsigned_attribute};
use crate::diagnostics::{Diagnostics, ReaderResult};
use crate::dom::Element;
use crate::types::Robot;

/// Parses the `<robot>` root element into a `ReaderResult`.
///
/// A wrong root tag or a missing `name` fails the whole parse immediately;
/// every other problem is collected and parsing continues.
pub(crate) fn read_robot(root: &Element, mut diagnostics: Diagnostics) -> ReaderResult {
    if root.name != "robot" {
        diagnostics.error(
            root,
            format!(r#"Root element should be "robot". Found "{}""#, root.name),
        );
        return ReaderResult::failed_with(diagnostics);
    }

    let Some(name) = root.attribute("name") else {
        diagnostics.error(root, r#""robot" element should contain the "name" attribute"#);
        return ReaderResult::failed_with(diagnostics);
    };

    let build = match unsigned_attribute(root, "build") {
        Some(build) => build,
        None => {
            diagnostics.warning(
                root,
                r#""robot" element should contain the "build" attribute [unsigned int]. Assuming 0"#,
            );
            0
        }
    };

    let portprefix = match root.attribute("portprefix") {
        Some(prefix) => prefix.to_string(),
        None => {
            diagnostics.warning(
                root,
                r#""robot" element should contain the "portprefix" attribute. Using "name" attribute"#,
            );
            name.to_string()
        }
    };

    let mut robot = Robot {
        name: name.to_string(),
        build,
        portprefix: portprefix.clone(),
        ..Default::default()
    };

    let context = RobotContext {
        name: robot.name.clone(),
        build,
        portprefix,
    };
    let mut parser = Parser::new(&mut diagnostics, context);

    for child in root.child_elements() {
        match child.name.as_str() {
            "device" | "devices" => robot.devices.extend(parser.read_devices(child)),
            _ => robot.params.extend(parser.read_params(child)),
        }
    }

    log::debug!(
        "Parsed robot {} (build {}): {} devices, {} params",
        robot.name,
        robot.build,
        robot.devices.len(),
        robot.params.len()
    );

    ReaderResult {
        robot,
        success: diagnostics.is_success(),
        diagnostics: diagnostics.into_entries(),
    }
}
