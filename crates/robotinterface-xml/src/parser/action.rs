// crates/robotinterface-xml/src/parser/action.rs

use super::{Parser, unsigned_attribute};
use crate::dom::Element;
use crate::types::{Action, ActionPhase, ActionType};

impl Parser<'_> {
    /// Reads an `<action>` or an `<actions>` block into a flat list.
    pub(crate) fn read_actions(&mut self, element: &Element) -> Vec<Action> {
        match element.name.as_str() {
            "action" => vec![self.read_action_tag(element)],
            "actions" => self.read_actions_tag(element),
            other => {
                self.diagnostics.error(
                    element,
                    format!(r#"Expected "action" or "actions". Found "{}""#, other),
                );
                Vec::new()
            }
        }
    }

    /// `<action phase="..." type="..." level="N">` with parameter children.
    ///
    /// The first missing or invalid attribute makes the whole action fall
    /// back to its default, and the remaining checks are skipped.
    fn read_action_tag(&mut self, element: &Element) -> Action {
        let phase = element
            .attribute("phase")
            .and_then(|s| s.parse::<ActionPhase>().ok());
        let Some(phase) = phase else {
            self.diagnostics.error(
                element,
                r#""action" element should contain the "phase" attribute [startup|interrupt{1,2,3}|shutdown]"#,
            );
            return Action::default();
        };

        let action_type = element
            .attribute("type")
            .and_then(|s| s.parse::<ActionType>().ok());
        let Some(action_type) = action_type else {
            self.diagnostics.error(
                element,
                r#""action" element should contain the "type" attribute [configure|calibrate|attach|abort|detach|park|custom]"#,
            );
            return Action::default();
        };

        let Some(level) = unsigned_attribute(element, "level") else {
            self.diagnostics.error(
                element,
                r#""action" element should contain the "level" attribute [unsigned int]"#,
            );
            return Action::default();
        };

        let mut params = Vec::new();
        for child in element.child_elements() {
            params.extend(self.read_params(child));
        }

        Action {
            phase,
            action_type,
            level,
            params,
        }
    }

    /// `<actions robot="..." build="N">` groups actions, typically from an
    /// included file. The attributes are checked against the enclosing robot
    /// but a mismatch is only a warning.
    fn read_actions_tag(&mut self, element: &Element) -> Vec<Action> {
        match element.attribute("robot") {
            None => self
                .diagnostics
                .warning(element, r#""actions" element should contain the "robot" attribute"#),
            Some(robot) if robot != self.robot.name => self.diagnostics.warning(
                element,
                format!(
                    "Trying to import a file for the wrong robot. Found {} instead of {}",
                    robot, self.robot.name
                ),
            ),
            Some(_) => {}
        }

        let build = match unsigned_attribute(element, "build") {
            Some(build) => build,
            None => {
                self.diagnostics.warning(
                    element,
                    r#""actions" element should contain the "build" attribute [unsigned int]. Assuming 0"#,
                );
                0
            }
        };
        if build != self.robot.build {
            self.diagnostics.warning(
                element,
                format!(
                    "Import a file for a different robot build. Found {} instead of {}",
                    build, self.robot.build
                ),
            );
        }

        let mut actions = Vec::new();
        for child in element.child_elements() {
            actions.extend(self.read_actions(child));
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::{Diagnostics, Severity};
    use crate::parser::Parser;
    use crate::parser::test_support::{context, element};
    use crate::types::{Action, ActionPhase, ActionType, Param};

    fn read(xml: &str) -> (Vec<Action>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let actions = Parser::new(&mut diags, context()).read_actions(&element(xml));
        (actions, diags)
    }

    #[test]
    fn test_simple_action() {
        let (actions, diags) = read(r#"<action phase="startup" type="configure" level="0"/>"#);
        assert!(diags.is_success());
        assert_eq!(
            actions,
            [Action {
                phase: ActionPhase::Startup,
                action_type: ActionType::Configure,
                level: 0,
                params: vec![],
            }]
        );
    }

    #[test]
    fn test_action_params() {
        let (actions, diags) = read(
            r#"<action phase="shutdown" type="park" level="3"><param name="target">arm</param></action>"#,
        );
        assert!(diags.is_success());
        assert_eq!(actions[0].params, [Param::new("target", "arm")]);
        assert_eq!(actions[0].level, 3);
    }

    #[test]
    fn test_unknown_phase_fails() {
        let (actions, diags) = read(
            r#"<action phase="bogus" type="configure" level="0"><param name="a">1</param></action>"#,
        );
        assert!(!diags.is_success());
        assert_eq!(actions, [Action::default()]);
        // Remaining checks are short-circuited: only one error.
        assert_eq!(diags.into_entries().len(), 1);
    }

    #[test]
    fn test_missing_type_and_bad_level_fail() {
        let (actions, diags) = read(r#"<action phase="startup" level="1"/>"#);
        assert!(!diags.is_success());
        assert_eq!(actions[0].action_type, ActionType::Unknown);

        let (actions, diags) = read(r#"<action phase="startup" type="attach" level="-2"/>"#);
        assert!(!diags.is_success());
        assert_eq!(actions, [Action::default()]);

        let (_, diags) = read(r#"<action phase="startup" type="attach"/>"#);
        assert!(!diags.is_success());
    }

    #[test]
    fn test_actions_block_matching_robot() {
        let (actions, diags) = read(
            r#"<actions robot="R" build="1">
                 <action phase="startup" type="attach" level="5"/>
                 <actions robot="R" build="1">
                   <action phase="interrupt1" type="abort" level="1"/>
                 </actions>
               </actions>"#,
        );
        assert!(diags.is_success());
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].phase, ActionPhase::Interrupt1);
        assert!(diags.into_entries().is_empty());
    }

    #[test]
    fn test_actions_mismatch_only_warns() {
        let (actions, diags) = read(
            r#"<actions robot="other" build="7"><action phase="startup" type="detach" level="2"/></actions>"#,
        );
        assert!(diags.is_success());
        assert_eq!(actions.len(), 1);
        let entries = diags.into_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn test_actions_without_attributes_warns() {
        let (actions, diags) = read(r#"<actions/>"#);
        assert!(diags.is_success());
        assert!(actions.is_empty());
        // missing robot, missing build (defaulted to 0), build mismatch
        assert_eq!(diags.into_entries().len(), 3);
    }
}
