// crates/robotinterface-xml/src/types.rs

//! Public data structures for a parsed robot interface description.
//!
//! The model is a plain owned tree: a `Robot` owns its `Device`s, which own
//! their `Action`s and `Param`s. Values are kept as text; interpreting them
//! is left to whoever executes the description.

use std::fmt;
use std::str::FromStr;

// --- Robot ---

/// The root of a robot interface description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Robot {
    /// `@name` (Mandatory)
    pub name: String,
    /// `@build`, 0 when absent or invalid.
    pub build: u32,
    /// `@portprefix`, defaults to `name`.
    pub portprefix: String,
    pub devices: Vec<Device>,
    /// Parameters declared directly under `<robot>`.
    pub params: Vec<Param>,
}

impl Robot {
    /// Finds a device by name.
    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name == name)
    }

    pub fn has_device(&self, name: &str) -> bool {
        self.device(name).is_some()
    }

    pub fn find_param(&self, name: &str) -> Option<&Param> {
        find_param(&self.params, name)
    }
}

// --- Device ---

/// A named, typed unit of configuration with its parameters and actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub device_type: String,
    pub params: Vec<Param>,
    pub actions: Vec<Action>,
}

impl Device {
    pub fn find_param(&self, name: &str) -> Option<&Param> {
        find_param(&self.params, name)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.find_param(name).is_some()
    }

    /// Returns the actions bound to `phase`, ordered by level.
    /// Actions sharing a level keep their document order.
    pub fn actions_for_phase(&self, phase: ActionPhase) -> Vec<&Action> {
        let mut actions: Vec<&Action> = self.actions.iter().filter(|a| a.phase == phase).collect();
        actions.sort_by_key(|a| a.level);
        actions
    }
}

// --- Param ---

/// A single textual parameter.
///
/// A group parameter carries its children collapsed into one value of the
/// form `(name value) (name value) ...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub value: String,
    pub is_group: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_group: false,
        }
    }

    pub fn group(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_group: true,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.name, self.value)
    }
}

fn find_param<'a>(params: &'a [Param], name: &str) -> Option<&'a Param> {
    params.iter().find(|p| p.name == name)
}

// --- Action ---

/// A lifecycle operation bound to a phase and an ordering level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    pub phase: ActionPhase,
    pub action_type: ActionType,
    pub level: u32,
    pub params: Vec<Param>,
}

/// Error returned when a phase or type token is not in the closed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken(pub String);

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown token: {}", self.0)
    }
}

impl std::error::Error for UnknownToken {}

/// The lifecycle phase an action runs in.
///
/// `Unknown` is the unset value; it is never produced by `from_str`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    #[default]
    Unknown,
    Startup,
    Interrupt1,
    Interrupt2,
    Interrupt3,
    Shutdown,
}

impl FromStr for ActionPhase {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "startup" => Ok(Self::Startup),
            "interrupt" | "interrupt1" => Ok(Self::Interrupt1),
            "interrupt2" => Ok(Self::Interrupt2),
            "interrupt3" => Ok(Self::Interrupt3),
            "shutdown" => Ok(Self::Shutdown),
            _ => Err(UnknownToken(s.to_string())),
        }
    }
}

impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Startup => "startup",
            Self::Interrupt1 => "interrupt1",
            Self::Interrupt2 => "interrupt2",
            Self::Interrupt3 => "interrupt3",
            Self::Shutdown => "shutdown",
        };
        f.write_str(s)
    }
}

/// What an action does to its device.
///
/// `Unknown` is the unset value; it is never produced by `from_str`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActionType {
    #[default]
    Unknown,
    Configure,
    Calibrate,
    Attach,
    Abort,
    Detach,
    Park,
    Custom,
}

impl FromStr for ActionType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "configure" => Ok(Self::Configure),
            "calibrate" => Ok(Self::Calibrate),
            "attach" => Ok(Self::Attach),
            "abort" => Ok(Self::Abort),
            "detach" => Ok(Self::Detach),
            "park" => Ok(Self::Park),
            "custom" => Ok(Self::Custom),
            _ => Err(UnknownToken(s.to_string())),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Configure => "configure",
            Self::Calibrate => "calibrate",
            Self::Attach => "attach",
            Self::Abort => "abort",
            Self::Detach => "detach",
            Self::Park => "park",
            Self::Custom => "custom",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_tokens() {
        assert_eq!("startup".parse(), Ok(ActionPhase::Startup));
        assert_eq!("interrupt".parse(), Ok(ActionPhase::Interrupt1));
        assert_eq!("interrupt3".parse(), Ok(ActionPhase::Interrupt3));
        assert_eq!("shutdown".parse(), Ok(ActionPhase::Shutdown));
        assert!("Startup".parse::<ActionPhase>().is_err());
        // The unset sentinel cannot be spelled in a document.
        assert!("unknown".parse::<ActionPhase>().is_err());
    }

    #[test]
    fn test_type_tokens_round_trip_through_display() {
        for t in [
            ActionType::Configure,
            ActionType::Calibrate,
            ActionType::Attach,
            ActionType::Abort,
            ActionType::Detach,
            ActionType::Park,
            ActionType::Custom,
        ] {
            assert_eq!(t.to_string().parse(), Ok(t));
        }
        assert_eq!(
            "bogus".parse::<ActionType>(),
            Err(UnknownToken("bogus".to_string()))
        );
    }

    #[test]
    fn test_actions_for_phase_sorted_by_level() {
        let action = |phase, level| Action {
            phase,
            action_type: ActionType::Custom,
            level,
            params: vec![Param::new("tag", level.to_string())],
        };
        let device = Device {
            name: "d".into(),
            device_type: "t".into(),
            params: vec![Param::new("robotName", "R")],
            actions: vec![
                action(ActionPhase::Startup, 5),
                action(ActionPhase::Shutdown, 1),
                action(ActionPhase::Startup, 2),
            ],
        };
        let levels: Vec<u32> = device
            .actions_for_phase(ActionPhase::Startup)
            .iter()
            .map(|a| a.level)
            .collect();
        assert_eq!(levels, [2, 5]);
        assert!(device.has_param("robotName"));
        assert!(device.find_param("missing").is_none());
    }

    #[test]
    fn test_param_display() {
        assert_eq!(Param::new("a", "1").to_string(), "(a 1)");
        assert!(Param::group("g", "(a 1)").is_group);
    }
}
