// crates/robotinterface-xml/src/parser/device.rs

use super::Parser;
use crate::dom::Element;
use crate::types::{Device, Param};

impl Parser<'_> {
    /// Reads a `<device>` or a `<devices>` block into a flat list.
    pub(crate) fn read_devices(&mut self, element: &Element) -> Vec<Device> {
        match element.name.as_str() {
            "device" => vec![self.read_device_tag(element)],
            "devices" => self.read_devices_tag(element),
            other => {
                self.diagnostics.error(
                    element,
                    format!(r#"Expected "device" or "devices". Found "{}""#, other),
                );
                Vec::new()
            }
        }
    }

    /// `<device name="..." type="...">` with parameter and action children.
    ///
    /// A device missing `name` or `type` is returned partially filled and its
    /// children are not read.
    fn read_device_tag(&mut self, element: &Element) -> Device {
        let mut device = Device::default();

        let Some(name) = element.attribute("name") else {
            self.diagnostics
                .error(element, r#""device" element should contain the "name" attribute"#);
            return device;
        };
        device.name = name.to_string();

        let Some(device_type) = element.attribute("type") else {
            self.diagnostics
                .error(element, r#""device" element should contain the "type" attribute"#);
            return device;
        };
        device.device_type = device_type.to_string();

        device
            .params
            .push(Param::new("robotName", self.robot.portprefix.as_str()));

        for child in element.child_elements() {
            match child.name.as_str() {
                "action" | "actions" => device.actions.extend(self.read_actions(child)),
                _ => device.params.extend(self.read_params(child)),
            }
        }

        device
    }

    /// `<devices>` is a plain wrapper around `device` / `devices`.
    fn read_devices_tag(&mut self, element: &Element) -> Vec<Device> {
        let mut devices = Vec::new();
        for child in element.child_elements() {
            devices.extend(self.read_devices(child));
        }
        devices
    }
}
