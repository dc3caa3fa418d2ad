// crates/robotinterface-xml/src/parser/param.rs

//! The five parameter forms: `param`, `group`, `paramlist`, `subdevice` and
//! `params`. All of them normalize into a flat list of `Param`.

use super::Parser;
use crate::dom::Element;
use crate::types::Param;

impl Parser<'_> {
    /// Dispatches on the tag of `element` and returns the parameters it
    /// declares, in document order.
    pub(crate) fn read_params(&mut self, element: &Element) -> Vec<Param> {
        match element.name.as_str() {
            "param" => self.read_param_tag(element).into_iter().collect(),
            "group" => self.read_group_tag(element).into_iter().collect(),
            "paramlist" => self.read_paramlist_tag(element),
            "subdevice" => self.read_subdevice_tag(element),
            "params" => self.read_params_tag(element),
            other => {
                self.diagnostics.error(
                    element,
                    format!(
                        r#"Expected "param", "group", "paramlist", "subdevice", or "params". Found "{}""#,
                        other
                    ),
                );
                Vec::new()
            }
        }
    }

    /// `<param name="...">value</param>`
    fn read_param_tag(&mut self, element: &Element) -> Option<Param> {
        let Some(name) = element.attribute("name") else {
            self.diagnostics
                .error(element, r#""param" element should contain the "name" attribute"#);
            return None;
        };

        let Some(value) = element.text() else {
            self.diagnostics.error(
                element,
                format!(r#""param" element should have a value [ "name" = {} ]"#, name),
            );
            return None;
        };

        Some(Param::new(name, value))
    }

    /// `<group name="...">` collapses its children into a single parameter
    /// whose value is `(name value) (name value) ...`.
    fn read_group_tag(&mut self, element: &Element) -> Option<Param> {
        let Some(name) = element.attribute("name") else {
            self.diagnostics
                .error(element, r#""group" element should contain the "name" attribute"#);
            return None;
        };

        let mut children = Vec::new();
        for child in element.child_elements() {
            children.extend(self.read_params(child));
        }

        if children.is_empty() {
            self.diagnostics.error(element, r#""group" cannot be empty"#);
            return None;
        }

        let value = children
            .iter()
            .map(Param::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        Some(Param::group(name, value))
    }

    /// `<paramlist name="L"><elem name="x">1</elem>...</paramlist>`
    ///
    /// Produces a leading summary parameter named after the list, followed by
    /// one parameter per `elem`. The summary value lists the element *names*
    /// (not their values), e.g. `(x y)`.
    fn read_paramlist_tag(&mut self, element: &Element) -> Vec<Param> {
        let Some(name) = element.attribute("name") else {
            self.diagnostics.error(
                element,
                r#""paramlist" element should contain the "name" attribute"#,
            );
            return Vec::new();
        };

        let mut elems = Vec::new();
        for child in element.child_elements() {
            if child.name != "elem" {
                self.diagnostics
                    .error(child, format!(r#"Expected "elem". Found "{}""#, child.name));
                return Vec::new();
            }

            let Some(elem_name) = child.attribute("name") else {
                self.diagnostics
                    .error(child, r#""elem" element should contain the "name" attribute"#);
                return Vec::new();
            };

            let Some(value) = child.text() else {
                self.diagnostics.error(
                    child,
                    format!(r#""elem" element should have a value [ "name" = {} ]"#, elem_name),
                );
                return Vec::new();
            };

            elems.push(Param::new(elem_name, value));
        }

        // An empty list still yields its summary, whose value is only the
        // closing parenthesis.
        let mut summary = String::new();
        for elem in &elems {
            summary.push_str(if summary.is_empty() { "(" } else { " " });
            summary.push_str(&elem.name);
        }
        summary.push(')');

        let mut params = Vec::with_capacity(elems.len() + 1);
        params.push(Param::new(name, summary));
        params.extend(elems);
        params
    }

    /// `<subdevice type="T">` emits `subdevice = T` followed by its children
    /// flattened as plain scalar parameters.
    fn read_subdevice_tag(&mut self, element: &Element) -> Vec<Param> {
        let Some(device_type) = element.attribute("type") else {
            self.diagnostics.error(
                element,
                r#""subdevice" element should contain the "type" attribute"#,
            );
            return Vec::new();
        };

        let mut params = vec![Param::new("subdevice", device_type)];
        for child in element.child_elements() {
            params.extend(
                self.read_params(child)
                    .into_iter()
                    .map(|p| Param::new(p.name, p.value)),
            );
        }
        params
    }

    /// `<params>` is a plain wrapper around other parameter forms.
    fn read_params_tag(&mut self, element: &Element) -> Vec<Param> {
        let mut params = Vec::new();
        for child in element.child_elements() {
            params.extend(self.read_params(child));
        }
        params
    }
}
