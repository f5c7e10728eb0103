//! endpoint 表模块
//! - 每个 wrapper 类型声明一张表，建表时做一次性校验
//! - 子类型可以继承父表，同名表项由子类型覆盖
//! - 表建好以后不可变，所有实例共享

use std::collections::HashMap;

use crate::common::error::DeviceError;
use crate::rest::entity::{placeholders, EndpointDescriptor, EndpointKind, RequestType};

/// immutable name -> descriptor map, one per wrapper type
#[derive(Debug, Clone)]
pub struct EndpointTable {
    entries: HashMap<String, EndpointDescriptor>,
}

impl EndpointTable {
    pub fn builder() -> EndpointTableBuilder {
        EndpointTableBuilder {
            inherited: HashMap::new(),
            own: Vec::new(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct PendingEntry {
    kind: EndpointKind,
    name: String,
    verbs: Vec<(RequestType, String)>,
    doc: String,
}

/// collects declarations, `build` validates the lot in one pass
pub struct EndpointTableBuilder {
    inherited: HashMap<String, EndpointDescriptor>,
    own: Vec<PendingEntry>,
}

impl EndpointTableBuilder {
    /// 继承父类型的表，后续同名声明覆盖父表项
    pub fn inherit(mut self, parent: &EndpointTable) -> Self {
        for (name, descriptor) in &parent.entries {
            self.inherited.insert(name.clone(), descriptor.clone());
        }
        self
    }

    /// declare a fixed-path endpoint bound as a readable / writable property
    pub fn property(mut self, name: &str, verbs: &[(RequestType, &str)], doc: &str) -> Self {
        self.own.push(PendingEntry {
            kind: EndpointKind::Property,
            name: name.to_string(),
            verbs: verbs
                .iter()
                .map(|(verb, template)| (*verb, template.to_string()))
                .collect(),
            doc: doc.to_string(),
        });
        self
    }

    /// declare a templated endpoint bound as per-verb call methods
    pub fn method(mut self, name: &str, verbs: &[(RequestType, &str)], doc: &str) -> Self {
        self.own.push(PendingEntry {
            kind: EndpointKind::Method,
            name: name.to_string(),
            verbs: verbs
                .iter()
                .map(|(verb, template)| (*verb, template.to_string()))
                .collect(),
            doc: doc.to_string(),
        });
        self
    }

    pub fn build(self) -> Result<EndpointTable, DeviceError> {
        let mut entries = self.inherited;

        let mut own_names: Vec<&str> = Vec::new();
        for entry in &self.own {
            if own_names.contains(&entry.name.as_str()) {
                return Err(DeviceError::Configuration(format!(
                    "duplicate endpoint name '{}' in one table",
                    entry.name
                )));
            }
            own_names.push(entry.name.as_str());
        }

        for entry in self.own {
            let descriptor = Self::validate(entry)?;
            // 覆盖继承来的同名表项
            entries.insert(descriptor.name.clone(), descriptor);
        }

        Ok(EndpointTable { entries })
    }

    fn validate(entry: PendingEntry) -> Result<EndpointDescriptor, DeviceError> {
        if entry.verbs.is_empty() {
            return Err(DeviceError::Configuration(format!(
                "endpoint '{}' declares no verbs",
                entry.name
            )));
        }

        let mut verbs: HashMap<RequestType, String> = HashMap::new();
        for (verb, template) in entry.verbs {
            // 同一个 verb 声明两次说明表写错了
            if verbs.insert(verb, template).is_some() {
                return Err(DeviceError::Configuration(format!(
                    "endpoint '{}' declares {} twice",
                    entry.name,
                    verb.name()
                )));
            }
        }

        for template in verbs.values() {
            let names = placeholders(template)?;
            if entry.kind == EndpointKind::Property && !names.is_empty() {
                return Err(DeviceError::Configuration(format!(
                    "property '{}' template '{}' may not contain placeholders",
                    entry.name, template
                )));
            }
        }

        if entry.kind == EndpointKind::Property {
            if entry.doc.is_empty() {
                return Err(DeviceError::Configuration(format!(
                    "property '{}' requires a doc string",
                    entry.name
                )));
            }

            let setter_count = [RequestType::Put, RequestType::Post, RequestType::Patch]
                .into_iter()
                .filter(|verb| verbs.contains_key(verb))
                .count();
            if setter_count > 1 {
                return Err(DeviceError::Configuration(format!(
                    "property '{}' may only define one of PUT, POST or PATCH",
                    entry.name
                )));
            }
        }

        Ok(EndpointDescriptor::new(
            &entry.name,
            entry.kind,
            &entry.doc,
            verbs,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::entity::RequestType::{Get, Patch, Put};

    #[test]
    fn test_build_produces_one_descriptor_per_name() {
        let table = EndpointTable::builder()
            .property(
                "standard",
                &[(Get, "generator/standard"), (Put, "generator/standard")],
                "generated standard",
            )
            .method(
                "info",
                &[(Get, "sfpInfo/{interface}")],
                "sfp information",
            )
            .build()
            .unwrap();

        assert_eq!(table.len(), 2);
        let standard = table.find("standard").unwrap();
        assert_eq!(standard.kind, EndpointKind::Property);
        assert_eq!(standard.template(Get), Some("generator/standard"));
        let info = table.find("info").unwrap();
        assert_eq!(info.kind, EndpointKind::Method);
        assert!(table.find("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_in_one_table_fails() {
        let result = EndpointTable::builder()
            .property("standard", &[(Get, "generator/standard")], "standard")
            .property("standard", &[(Get, "generator/standard")], "standard")
            .build();
        assert!(matches!(result, Err(DeviceError::Configuration(_))));
    }

    #[test]
    fn test_property_with_two_setter_verbs_fails() {
        let result = EndpointTable::builder()
            .property(
                "standard",
                &[
                    (Get, "generator/standard"),
                    (Put, "generator/standard"),
                    (Patch, "generator/standard"),
                ],
                "standard",
            )
            .build();
        assert!(matches!(result, Err(DeviceError::Configuration(_))));
    }

    #[test]
    fn test_property_template_with_placeholder_fails() {
        let result = EndpointTable::builder()
            .property("info", &[(Get, "sfpInfo/{interface}")], "sfp info")
            .build();
        assert!(matches!(result, Err(DeviceError::Configuration(_))));
    }

    #[test]
    fn test_property_without_doc_fails() {
        let result = EndpointTable::builder()
            .property("standard", &[(Get, "generator/standard")], "")
            .build();
        assert!(matches!(result, Err(DeviceError::Configuration(_))));
    }

    #[test]
    fn test_entry_without_verbs_fails() {
        let result = EndpointTable::builder().method("info", &[], "info").build();
        assert!(matches!(result, Err(DeviceError::Configuration(_))));
    }

    #[test]
    fn test_unterminated_template_fails_at_build_time() {
        let result = EndpointTable::builder()
            .method("info", &[(Get, "sfpInfo/{interface")], "sfp info")
            .build();
        assert!(matches!(result, Err(DeviceError::Configuration(_))));
    }

    #[test]
    fn test_inherited_entry_is_overridden_by_own_entry() {
        let parent = EndpointTable::builder()
            .property("reference", &[(Get, "timing/reference")], "reference")
            .method(
                "info",
                &[(Get, "timing/ptp/{interface}/info")],
                "ptp info",
            )
            .build()
            .unwrap();

        let child = EndpointTable::builder()
            .inherit(&parent)
            .method(
                "info",
                &[(Get, "timing/ptpV2/{interface}/info")],
                "ptp v2 info",
            )
            .build()
            .unwrap();

        // 子表项覆盖父表项，其余父表项原样保留
        assert_eq!(child.len(), 2);
        assert_eq!(
            child.find("info").unwrap().template(Get),
            Some("timing/ptpV2/{interface}/info")
        );
        assert_eq!(
            child.find("reference").unwrap().template(Get),
            Some("timing/reference")
        );
        // 父表不能被改动
        assert_eq!(
            parent.find("info").unwrap().template(Get),
            Some("timing/ptp/{interface}/info")
        );
    }

    #[test]
    fn test_same_name_across_tables_is_not_a_duplicate() {
        let parent = EndpointTable::builder()
            .property("reference", &[(Get, "timing/reference")], "reference")
            .build()
            .unwrap();
        let child = EndpointTable::builder()
            .inherit(&parent)
            .property("reference", &[(Get, "timing/ref2")], "reference v2")
            .build()
            .unwrap();
        assert_eq!(child.len(), 1);
        assert_eq!(
            child.find("reference").unwrap().template(Get),
            Some("timing/ref2")
        );
    }
}
