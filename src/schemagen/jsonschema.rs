use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub static JSON_SCHEMA_URI: &str = "http://json-schema.org/schema#";

/// The document produced by the generator: named definitions, the root object and, for
/// validation schemas, the top-level resources.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GeneratedSchema {
    pub id: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub definitions: BTreeMap<String, PropertyDescriptor>,
    #[serde(flatten)]
    pub root: PropertyDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<BTreeMap<String, PropertyDescriptor>>,
}

/// A single schema node.
///
/// Map value types serialize under `additionalProperty`, since `additionalProperties` is
/// already taken by the boolean flag of object nodes. The two never appear on the same node and
/// the key is renamed once the document is rendered.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertyDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertyDescriptor>>,
    #[serde(rename = "additionalProperty", skip_serializing_if = "Option::is_none")]
    pub map_value_type: Option<Box<PropertyDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub java_interfaces: Vec<String>,
}

impl PropertyDescriptor {
    pub fn primitive(instance_type: &str) -> Self {
        PropertyDescriptor {
            instance_type: Some(instance_type.to_owned()),
            ..Default::default()
        }
    }

    pub fn reference(reference: String, java_type: String) -> Self {
        PropertyDescriptor {
            reference: Some(reference),
            java_type: Some(java_type),
            ..Default::default()
        }
    }

    pub fn object(properties: BTreeMap<String, PropertyDescriptor>) -> Self {
        PropertyDescriptor {
            instance_type: Some("object".to_owned()),
            properties: Some(properties),
            additional_properties: Some(true),
            ..Default::default()
        }
    }

    pub fn array(items: PropertyDescriptor) -> Self {
        PropertyDescriptor {
            instance_type: Some("array".to_owned()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    pub fn map(value: PropertyDescriptor) -> Self {
        PropertyDescriptor {
            instance_type: Some("object".to_owned()),
            java_type: Some(format!("java.util.Map<String,{}>", value.java_type_name())),
            map_value_type: Some(Box::new(value)),
            ..Default::default()
        }
    }

    /// Free-form JSON.
    pub fn any_object() -> Self {
        PropertyDescriptor {
            instance_type: Some("object".to_owned()),
            java_type: Some("java.util.Map<String,Object>".to_owned()),
            ..Default::default()
        }
    }

    /// Replaces the description when one is given, keeping the current one otherwise.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        if description.is_some() {
            self.description = description;
        }
        self
    }

    pub fn is_string(&self) -> bool {
        self.reference.is_none() && self.instance_type.as_deref() == Some("string")
    }

    /// The Java type a value of this node maps to when used as a type argument.
    pub fn java_type_name(&self) -> String {
        if let Some(java_type) = &self.java_type {
            return java_type.clone();
        }
        match self.instance_type.as_deref() {
            Some("string") => "String".to_owned(),
            Some("integer") => "Integer".to_owned(),
            Some("number") => "Double".to_owned(),
            Some("boolean") => "Boolean".to_owned(),
            Some("array") => format!(
                "java.util.List<{}>",
                self.items
                    .as_deref()
                    .map_or_else(|| "Object".to_owned(), PropertyDescriptor::java_type_name)
            ),
            _ => "Object".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn map_value_type_uses_singular_key() {
        let map = PropertyDescriptor::map(PropertyDescriptor::primitive("string"));
        assert_json_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({
                "type": "object",
                "additionalProperty": {"type": "string"},
                "javaType": "java.util.Map<String,String>"
            })
        );
    }

    #[test]
    fn java_type_of_nested_collections() {
        let list = PropertyDescriptor::array(PropertyDescriptor::primitive("string"));
        assert_eq!(list.java_type_name(), "java.util.List<String>");
        assert_eq!(
            PropertyDescriptor::map(list).java_type_name(),
            "java.util.Map<String,java.util.List<String>>"
        );
    }

    #[test]
    fn description_is_only_replaced_when_given() {
        let described = PropertyDescriptor::primitive("string").with_description(Some("a".into()));
        assert_eq!(described.clone().with_description(None).description.as_deref(), Some("a"));
        assert_eq!(
            described.with_description(Some("b".into())).description.as_deref(),
            Some("b")
        );
    }

    #[test]
    fn resources_are_omitted_when_cleared() {
        let schema = GeneratedSchema {
            id: "http://fabric8.io/test/Root#".to_owned(),
            schema: JSON_SCHEMA_URI.to_owned(),
            definitions: BTreeMap::new(),
            root: PropertyDescriptor::object(BTreeMap::new()),
            resources: None,
        };
        assert_json_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "id": "http://fabric8.io/test/Root#",
                "$schema": "http://json-schema.org/schema#",
                "definitions": {},
                "type": "object",
                "properties": {},
                "additionalProperties": true
            })
        );
    }
}
