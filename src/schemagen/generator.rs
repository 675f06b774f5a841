use std::{
    collections::{BTreeMap, BTreeSet},
    sync::OnceLock,
};

use regex::Regex;
use schemars::{
    gen::SchemaSettings,
    schema::{InstanceType, ObjectValidation, Schema, SchemaObject, SingleOrVec},
    JsonSchema, Map,
};
use serde_json::Value;

use super::{GeneratedSchema, PackageDescriptor, PropertyDescriptor, TypeMap, JSON_SCHEMA_URI};
use crate::{Error, Result};

const DEFINITIONS: &str = "#/definitions/";
const HAS_METADATA: &str = "io.fabric8.kubernetes.api.model.HasMetadata";
const KUBERNETES_RESOURCE: &str = "io.fabric8.kubernetes.api.model.KubernetesResource";
const KUBERNETES_RESOURCE_LIST: &str = "io.fabric8.kubernetes.api.model.KubernetesResourceList";

/// Generates the schema of `T`, which must describe an object with properties.
///
/// Every property of the root becomes a root property of the document, and every struct reached
/// from it becomes a definition keyed by its qualified name. Types listed in `type_map` are
/// replaced wherever they are referenced.
pub fn generate_schema<T: JsonSchema>(
    packages: &[PackageDescriptor],
    type_map: &TypeMap,
) -> Result<GeneratedSchema> {
    let settings = SchemaSettings::draft07().with(|s| {
        s.option_nullable = true;
        s.option_add_null_type = false;
    });
    let definitions_path = settings.definitions_path.clone();
    let root = settings.into_generator().into_root_schema_for::<T>();

    let root_name = T::schema_name();
    let root_properties = match (&root.schema.object, instance_type(&root.schema)) {
        (Some(validation), Some(InstanceType::Object)) if !validation.properties.is_empty() => {
            &validation.properties
        }
        _ => return Err(Error::InvalidRoot(root_name)),
    };

    let mut generator = Generator {
        packages,
        type_map,
        source: &root.definitions,
        definitions_path: &definitions_path,
        definitions: BTreeMap::new(),
        visited: BTreeSet::new(),
    };

    let mut properties = BTreeMap::new();
    let mut resources = BTreeMap::new();
    for (name, schema) in root_properties {
        let descriptor = generator.property(schema, &format!("{root_name}.{name}"))?;
        if let Some(definition) = descriptor
            .reference
            .as_deref()
            .and_then(|reference| reference.strip_prefix(DEFINITIONS))
            .and_then(|key| generator.definitions.get(key))
        {
            resources.insert(name.to_lowercase(), definition.clone());
        }
        properties.insert(name.clone(), descriptor);
    }

    let simple_name = root_name.rsplit('.').next().unwrap_or(&root_name);
    let id = match packages.first() {
        Some(package) => format!(
            "http://fabric8.io/{}/{simple_name}#",
            package.api_group.split('.').next().unwrap_or(package.api_group)
        ),
        None => format!("http://fabric8.io/{simple_name}#"),
    };
    let mut root_descriptor = PropertyDescriptor::object(properties);
    root_descriptor.java_type = Some(match packages.first() {
        Some(package) => format!("{}.{simple_name}", package.java_package),
        None => simple_name.to_owned(),
    });

    tracing::debug!(
        root = %root_name,
        definitions = generator.definitions.len(),
        resources = resources.len(),
        "Generated schema"
    );

    Ok(GeneratedSchema {
        id,
        schema: JSON_SCHEMA_URI.to_owned(),
        definitions: generator.definitions,
        root: root_descriptor,
        resources: Some(resources),
    })
}

/// Where a reflected definition lands in the generated document.
struct Qualified {
    key: String,
    java_type: String,
    /// `apiVersion` and `kind` defaults, only known for described packages.
    type_meta: Option<(String, String)>,
}

struct Generator<'a> {
    packages: &'a [PackageDescriptor],
    type_map: &'a TypeMap,
    source: &'a Map<String, Schema>,
    definitions_path: &'a str,
    definitions: BTreeMap<String, PropertyDescriptor>,
    visited: BTreeSet<String>,
}

impl<'a> Generator<'a> {
    fn property(&mut self, schema: &'a Schema, context: &str) -> Result<PropertyDescriptor> {
        let object = match schema {
            Schema::Bool(true) => return Ok(PropertyDescriptor::any_object()),
            Schema::Bool(false) => {
                return Err(Error::UnsupportedSchema {
                    context: context.to_owned(),
                    reason: "the schema accepts no value",
                })
            }
            Schema::Object(object) => object,
        };
        let description = object
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.description.clone());

        let descriptor = match reference(object) {
            Some(reference) => self.reference(reference, context)?,
            None => self.inline(object, None, context)?,
        };
        Ok(descriptor.with_description(description))
    }

    fn reference(&mut self, reference: &'a str, context: &str) -> Result<PropertyDescriptor> {
        let name = reference
            .strip_prefix(self.definitions_path)
            .unwrap_or(reference);

        let type_map = self.type_map;
        if let Some(replacement) = type_map.get(name) {
            tracing::trace!(%name, %context, "Substituting type");
            return self.substitute(replacement, context);
        }

        let source = self.source;
        match source.get(name) {
            Some(Schema::Object(object)) if is_struct(object) => {
                let qualified = self.define(name, object)?;
                Ok(PropertyDescriptor::reference(
                    format!("{DEFINITIONS}{}", qualified.key),
                    qualified.java_type,
                ))
            }
            Some(definition) => self.property(definition, name),
            None => Err(Error::UnresolvedReference(reference.to_owned())),
        }
    }

    // Replacement schemas are self-contained, so they never reach into `source`.
    fn substitute(&mut self, replacement: &Schema, context: &str) -> Result<PropertyDescriptor> {
        match replacement {
            Schema::Bool(true) => Ok(PropertyDescriptor::any_object()),
            Schema::Object(object) if reference(object).is_none() => {
                let mut nested = Generator {
                    packages: self.packages,
                    type_map: &TypeMap::default(),
                    source: &Map::new(),
                    definitions_path: self.definitions_path,
                    definitions: BTreeMap::new(),
                    visited: BTreeSet::new(),
                };
                nested.inline(object, None, context)
            }
            _ => Err(Error::UnsupportedSchema {
                context: context.to_owned(),
                reason: "substitutions must be inline schemas",
            }),
        }
    }

    fn define(&mut self, name: &str, object: &'a SchemaObject) -> Result<Qualified> {
        let qualified = self.qualify(name);
        if self.visited.insert(name.to_owned()) {
            let mut descriptor = self.inline(object, Some(&qualified), name)?;
            descriptor.java_type = Some(qualified.java_type.clone());
            self.definitions.insert(qualified.key.clone(), descriptor);
        }
        Ok(qualified)
    }

    fn qualify(&self, name: &str) -> Qualified {
        let (namespace, type_name) = name.rsplit_once('.').unwrap_or(("", name));
        match self.packages.iter().find(|p| p.source == namespace) {
            Some(package) => {
                let version = namespace.rsplit('.').next().unwrap_or(namespace);
                Qualified {
                    key: format!("{}{type_name}", package.prefix),
                    java_type: format!("{}.{type_name}", package.java_package),
                    type_meta: Some((
                        format!("{}/{version}", package.api_group),
                        type_name.to_owned(),
                    )),
                }
            }
            None if namespace.is_empty() => Qualified {
                key: type_name.to_owned(),
                java_type: type_name.to_owned(),
                type_meta: None,
            },
            None => Qualified {
                key: format!("{}_{type_name}", sanitize(namespace)),
                java_type: name.to_owned(),
                type_meta: None,
            },
        }
    }

    fn inline(
        &mut self,
        object: &'a SchemaObject,
        qualified: Option<&Qualified>,
        context: &str,
    ) -> Result<PropertyDescriptor> {
        if let Some(values) = &object.enum_values {
            let mut descriptor = PropertyDescriptor::primitive(match instance_type(object) {
                Some(InstanceType::Integer) => "integer",
                _ => "string",
            });
            descriptor.enum_values = values.clone();
            return Ok(descriptor);
        }

        let descriptor = match instance_type(object) {
            Some(InstanceType::String) => {
                let mut descriptor = PropertyDescriptor::primitive("string");
                descriptor.format = object.format.clone();
                descriptor.pattern = object.string.as_ref().and_then(|s| s.pattern.clone());
                descriptor
            }
            Some(InstanceType::Integer) => {
                let mut descriptor = PropertyDescriptor::primitive("integer");
                if matches!(object.format.as_deref(), Some("int64" | "uint64")) {
                    descriptor.java_type = Some("Long".to_owned());
                }
                descriptor.minimum = object.number.as_ref().and_then(|n| n.minimum);
                descriptor.maximum = object.number.as_ref().and_then(|n| n.maximum);
                descriptor
            }
            Some(InstanceType::Number) => {
                let mut descriptor = PropertyDescriptor::primitive("number");
                descriptor.minimum = object.number.as_ref().and_then(|n| n.minimum);
                descriptor.maximum = object.number.as_ref().and_then(|n| n.maximum);
                descriptor
            }
            Some(InstanceType::Boolean) => PropertyDescriptor::primitive("boolean"),
            Some(InstanceType::Array) => {
                let items = match object.array.as_ref().and_then(|a| a.items.as_ref()) {
                    Some(SingleOrVec::Single(items)) => {
                        self.property(items, &format!("{context}[]"))?
                    }
                    Some(SingleOrVec::Vec(_)) => {
                        return Err(Error::UnsupportedSchema {
                            context: context.to_owned(),
                            reason: "tuple arrays are not supported",
                        })
                    }
                    None => PropertyDescriptor::any_object(),
                };
                PropertyDescriptor::array(items)
            }
            Some(InstanceType::Object) => match &object.object {
                Some(validation) if !validation.properties.is_empty() => {
                    self.object(validation, qualified, context)?
                }
                Some(validation) => match validation.additional_properties.as_deref() {
                    Some(value) => {
                        PropertyDescriptor::map(self.property(value, &format!("{context}{{}}"))?)
                    }
                    None => self.object(validation, qualified, context)?,
                },
                None if qualified.is_some() => PropertyDescriptor::object(BTreeMap::new()),
                None => PropertyDescriptor::any_object(),
            },
            Some(InstanceType::Null) => {
                return Err(Error::UnsupportedSchema {
                    context: context.to_owned(),
                    reason: "null schemas are not supported",
                })
            }
            None => {
                let composite = object.subschemas.as_ref().is_some_and(|subschemas| {
                    subschemas.any_of.is_some() || subschemas.one_of.is_some()
                });
                if composite {
                    return Err(Error::UnsupportedSchema {
                        context: context.to_owned(),
                        reason: "composite schemas are not supported",
                    });
                }
                PropertyDescriptor::any_object()
            }
        };

        let description = object
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.description.clone());
        Ok(descriptor.with_description(description))
    }

    fn object(
        &mut self,
        validation: &'a ObjectValidation,
        qualified: Option<&Qualified>,
        context: &str,
    ) -> Result<PropertyDescriptor> {
        let type_meta = qualified.and_then(|q| q.type_meta.as_ref());
        let mut properties = BTreeMap::new();
        for (name, schema) in &validation.properties {
            let mut descriptor = self.property(schema, &format!("{context}.{name}"))?;
            match (name.as_str(), type_meta) {
                ("apiVersion", Some((api_version, _))) if descriptor.is_string() => {
                    descriptor.default = Some(Value::String(api_version.clone()));
                    descriptor.required = true;
                }
                ("kind", Some((_, kind))) if descriptor.is_string() => {
                    descriptor.default = Some(Value::String(kind.clone()));
                    descriptor.required = true;
                }
                _ => {}
            }
            properties.insert(name.clone(), descriptor);
        }

        let mut descriptor = PropertyDescriptor::object(properties);
        descriptor.java_interfaces = java_interfaces(validation);
        Ok(descriptor)
    }
}

fn instance_type(object: &SchemaObject) -> Option<InstanceType> {
    match object.instance_type.as_ref()? {
        SingleOrVec::Single(instance_type) => Some(**instance_type),
        SingleOrVec::Vec(instance_types) => instance_types
            .iter()
            .find(|instance_type| **instance_type != InstanceType::Null)
            .copied(),
    }
}

/// The referenced definition, either directly or wrapped in a single-element `allOf` to carry
/// sibling keywords.
fn reference(object: &SchemaObject) -> Option<&str> {
    if let Some(reference) = object.reference.as_deref() {
        return Some(reference);
    }
    match object.subschemas.as_deref()?.all_of.as_deref()? {
        [Schema::Object(inner)] => inner.reference.as_deref(),
        _ => None,
    }
}

/// Objects with named properties, or without a value type, are emitted as definitions. Maps,
/// enums and primitives are inlined where they are used.
fn is_struct(object: &SchemaObject) -> bool {
    instance_type(object) == Some(InstanceType::Object)
        && object.object.as_ref().map_or(true, |validation| {
            !validation.properties.is_empty() || validation.additional_properties.is_none()
        })
}

fn java_interfaces(validation: &ObjectValidation) -> Vec<String> {
    let metadata = match validation.properties.get("metadata") {
        Some(Schema::Object(metadata)) => reference(metadata),
        _ => None,
    };
    match metadata {
        Some(reference) if reference.ends_with(".ObjectMeta") => vec![HAS_METADATA.to_owned()],
        Some(reference) if reference.ends_with(".ListMeta") => vec![
            KUBERNETES_RESOURCE.to_owned(),
            KUBERNETES_RESOURCE_LIST.to_owned(),
        ],
        _ => Vec::new(),
    }
}

fn sanitize(namespace: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS
        .get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").unwrap())
        .replace_all(namespace, "_")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use assert_json_diff::assert_json_include;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
    use schemars::JsonSchema;
    use serde_json::{json, Value};

    use super::*;
    use crate::schemagen::Empty;

    static PACKAGES: &[PackageDescriptor] = &[PackageDescriptor::new(
        "io.example.v1alpha1",
        "widgets.example.io",
        "io.example.model",
        "example_",
    )];

    /// A widget.
    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[schemars(rename = "io.example.v1alpha1.Widget")]
    #[serde(rename_all = "camelCase")]
    struct Widget {
        api_version: String,
        kind: String,
        metadata: ObjectMeta,
        /// Labels of the widget.
        labels: BTreeMap<String, String>,
        parts: Vec<Part>,
        count: i64,
        size: i32,
        marker: Option<Empty>,
        color: Option<Color>,
        extra: Option<serde_json::Value>,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[schemars(rename = "io.example.v1alpha1.Part")]
    struct Part {
        name: String,
        children: Vec<Part>,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[schemars(rename = "io.example.v1alpha1.Color")]
    enum Color {
        Red,
        Blue,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[schemars(rename = "io.example.v1alpha1.WidgetList")]
    struct WidgetList {
        metadata: ListMeta,
        items: Vec<Widget>,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[schemars(rename = "WidgetSchema")]
    #[serde(rename_all = "PascalCase")]
    struct WidgetSchema {
        widget: Widget,
        widget_list: WidgetList,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[serde(untagged)]
    enum Shape {
        Square(i32),
        Label(String),
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct WithShape {
        shape: Shape,
    }

    fn generate() -> Value {
        let type_map = TypeMap::new().substitute::<Empty, String>();
        let schema = generate_schema::<WidgetSchema>(PACKAGES, &type_map).unwrap();
        serde_json::to_value(&schema).unwrap()
    }

    #[test]
    fn root_is_labelled_with_the_first_package() {
        let schema = generate();
        assert_eq!(schema["id"], "http://fabric8.io/widgets/WidgetSchema#");
        assert_eq!(schema["$schema"], JSON_SCHEMA_URI);
        assert_eq!(schema["javaType"], "io.example.model.WidgetSchema");
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], true);
    }

    #[test]
    fn root_properties_reference_prefixed_definitions() {
        let schema = generate();
        assert_json_include!(
            actual: schema["properties"].clone(),
            expected: json!({
                "Widget": {
                    "$ref": "#/definitions/example_Widget",
                    "javaType": "io.example.model.Widget"
                },
                "WidgetList": {
                    "$ref": "#/definitions/example_WidgetList",
                    "javaType": "io.example.model.WidgetList"
                }
            })
        );
        assert!(schema["definitions"]["example_Part"].is_object());
    }

    #[test]
    fn type_meta_defaults_come_from_the_package() {
        let widget = &generate()["definitions"]["example_Widget"];
        assert_json_include!(
            actual: widget["properties"].clone(),
            expected: json!({
                "apiVersion": {"type": "string", "default": "widgets.example.io/v1alpha1", "required": true},
                "kind": {"type": "string", "default": "Widget", "required": true}
            })
        );
        assert_eq!(widget["description"], "A widget.");
    }

    #[test]
    fn resources_implement_fabric8_interfaces() {
        let schema = generate();
        assert_eq!(
            schema["definitions"]["example_Widget"]["javaInterfaces"],
            json!([HAS_METADATA])
        );
        assert_eq!(
            schema["definitions"]["example_WidgetList"]["javaInterfaces"],
            json!([KUBERNETES_RESOURCE, KUBERNETES_RESOURCE_LIST])
        );
        assert!(schema["definitions"]["example_Part"]
            .get("javaInterfaces")
            .is_none());
    }

    #[test]
    fn maps_carry_their_value_type() {
        let labels = &generate()["definitions"]["example_Widget"]["properties"]["labels"];
        assert_json_include!(
            actual: labels.clone(),
            expected: json!({
                "type": "object",
                "description": "Labels of the widget.",
                "additionalProperty": {"type": "string"},
                "javaType": "java.util.Map<String,String>"
            })
        );
        assert!(labels.get("additionalProperties").is_none());
    }

    #[test]
    fn primitives_enums_and_free_form_values() {
        let properties = generate()["definitions"]["example_Widget"]["properties"].clone();
        assert_json_include!(
            actual: properties,
            expected: json!({
                "count": {"type": "integer", "javaType": "Long"},
                "size": {"type": "integer"},
                "color": {"type": "string", "enum": ["Red", "Blue"]},
                "extra": {"type": "object", "javaType": "java.util.Map<String,Object>"},
                "parts": {
                    "type": "array",
                    "items": {"$ref": "#/definitions/example_Part", "javaType": "io.example.model.Part"}
                }
            })
        );
    }

    #[test]
    fn substituted_types_are_emitted_as_replacement() {
        let schema = generate();
        assert_eq!(
            schema["definitions"]["example_Widget"]["properties"]["marker"],
            json!({"type": "string"})
        );
        assert!(schema["definitions"].get("Empty").is_none());
    }

    #[test]
    fn recursive_types_are_defined_once() {
        let part = &generate()["definitions"]["example_Part"];
        assert_eq!(
            part["properties"]["children"]["items"]["$ref"],
            "#/definitions/example_Part"
        );
    }

    #[test]
    fn undescribed_packages_use_the_sanitized_namespace() {
        let schema = generate();
        let metadata = &schema["definitions"]["example_Widget"]["properties"]["metadata"];
        assert_eq!(
            metadata["$ref"],
            "#/definitions/io_k8s_apimachinery_pkg_apis_meta_v1_ObjectMeta"
        );
        assert_eq!(
            metadata["javaType"],
            "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"
        );
        assert!(schema["definitions"]["io_k8s_apimachinery_pkg_apis_meta_v1_ObjectMeta"]
            .is_object());
    }

    #[test]
    fn resources_are_keyed_by_lowercased_root_property() {
        let schema = generate();
        assert_eq!(
            schema["resources"]["widget"],
            schema["definitions"]["example_Widget"]
        );
        assert_eq!(
            schema["resources"]["widgetlist"],
            schema["definitions"]["example_WidgetList"]
        );
    }

    #[test]
    fn root_must_be_an_object() {
        let err = generate_schema::<String>(PACKAGES, &TypeMap::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidRoot(name) if name == "String"));
    }

    #[test]
    fn composite_schemas_are_rejected() {
        let err = generate_schema::<WithShape>(PACKAGES, &TypeMap::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedSchema { .. }));
    }

    #[test]
    fn sanitize_collapses_separators() {
        assert_eq!(sanitize("io.k8s.api-machinery/v1"), "io_k8s_api_machinery_v1");
    }
}
