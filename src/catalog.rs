use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use schemars::JsonSchema;
use serde_json::Value;

use crate::{
    resources::{self, *},
    schemagen::{Empty, GenerateSchema, PackageDescriptor, TypeMap, ValidationResources},
    Result,
};

/// The top-level types of the Service Catalog, keyed by resource name.
///
/// Only its schema is ever used.
#[allow(dead_code)]
#[derive(JsonSchema)]
#[schemars(rename = "ServiceCatalogSchema")]
#[serde(rename_all = "PascalCase")]
pub struct Schema {
    cluster_service_broker: ClusterServiceBroker,
    cluster_service_broker_list: ClusterServiceBrokerList,
    cluster_service_class: ClusterServiceClass,
    cluster_service_class_list: ClusterServiceClassList,
    cluster_service_plan: ClusterServicePlan,
    cluster_service_plan_list: ClusterServicePlanList,
    service_instance: ServiceInstance,
    service_instance_list: ServiceInstanceList,
    service_binding: ServiceBinding,
    service_binding_list: ServiceBindingList,
    service_broker: ServiceBroker,
    service_broker_list: ServiceBrokerList,
}

pub fn packages() -> Vec<PackageDescriptor> {
    vec![PackageDescriptor::new(
        resources::API_NAMESPACE,
        "servicecatalog.k8s.io",
        "me.snowdrop.servicecatalog.api.model",
        "servicecatalog_",
    )]
}

/// Timestamps and the empty marker are both emitted as plain strings.
pub fn type_map() -> TypeMap {
    TypeMap::new()
        .substitute::<Time, String>()
        .substitute::<Empty, String>()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Keeps the resources section used to build validation schemas.
    Validation,
    /// Model generation only.
    Model,
}

impl Mode {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("validation") => Mode::Validation,
            _ => Mode::Model,
        }
    }
}

/// Generates the Service Catalog schema and renders it as indented JSON.
pub fn render<G: GenerateSchema>(generator: &G, mode: Mode) -> Result<String> {
    let mut schema = generator.generate::<Schema>(&packages(), &type_map())?;
    if mode != Mode::Validation {
        schema.clear_resources();
    }
    tracing::debug!(?mode, "Rendering schema");

    indent(&serde_json::to_string(&schema)?)
}

/// Renames map value types to `additionalProperties` and indents with two spaces.
pub fn indent(compact: &str) -> Result<String> {
    // never collides with a boolean `additionalProperties` on the same node, see PropertyDescriptor
    let patched = compact.replace("\"additionalProperty\":", "\"additionalProperties\":");
    let value: Value = serde_json::from_str(&patched)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use assert_json_diff::assert_json_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::*;
    use crate::schemagen::Reflective;

    #[derive(Serialize)]
    struct MockSchema {
        #[serde(rename = "additionalProperty")]
        additional_property: Value,
        #[serde(rename = "Resources", skip_serializing_if = "Option::is_none")]
        resources: Option<Vec<String>>,
    }

    impl ValidationResources for MockSchema {
        fn clear_resources(&mut self) {
            self.resources = None;
        }
    }

    #[derive(Default)]
    struct MockGenerator {
        calls: Cell<usize>,
    }

    impl GenerateSchema for MockGenerator {
        type Output = MockSchema;

        fn generate<T: JsonSchema>(
            &self,
            packages: &[PackageDescriptor],
            type_map: &TypeMap,
        ) -> Result<MockSchema> {
            assert_eq!(T::schema_name(), "ServiceCatalogSchema");
            assert_eq!(packages, packages_fixture().as_slice());
            assert_eq!(type_map.len(), 2);
            self.calls.set(self.calls.get() + 1);
            Ok(MockSchema {
                additional_property: json!({"foo": "bar"}),
                resources: Some(vec!["x".to_owned()]),
            })
        }
    }

    fn packages_fixture() -> Vec<PackageDescriptor> {
        vec![PackageDescriptor::new(
            "io.k8s.servicecatalog.v1beta1",
            "servicecatalog.k8s.io",
            "me.snowdrop.servicecatalog.api.model",
            "servicecatalog_",
        )]
    }

    #[test]
    fn only_the_literal_validation_argument_selects_validation() {
        assert_eq!(Mode::from_arg(Some("validation")), Mode::Validation);
        assert_eq!(Mode::from_arg(None), Mode::Model);
        assert_eq!(Mode::from_arg(Some("Validation")), Mode::Model);
        assert_eq!(Mode::from_arg(Some("--validation")), Mode::Model);
        assert_eq!(Mode::from_arg(Some("")), Mode::Model);
    }

    #[test]
    fn model_mode_drops_resources() {
        let generator = MockGenerator::default();
        let output = render(&generator, Mode::Model).unwrap();
        assert_eq!(
            output,
            "{\n  \"additionalProperties\": {\n    \"foo\": \"bar\"\n  }\n}"
        );
        assert_eq!(generator.calls.get(), 1);
    }

    #[test]
    fn validation_mode_keeps_resources() {
        let output = render(&MockGenerator::default(), Mode::Validation).unwrap();
        assert_json_eq!(
            serde_json::from_str::<Value>(&output).unwrap(),
            json!({"additionalProperties": {"foo": "bar"}, "Resources": ["x"]})
        );
        assert!(output.contains("\n  \"Resources\": [\n    \"x\"\n  ]"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let generator = MockGenerator::default();
        assert_eq!(
            render(&generator, Mode::Validation).unwrap(),
            render(&generator, Mode::Validation).unwrap()
        );
        assert_eq!(
            render(&Reflective, Mode::Model).unwrap(),
            render(&Reflective, Mode::Model).unwrap()
        );
    }

    #[test]
    fn indent_keeps_key_order() {
        let output = indent(r#"{"id":"a","$schema":"b","additionalProperty":{"type":"string"}}"#)
            .unwrap();
        assert_eq!(
            output,
            "{\n  \"id\": \"a\",\n  \"$schema\": \"b\",\n  \"additionalProperties\": {\n    \"type\": \"string\"\n  }\n}"
        );
    }

    #[test]
    fn indent_rejects_invalid_json() {
        assert!(indent("{\"additionalProperty\":").is_err());
    }

    #[test]
    fn service_catalog_schema_in_model_mode() {
        let output = render(&Reflective, Mode::Model).unwrap();
        assert!(!output.contains("\"additionalProperty\":"));
        assert!(output.contains("\"additionalProperties\": {"));

        let schema: Value = serde_json::from_str(&output).unwrap();
        assert!(schema.get("resources").is_none());
        assert_eq!(
            schema["id"],
            "http://fabric8.io/servicecatalog/ServiceCatalogSchema#"
        );
        assert_eq!(
            schema["javaType"],
            "me.snowdrop.servicecatalog.api.model.ServiceCatalogSchema"
        );
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 12);
        assert_eq!(
            properties["ClusterServiceBroker"]["$ref"],
            "#/definitions/servicecatalog_ClusterServiceBroker"
        );
        assert_eq!(
            properties["ServiceBindingList"]["javaType"],
            "me.snowdrop.servicecatalog.api.model.ServiceBindingList"
        );
    }

    #[test]
    fn service_catalog_definitions() {
        let output = render(&Reflective, Mode::Model).unwrap();
        let schema: Value = serde_json::from_str(&output).unwrap();
        let definitions = &schema["definitions"];

        let broker = &definitions["servicecatalog_ClusterServiceBroker"];
        assert_eq!(
            broker["javaInterfaces"],
            json!(["io.fabric8.kubernetes.api.model.HasMetadata"])
        );
        assert_eq!(
            broker["properties"]["apiVersion"]["default"],
            "servicecatalog.k8s.io/v1beta1"
        );
        assert_eq!(broker["properties"]["kind"]["default"], "ClusterServiceBroker");

        // flattened common fields
        let spec = &definitions["servicecatalog_ClusterServiceBrokerSpec"]["properties"];
        assert_eq!(spec["url"]["type"], "string");
        assert_eq!(spec["relistRequests"]["javaType"], "Long");
        assert_eq!(
            spec["relistBehavior"]["enum"],
            json!(["Duration", "Manual"])
        );

        // byte strings are plain strings
        let transform = &definitions["servicecatalog_AddKeyTransform"]["properties"];
        for encoded in [&spec["caBundle"], &transform["value"]] {
            assert_eq!(encoded["type"], "string");
            assert!(encoded.get("$ref").is_none());
            assert!(encoded.get("format").is_none());
        }

        let condition = &definitions["servicecatalog_ServiceBrokerCondition"]["properties"];
        assert_eq!(condition["lastTransitionTime"]["type"], "string");
        assert!(condition["lastTransitionTime"].get("$ref").is_none());

        let list = &definitions["servicecatalog_ServiceInstanceList"];
        assert_eq!(
            list["javaInterfaces"],
            json!([
                "io.fabric8.kubernetes.api.model.KubernetesResource",
                "io.fabric8.kubernetes.api.model.KubernetesResourceList"
            ])
        );
        assert_eq!(
            list["properties"]["items"]["items"]["$ref"],
            "#/definitions/servicecatalog_ServiceInstance"
        );

        let user_info = &definitions["servicecatalog_UserInfo"]["properties"];
        assert_eq!(
            user_info["extra"]["javaType"],
            "java.util.Map<String,java.util.List<String>>"
        );
        assert_eq!(user_info["extra"]["additionalProperties"]["type"], "array");
    }

    #[test]
    fn service_catalog_schema_in_validation_mode() {
        let output = render(&Reflective, Mode::Validation).unwrap();
        assert!(!output.contains("\"additionalProperty\":"));

        let schema: Value = serde_json::from_str(&output).unwrap();
        let resources = schema["resources"].as_object().unwrap();
        assert_eq!(resources.len(), 12);
        assert_eq!(
            resources["servicebinding"],
            schema["definitions"]["servicecatalog_ServiceBinding"]
        );
        assert!(resources.contains_key("clusterserviceplanlist"));
    }

    fn assert_no_shared_node(value: &Value) {
        match value {
            Value::Object(node) => {
                assert!(
                    !(node.contains_key("additionalProperty")
                        && node.contains_key("additionalProperties")),
                    "both keys on {node:?}"
                );
                node.values().for_each(assert_no_shared_node);
            }
            Value::Array(items) => items.iter().for_each(assert_no_shared_node),
            _ => {}
        }
    }

    #[test]
    fn map_value_types_never_share_a_node_with_the_object_flag() {
        let schema = Reflective
            .generate::<Schema>(&packages(), &type_map())
            .unwrap();
        let compact = serde_json::to_value(&schema).unwrap();
        assert_no_shared_node(&compact);
        assert!(serde_json::to_string(&compact)
            .unwrap()
            .contains("\"additionalProperty\":"));
    }

    #[test]
    fn output_is_indented_with_two_spaces() {
        let output = render(&Reflective, Mode::Model).unwrap();
        for line in output.lines().skip(1) {
            let indentation = line.len() - line.trim_start().len();
            assert_eq!(indentation % 2, 0, "odd indentation in {line:?}");
        }
        assert!(output.starts_with("{\n  \"id\": "));
    }
}
