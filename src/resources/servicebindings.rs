use k8s_openapi::{
    apimachinery::pkg::apis::meta::v1::{ListMeta, Time},
    ByteString,
};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    ConditionStatus, LocalObjectReference, ObjectReference, ParametersFromSource, UserInfo,
};

/// ServiceBinding represents a "used by" relationship between an application and a
/// ServiceInstance.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    kind = "ServiceBinding",
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    namespaced,
    schema = "manual"
)]
#[kube(status = "ServiceBindingStatus")]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBindingSpec")]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingSpec {
    /// The ServiceInstance in the same namespace this binding is for.
    pub instance_ref: LocalObjectReference,
    /// A set of the parameters to be passed to the underlying broker, as free-form JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    /// The list of sources to populate parameters from.
    #[serde(default)]
    pub parameters_from: Vec<ParametersFromSource>,
    /// The name of the secret to create in the binding's namespace with the credentials.
    #[serde(default)]
    pub secret_name: String,
    /// Transformations applied to the credentials returned by the broker.
    #[serde(default)]
    pub secret_transforms: Vec<SecretTransform>,
    /// The identity of this object for use with the Open Service Broker API.
    #[serde(rename = "externalID")]
    pub external_id: String,
    /// Information about the user that last changed the spec. Set by the webhook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
}

resource_json_schema!(
    ServiceBinding,
    ServiceBindingSpec,
    ServiceBindingStatus,
    "ServiceBinding represents a \"used by\" relationship between an application and a ServiceInstance."
);

/// A single transformation applied to the credentials of a binding. Only one field may be set.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.SecretTransform")]
#[serde(rename_all = "camelCase")]
pub struct SecretTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename_key: Option<RenameKeyTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_key: Option<AddKeyTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_keys_from: Option<AddKeysFromTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_key: Option<RemoveKeyTransform>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.RenameKeyTransform")]
pub struct RenameKeyTransform {
    pub from: String,
    pub to: String,
}

/// Adds a key to the credentials secret, from a literal or a JSONPath over the credentials.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.AddKeyTransform")]
#[serde(rename_all = "camelCase")]
pub struct AddKeyTransform {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub value: Option<ByteString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_path_expression: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.AddKeysFromTransform")]
#[serde(rename_all = "camelCase")]
pub struct AddKeysFromTransform {
    /// The Secret whose keys are all merged into the credentials secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<ObjectReference>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.RemoveKeyTransform")]
pub struct RemoveKeyTransform {
    pub key: String,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBindingConditionType")]
pub enum ServiceBindingConditionType {
    Ready,
    Failed,
}

/// Contains condition information about a binding.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBindingCondition")]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingCondition {
    #[serde(rename = "type")]
    pub type_: ServiceBindingConditionType,
    pub status: ConditionStatus,
    pub last_transition_time: Time,
    pub reason: String,
    pub message: String,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBindingOperation")]
pub enum ServiceBindingOperation {
    Bind,
    Unbind,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBindingUnbindStatus")]
pub enum ServiceBindingUnbindStatus {
    NotRequired,
    Required,
    Succeeded,
    Failed,
}

/// The properties of a binding as last sent to, or currently being sent to, the broker.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBindingPropertiesState")]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingPropertiesState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBindingStatus")]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingStatus {
    pub conditions: Vec<ServiceBindingCondition>,
    /// Whether the broker is currently performing an asynchronous bind or unbind.
    pub async_op_in_progress: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_operation: Option<ServiceBindingOperation>,
    /// The `metadata.generation` that was last fully reconciled.
    pub reconciled_generation: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_start_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress_properties: Option<ServiceBindingPropertiesState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_properties: Option<ServiceBindingPropertiesState>,
    /// Whether the controller is attempting to unbind a binding that failed to bind.
    #[serde(default)]
    pub orphan_mitigation_in_progress: bool,
    pub unbind_status: ServiceBindingUnbindStatus,
}

/// A list of ServiceBindings.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBindingList")]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingList {
    pub api_version: String,
    pub kind: String,
    pub metadata: ListMeta,
    pub items: Vec<ServiceBinding>,
}
