use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, Time};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ClusterObjectReference, ConditionStatus, ParametersFromSource, UserInfo};

/// Identifies the class and plan of an instance, either by external name, external ID or by
/// Kubernetes name. Exactly one of the pairs must be set.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.PlanReference")]
#[serde(rename_all = "camelCase")]
pub struct PlanReference {
    #[serde(default)]
    pub cluster_service_class_external_name: String,
    #[serde(default)]
    pub cluster_service_plan_external_name: String,
    #[serde(default, rename = "clusterServiceClassExternalID")]
    pub cluster_service_class_external_id: String,
    #[serde(default, rename = "clusterServicePlanExternalID")]
    pub cluster_service_plan_external_id: String,
    #[serde(default)]
    pub cluster_service_class_name: String,
    #[serde(default)]
    pub cluster_service_plan_name: String,
}

/// ServiceInstance represents a provisioned instance of a ClusterServiceClass.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    kind = "ServiceInstance",
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    namespaced,
    schema = "manual"
)]
#[kube(status = "ServiceInstanceStatus")]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstanceSpec")]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstanceSpec {
    #[serde(flatten)]
    pub plan_reference: PlanReference,
    /// The ClusterServiceClass resolved from the plan reference. Set by the controller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_service_class_ref: Option<ClusterObjectReference>,
    /// The ClusterServicePlan resolved from the plan reference. Set by the controller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_service_plan_ref: Option<ClusterObjectReference>,
    /// A set of the parameters to be passed to the underlying broker, as free-form JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    /// The list of sources to populate parameters from.
    #[serde(default)]
    pub parameters_from: Vec<ParametersFromSource>,
    /// The identity of this object for use with the Open Service Broker API.
    #[serde(rename = "externalID")]
    pub external_id: String,
    /// Information about the user that last changed the spec. Set by the webhook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    /// A strictly increasing counter that can be incremented to force an update of the instance.
    #[serde(default)]
    pub update_requests: i64,
}

resource_json_schema!(
    ServiceInstance,
    ServiceInstanceSpec,
    ServiceInstanceStatus,
    "ServiceInstance represents a provisioned instance of a ClusterServiceClass."
);

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstanceConditionType")]
pub enum ServiceInstanceConditionType {
    Ready,
    Failed,
    OrphanMitigation,
}

/// Contains condition information about an instance.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstanceCondition")]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstanceCondition {
    #[serde(rename = "type")]
    pub type_: ServiceInstanceConditionType,
    pub status: ConditionStatus,
    pub last_transition_time: Time,
    pub reason: String,
    pub message: String,
}

/// The operation the controller is currently performing on an instance.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstanceOperation")]
pub enum ServiceInstanceOperation {
    Provision,
    Update,
    Deprovision,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstanceProvisionStatus")]
pub enum ServiceInstanceProvisionStatus {
    Provisioned,
    NotProvisioned,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstanceDeprovisionStatus")]
pub enum ServiceInstanceDeprovisionStatus {
    NotRequired,
    Required,
    Succeeded,
    Failed,
}

/// The properties of an instance as last sent to, or currently being sent to, the broker.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstancePropertiesState")]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstancePropertiesState {
    pub cluster_service_plan_external_name: String,
    #[serde(rename = "clusterServicePlanExternalID")]
    pub cluster_service_plan_external_id: String,
    /// The parameters with secret values redacted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    /// The sha256 checksum of the parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstanceStatus")]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstanceStatus {
    pub conditions: Vec<ServiceInstanceCondition>,
    /// Whether the broker is currently performing an asynchronous operation on the instance.
    pub async_op_in_progress: bool,
    /// Whether the controller is attempting to deprovision an instance that failed to provision.
    #[serde(default)]
    pub orphan_mitigation_in_progress: bool,
    /// The string a broker returned for the last asynchronous operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_operation: Option<String>,
    /// The URL of a web-based management user interface for the instance.
    #[serde(rename = "dashboardURL", skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_operation: Option<ServiceInstanceOperation>,
    /// The `metadata.generation` that was last fully reconciled.
    pub reconciled_generation: i64,
    /// The `metadata.generation` the current operation was started for.
    #[serde(default)]
    pub observed_generation: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_start_time: Option<Time>,
    /// The properties being sent to the broker by the in-flight operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress_properties: Option<ServiceInstancePropertiesState>,
    /// The properties the broker has last acknowledged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_properties: Option<ServiceInstancePropertiesState>,
    pub provision_status: ServiceInstanceProvisionStatus,
    pub deprovision_status: ServiceInstanceDeprovisionStatus,
}

/// A list of ServiceInstances.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceInstanceList")]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstanceList {
    pub api_version: String,
    pub kind: String,
    pub metadata: ListMeta,
    pub items: Vec<ServiceInstance>,
}
