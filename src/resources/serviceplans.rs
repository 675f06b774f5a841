use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ClusterObjectReference;

/// Fields shared by service plans regardless of their scope.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.CommonServicePlanSpec")]
#[serde(rename_all = "camelCase")]
pub struct CommonServicePlanSpec {
    /// The name of this plan, as known to the broker.
    pub external_name: String,
    /// The identity of this plan, as known to the broker.
    #[serde(rename = "externalID")]
    pub external_id: String,
    /// A short string describing the plan.
    pub description: String,
    /// Overrides the bindable flag of the service class for this plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindable: Option<bool>,
    /// Whether a charge is made for instances of this plan.
    pub free: bool,
    /// Broker-defined metadata about the plan, stored as free-form JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_metadata: Option<serde_json::Value>,
    /// JSON schema of the parameters accepted when provisioning an instance of this plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_create_parameter_schema: Option<serde_json::Value>,
    /// JSON schema of the parameters accepted when updating an instance of this plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_update_parameter_schema: Option<serde_json::Value>,
    /// JSON schema of the parameters accepted when binding to an instance of this plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_binding_create_parameter_schema: Option<serde_json::Value>,
}

/// ClusterServicePlan represents a tier of a ClusterServiceClass.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    kind = "ClusterServicePlan",
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    schema = "manual"
)]
#[kube(status = "ClusterServicePlanStatus")]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServicePlanSpec")]
#[serde(rename_all = "camelCase")]
pub struct ClusterServicePlanSpec {
    #[serde(flatten)]
    pub common: CommonServicePlanSpec,
    /// The name of the ClusterServiceBroker that offers this plan.
    pub cluster_service_broker_name: String,
    /// A reference to the ClusterServiceClass this plan belongs to.
    pub cluster_service_class_ref: ClusterObjectReference,
}

resource_json_schema!(
    ClusterServicePlan,
    ClusterServicePlanSpec,
    ClusterServicePlanStatus,
    "ClusterServicePlan represents a tier of a ClusterServiceClass."
);

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.CommonServicePlanStatus")]
#[serde(rename_all = "camelCase")]
pub struct CommonServicePlanStatus {
    /// Set to true when the broker removed the plan from its catalog.
    pub removed_from_broker_catalog: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServicePlanStatus")]
pub struct ClusterServicePlanStatus {
    #[serde(flatten)]
    pub common: CommonServicePlanStatus,
}

/// A list of ClusterServicePlans.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServicePlanList")]
#[serde(rename_all = "camelCase")]
pub struct ClusterServicePlanList {
    pub api_version: String,
    pub kind: String,
    pub metadata: ListMeta,
    pub items: Vec<ClusterServicePlan>,
}
