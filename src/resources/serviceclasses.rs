use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fields shared by service classes regardless of their scope.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.CommonServiceClassSpec")]
#[serde(rename_all = "camelCase")]
pub struct CommonServiceClassSpec {
    /// The name of this service class, as known to the broker.
    pub external_name: String,
    /// The identity of this class, as known to the broker.
    #[serde(rename = "externalID")]
    pub external_id: String,
    /// A short string describing the service class.
    pub description: String,
    /// Whether service instances of this class can be bound to applications by default.
    pub bindable: bool,
    /// Whether the broker supports fetching a binding after it has been created.
    #[serde(default)]
    pub binding_retrievable: bool,
    /// Whether instances of this class can change their plan after creation.
    #[serde(default)]
    pub plan_updatable: bool,
    /// Broker-defined metadata about the class, stored as free-form JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_metadata: Option<serde_json::Value>,
    /// Strings the broker has provided to categorize the service class.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Kubernetes-specific attributes the service class depends on, such as `route_forwarding`.
    #[serde(default)]
    pub requires: Vec<String>,
}

/// ClusterServiceClass represents an offering in the service catalog.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    kind = "ClusterServiceClass",
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    schema = "manual"
)]
#[kube(status = "ClusterServiceClassStatus")]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServiceClassSpec")]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceClassSpec {
    #[serde(flatten)]
    pub common: CommonServiceClassSpec,
    /// The name of the ClusterServiceBroker that offers this class.
    pub cluster_service_broker_name: String,
}

resource_json_schema!(
    ClusterServiceClass,
    ClusterServiceClassSpec,
    ClusterServiceClassStatus,
    "ClusterServiceClass represents an offering in the service catalog."
);

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.CommonServiceClassStatus")]
#[serde(rename_all = "camelCase")]
pub struct CommonServiceClassStatus {
    /// Set to true when the broker removed the class from its catalog.
    pub removed_from_broker_catalog: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServiceClassStatus")]
pub struct ClusterServiceClassStatus {
    #[serde(flatten)]
    pub common: CommonServiceClassStatus,
}

/// A list of ClusterServiceClasses.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServiceClassList")]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceClassList {
    pub api_version: String,
    pub kind: String,
    pub metadata: ListMeta,
    pub items: Vec<ClusterServiceClass>,
}
