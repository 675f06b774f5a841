use k8s_openapi::{
    apimachinery::pkg::apis::meta::v1::{ListMeta, Time},
    ByteString,
};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ConditionStatus, LocalObjectReference, ObjectReference};

/// Specifies how a broker's catalog is refreshed by the controller. `Duration` relists
/// periodically according to `relistDuration`, `Manual` only when `relistRequests` changes.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBrokerRelistBehavior")]
pub enum ServiceBrokerRelistBehavior {
    // documented variants would turn the schema into a oneOf
    Duration,
    Manual,
}

/// Fields shared by the cluster-scoped and the namespaced broker specs.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.CommonServiceBrokerSpec")]
#[serde(rename_all = "camelCase")]
pub struct CommonServiceBrokerSpec {
    /// The address used to communicate with the broker using the Open Service Broker API.
    pub url: String,
    /// Disables TLS certificate verification when communicating with this broker.
    /// This is strongly discouraged. You should use the CABundle instead.
    #[serde(default, rename = "insecureSkipTLSVerify")]
    pub insecure_skip_tls_verify: bool,
    /// A PEM encoded CA bundle which will be used to validate a broker's serving certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub ca_bundle: Option<ByteString>,
    /// Specifies the type of relist behavior the catalog should exhibit when relisting
    /// ServiceClasses available from a broker.
    pub relist_behavior: ServiceBrokerRelistBehavior,
    /// The frequency by which a controller will relist the broker when the relist behavior is
    /// Duration, for example `15m`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relist_duration: Option<String>,
    /// A strictly increasing, non-negative integer counter that can be manually incremented by
    /// a user to manually trigger a relist.
    #[serde(default)]
    pub relist_requests: i64,
}

/// ClusterServiceBroker represents an entity that provides ClusterServiceClasses for use in the
/// service catalog.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    kind = "ClusterServiceBroker",
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    schema = "manual"
)]
#[kube(status = "ClusterServiceBrokerStatus")]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServiceBrokerSpec")]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceBrokerSpec {
    #[serde(flatten)]
    pub common: CommonServiceBrokerSpec,
    /// Contains the data that the service catalog should use to authenticate with the broker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_info: Option<ClusterServiceBrokerAuthInfo>,
}

resource_json_schema!(
    ClusterServiceBroker,
    ClusterServiceBrokerSpec,
    ClusterServiceBrokerStatus,
    "ClusterServiceBroker represents an entity that provides ClusterServiceClasses for use in the service catalog."
);

/// ServiceBroker represents an entity that provides ServiceClasses for use in the service
/// catalog of a single namespace.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    kind = "ServiceBroker",
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    namespaced,
    schema = "manual"
)]
#[kube(status = "ServiceBrokerStatus")]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBrokerSpec")]
#[serde(rename_all = "camelCase")]
pub struct ServiceBrokerSpec {
    #[serde(flatten)]
    pub common: CommonServiceBrokerSpec,
    /// Contains the data that the service catalog should use to authenticate with the broker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_info: Option<ServiceBrokerAuthInfo>,
}

resource_json_schema!(
    ServiceBroker,
    ServiceBrokerSpec,
    ServiceBrokerStatus,
    "ServiceBroker represents an entity that provides ServiceClasses for use in the service catalog."
);

/// Authentication methods for a cluster-scoped broker; at most one may be set.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServiceBrokerAuthInfo")]
pub struct ClusterServiceBrokerAuthInfo {
    /// Configuration for basic authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<ClusterBasicAuthConfig>,
    /// Configuration for bearer token authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer: Option<ClusterBearerTokenAuthConfig>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterBasicAuthConfig")]
#[serde(rename_all = "camelCase")]
pub struct ClusterBasicAuthConfig {
    /// A reference to a Secret containing the `username` and `password` keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<ObjectReference>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterBearerTokenAuthConfig")]
#[serde(rename_all = "camelCase")]
pub struct ClusterBearerTokenAuthConfig {
    /// A reference to a Secret containing the `token` key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<ObjectReference>,
}

/// Authentication methods for a namespaced broker; at most one may be set.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBrokerAuthInfo")]
pub struct ServiceBrokerAuthInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<BasicAuthConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer: Option<BearerTokenAuthConfig>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.BasicAuthConfig")]
#[serde(rename_all = "camelCase")]
pub struct BasicAuthConfig {
    /// A reference to a Secret in the broker's namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<LocalObjectReference>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.BearerTokenAuthConfig")]
#[serde(rename_all = "camelCase")]
pub struct BearerTokenAuthConfig {
    /// A reference to a Secret in the broker's namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<LocalObjectReference>,
}

/// The type of a broker condition.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBrokerConditionType")]
pub enum ServiceBrokerConditionType {
    Ready,
    Failed,
}

/// Contains condition information for a broker.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBrokerCondition")]
#[serde(rename_all = "camelCase")]
pub struct ServiceBrokerCondition {
    #[serde(rename = "type")]
    pub type_: ServiceBrokerConditionType,
    pub status: ConditionStatus,
    /// The timestamp corresponding to the last status change of this condition.
    pub last_transition_time: Time,
    /// A brief machine readable explanation for the condition's last transition.
    pub reason: String,
    /// A human readable description of the details of the last transition.
    pub message: String,
}

/// Status fields shared by the cluster-scoped and the namespaced brokers.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.CommonServiceBrokerStatus")]
#[serde(rename_all = "camelCase")]
pub struct CommonServiceBrokerStatus {
    pub conditions: Vec<ServiceBrokerCondition>,
    /// The `metadata.generation` that was last fully reconciled.
    pub reconciled_generation: i64,
    /// The time at which the current operation began.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_start_time: Option<Time>,
    /// The time at which the controller last fetched the broker catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_catalog_retrieval_time: Option<Time>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServiceBrokerStatus")]
pub struct ClusterServiceBrokerStatus {
    #[serde(flatten)]
    pub common: CommonServiceBrokerStatus,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBrokerStatus")]
pub struct ServiceBrokerStatus {
    #[serde(flatten)]
    pub common: CommonServiceBrokerStatus,
}

/// A list of ClusterServiceBrokers.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterServiceBrokerList")]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceBrokerList {
    pub api_version: String,
    pub kind: String,
    pub metadata: ListMeta,
    pub items: Vec<ClusterServiceBroker>,
}

/// A list of ServiceBrokers.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ServiceBrokerList")]
#[serde(rename_all = "camelCase")]
pub struct ServiceBrokerList {
    pub api_version: String,
    pub kind: String,
    pub metadata: ListMeta,
    pub items: Vec<ServiceBroker>,
}
