//! Service Catalog `servicecatalog.k8s.io/v1beta1` API types.
//!
//! Schema names are qualified with the API namespace the same way `k8s-openapi` names its own
//! types, so that the schema generator can resolve the package each definition belongs to.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use schemars::{
    gen::SchemaGenerator,
    schema::{InstanceType, Metadata, Schema, SchemaObject},
    JsonSchema,
};
use serde::{Deserialize, Serialize};

pub static API_NAMESPACE: &str = "io.k8s.servicecatalog.v1beta1";

// The top-level kinds are derived with `schema = "manual"`, this fills in the manual part with
// the qualified schema name and the common object layout. Must stay above the submodules.
macro_rules! resource_json_schema {
    ($kind:ident, $spec:ty, $status:ty, $description:literal) => {
        impl schemars::JsonSchema for $kind {
            fn schema_name() -> String {
                concat!("io.k8s.servicecatalog.v1beta1.", stringify!($kind)).to_owned()
            }
            fn schema_id() -> std::borrow::Cow<'static, str> {
                concat!(module_path!(), "::", stringify!($kind)).into()
            }
            fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
                $crate::resources::resource_schema::<$spec, $status>(gen, $description)
            }
        }
    };
}

pub mod servicebindings;
pub mod servicebrokers;
pub mod serviceclasses;
pub mod serviceinstances;
pub mod serviceplans;

pub use servicebindings::*;
pub use servicebrokers::*;
pub use serviceclasses::*;
pub use serviceinstances::*;
pub use serviceplans::*;

const API_VERSION_DESCRIPTION: &str = "APIVersion defines the versioned schema of this representation of an object. Servers should convert recognized schemas to the latest internal value, and may reject unrecognized values.";
const KIND_DESCRIPTION: &str = "Kind is a string value representing the REST resource this object represents. Servers may infer this from the endpoint the client submits requests to.";

/// Object schema shared by every top-level kind: type meta, object metadata, spec and status.
pub(crate) fn resource_schema<Spec: JsonSchema, Status: JsonSchema>(
    gen: &mut SchemaGenerator,
    description: &str,
) -> Schema {
    let mut schema_object = SchemaObject {
        instance_type: Some(InstanceType::Object.into()),
        metadata: Some(Box::new(Metadata {
            description: Some(description.to_owned()),
            ..Default::default()
        })),
        ..Default::default()
    };
    let type_meta = type_meta_schemas(gen);
    let object_validation = schema_object.object();
    object_validation.properties.extend(type_meta);
    object_validation
        .properties
        .insert("metadata".to_owned(), gen.subschema_for::<ObjectMeta>());
    object_validation
        .properties
        .insert("spec".to_owned(), gen.subschema_for::<Spec>());
    object_validation
        .properties
        .insert("status".to_owned(), gen.subschema_for::<Option<Status>>());

    Schema::Object(schema_object)
}

fn type_meta_schemas(gen: &mut SchemaGenerator) -> [(String, Schema); 2] {
    let described = |gen: &mut SchemaGenerator, description: &str| {
        let mut schema = gen.subschema_for::<String>().into_object();
        schema.metadata().description = Some(description.to_owned());
        Schema::Object(schema)
    };
    [
        ("apiVersion".to_owned(), described(gen, API_VERSION_DESCRIPTION)),
        ("kind".to_owned(), described(gen, KIND_DESCRIPTION)),
    ]
}

/// Status of a condition, one of True, False or Unknown.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ConditionStatus")]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

/// A reference to an object in a given namespace.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ObjectReference")]
pub struct ObjectReference {
    /// Namespace of the referent.
    pub namespace: String,
    /// Name of the referent.
    pub name: String,
}

/// A reference to an object in the same namespace as the referrer.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.LocalObjectReference")]
pub struct LocalObjectReference {
    /// Name of the referent.
    pub name: String,
}

/// A reference to a cluster-scoped object.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ClusterObjectReference")]
pub struct ClusterObjectReference {
    /// Name of the referent.
    pub name: String,
}

/// A reference to a key of a Secret in the namespace of the referrer.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.SecretKeyReference")]
pub struct SecretKeyReference {
    /// The name of the secret in the pod's namespace to select from.
    pub name: String,
    /// The key of the secret to select from. Must be a valid secret key.
    pub key: String,
}

/// Represents the source of a set of parameters; only one of its fields may be set.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.ParametersFromSource")]
#[serde(rename_all = "camelCase")]
pub struct ParametersFromSource {
    /// The Secret key to select from. The value must be a JSON object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeyReference>,
}

/// Holds information about the user that last changed a resource's spec.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[schemars(rename = "io.k8s.servicecatalog.v1beta1.UserInfo")]
pub struct UserInfo {
    pub username: String,
    pub uid: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, Vec<String>>,
}
