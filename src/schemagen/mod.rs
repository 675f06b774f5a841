//! Schema generation for the fabric8 Java model generator.
//!
//! Type metadata comes from `schemars` derives; this module maps the reflected definitions onto
//! Java packages and emits them in the dialect the Java model generator consumes.

use std::collections::BTreeMap;

use schemars::{gen::SchemaSettings, schema::Schema, JsonSchema};
use serde::Serialize;

use crate::Result;

mod generator;
mod jsonschema;

pub use generator::generate_schema;
pub use jsonschema::{GeneratedSchema, PropertyDescriptor, JSON_SCHEMA_URI};

/// Describes how the types of one source package are labelled in the generated schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Namespace of the schema names of the package, e.g. `io.k8s.servicecatalog.v1beta1`.
    pub source: &'static str,
    /// API group the package's resources are served under.
    pub api_group: &'static str,
    /// Java package the definitions are generated into.
    pub java_package: &'static str,
    /// Prefix of the definition keys.
    pub prefix: &'static str,
}

impl PackageDescriptor {
    pub const fn new(
        source: &'static str,
        api_group: &'static str,
        java_package: &'static str,
        prefix: &'static str,
    ) -> Self {
        Self {
            source,
            api_group,
            java_package,
            prefix,
        }
    }
}

/// Substitutions applied to referenced types during generation, keyed by schema name.
#[derive(Clone, Debug, Default)]
pub struct TypeMap {
    substitutions: BTreeMap<String, Schema>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits every reference to `From` as the schema of `To`.
    pub fn substitute<From: JsonSchema, To: JsonSchema>(mut self) -> Self {
        let mut gen = SchemaSettings::draft07()
            .with(|s| s.inline_subschemas = true)
            .into_generator();
        self.substitutions
            .insert(From::schema_name(), gen.subschema_for::<To>());
        self
    }

    pub fn get(&self, schema_name: &str) -> Option<&Schema> {
        self.substitutions.get(schema_name)
    }

    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}

/// Empty marker type.
#[derive(Clone, Copy, Debug, Default, JsonSchema)]
pub struct Empty {}

/// A schema object whose `resources` section only belongs in validation schemas.
pub trait ValidationResources {
    fn clear_resources(&mut self);
}

impl ValidationResources for GeneratedSchema {
    fn clear_resources(&mut self) {
        self.resources = None;
    }
}

/// Produces the schema object for a root type.
pub trait GenerateSchema {
    type Output: Serialize + ValidationResources;

    fn generate<T: JsonSchema>(
        &self,
        packages: &[PackageDescriptor],
        type_map: &TypeMap,
    ) -> Result<Self::Output>;
}

/// Generates from the `schemars` metadata of the root type.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reflective;

impl GenerateSchema for Reflective {
    type Output = GeneratedSchema;

    fn generate<T: JsonSchema>(
        &self,
        packages: &[PackageDescriptor],
        type_map: &TypeMap,
    ) -> Result<GeneratedSchema> {
        generate_schema::<T>(packages, type_map)
    }
}
