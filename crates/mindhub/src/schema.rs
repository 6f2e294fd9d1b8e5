//! Abstract description of the JSON shape a caller expects back from a model,
//! and its translation into the JSON Schema dialect the provider accepts.
//!
//! Every object node is closed on translation: `additionalProperties` is
//! forced to `false` and all declared fields are required. Strict structured
//! output on the provider side rejects anything else, and the engine validates
//! responses against the same wire form.

use jsonschema::JSONSchema;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Named fields in declaration order
    Object(Vec<(String, Schema)>),
    Array(Box<Schema>),
    /// Any one of the member schemas, normally literals
    Union(Vec<Schema>),
    Literal(String),
    /// A number within the inclusive bounds, when given
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    String,
    Boolean,
}

impl Schema {
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Schema::Object(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    /// A union with one string literal per value
    pub fn literals<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Union(
            values
                .into_iter()
                .map(|value| Schema::Literal(value.into()))
                .collect(),
        )
    }

    pub fn number() -> Self {
        Schema::Number {
            minimum: None,
            maximum: None,
        }
    }

    pub fn number_range(minimum: f64, maximum: f64) -> Self {
        Schema::Number {
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    /// Translate into the provider's JSON Schema dialect
    pub fn to_wire(&self) -> Value {
        match self {
            Schema::Object(fields) => {
                let mut properties = Map::new();
                for (name, schema) in fields {
                    properties.insert(name.clone(), schema.to_wire());
                }
                let required: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                    "additionalProperties": false,
                })
            }
            Schema::Array(items) => json!({
                "type": "array",
                "items": items.to_wire(),
            }),
            Schema::Union(members) => {
                let any_of: Vec<Value> = members.iter().map(Schema::to_wire).collect();
                json!({ "anyOf": any_of })
            }
            Schema::Literal(value) => json!({
                "type": "string",
                "const": value,
            }),
            Schema::Number { minimum, maximum } => {
                let mut wire = json!({ "type": "number" });
                if let Some(minimum) = minimum {
                    wire["minimum"] = json!(minimum);
                }
                if let Some(maximum) = maximum {
                    wire["maximum"] = json!(maximum);
                }
                wire
            }
            Schema::String => json!({ "type": "string" }),
            Schema::Boolean => json!({ "type": "boolean" }),
        }
    }

    /// Human-readable form embedded in prompts for models without native
    /// schema support
    pub fn describe(&self) -> String {
        format!("{:#}", self.to_wire())
    }

    /// Check a parsed response against the wire form of this schema
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        let wire = self.to_wire();
        let compiled = JSONSchema::compile(&wire).map_err(|e| e.to_string())?;
        compiled.validate(value).map_err(|errors| {
            errors
                .map(|error| error.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}
