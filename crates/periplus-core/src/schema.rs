//! A small validation-schema vocabulary.
//!
//! [`ValidationSchema`] is the schema language route authors use to declare
//! request and response shapes. It knows how to compile itself into a
//! structural [`Schema`]; runtime validation of payloads is left to the host
//! framework.
//!
//! # Example
//!
//! ```
//! use periplus_core::{CompileSchema, ValidationSchema};
//!
//! let user = ValidationSchema::object(vec![
//!     ("id", ValidationSchema::string().format("uuid").required()),
//!     ("name", ValidationSchema::string().min_length(1).required()),
//!     ("age", ValidationSchema::integer().minimum(0)),
//! ]);
//!
//! let compiled = user.compile();
//! assert_eq!(compiled.required, vec!["id", "name"]);
//! assert!(compiled.properties.contains_key("age"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::structural::{CompileSchema, Schema};

/// The shape-specific part of a [`ValidationSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaKind {
    /// String type.
    String {
        /// Minimum length.
        min_length: Option<usize>,
        /// Maximum length.
        max_length: Option<usize>,
        /// Regex pattern.
        pattern: Option<String>,
        /// Format hint (e.g., "email", "uuid").
        format: Option<String>,
    },
    /// Integer type.
    Integer {
        /// Minimum value.
        minimum: Option<i64>,
        /// Maximum value.
        maximum: Option<i64>,
    },
    /// Number (float) type.
    Number {
        /// Minimum value.
        minimum: Option<f64>,
        /// Maximum value.
        maximum: Option<f64>,
    },
    /// Boolean type.
    Boolean,
    /// Array type.
    Array {
        /// Schema for array items.
        items: Box<ValidationSchema>,
        /// Minimum number of items.
        min_items: Option<usize>,
        /// Maximum number of items.
        max_items: Option<usize>,
    },
    /// Object type. Property order is preserved.
    Object {
        /// Properties and their schemas.
        properties: IndexMap<String, ValidationSchema>,
    },
    /// String enumeration.
    Enum {
        /// Allowed values.
        values: Vec<String>,
    },
    /// Any type (accepts anything).
    Any,
    /// Null type.
    Null,
}

/// A declarative validation schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSchema {
    /// The shape of the value.
    #[serde(flatten)]
    pub kind: SchemaKind,
    /// Whether the field holding this value must be present.
    #[serde(default)]
    pub required: bool,
    /// Whether `null` is accepted in place of the value.
    #[serde(default)]
    pub nullable: bool,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ValidationSchema {
    fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            required: false,
            nullable: false,
            description: None,
        }
    }

    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaKind::String {
            min_length: None,
            max_length: None,
            pattern: None,
            format: None,
        })
    }

    /// Creates an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer {
            minimum: None,
            maximum: None,
        })
    }

    /// Creates a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaKind::Number {
            minimum: None,
            maximum: None,
        })
    }

    /// Creates a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    /// Creates an array schema.
    #[must_use]
    pub fn array(items: ValidationSchema) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        })
    }

    /// Creates an object schema from a list of property definitions.
    ///
    /// A property is listed as required in the compiled schema when its own
    /// schema was marked with [`required`](Self::required).
    #[must_use]
    pub fn object(properties: Vec<(&str, ValidationSchema)>) -> Self {
        let properties = properties
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect();
        Self::new(SchemaKind::Object { properties })
    }

    /// Creates a string enumeration schema.
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Creates an "any" schema that accepts any value.
    #[must_use]
    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    /// Creates a null schema.
    #[must_use]
    pub fn null() -> Self {
        Self::new(SchemaKind::Null)
    }

    /// Marks this schema as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks this schema as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Accepts `null` in addition to the declared type.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the minimum length for string schemas.
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        if let SchemaKind::String { min_length, .. } = &mut self.kind {
            *min_length = Some(len);
        }
        self
    }

    /// Sets the maximum length for string schemas.
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        if let SchemaKind::String { max_length, .. } = &mut self.kind {
            *max_length = Some(len);
        }
        self
    }

    /// Sets the pattern for string schemas.
    #[must_use]
    pub fn pattern(mut self, regex: impl Into<String>) -> Self {
        if let SchemaKind::String { pattern, .. } = &mut self.kind {
            *pattern = Some(regex.into());
        }
        self
    }

    /// Sets the format hint for string schemas.
    #[must_use]
    pub fn format(mut self, hint: impl Into<String>) -> Self {
        if let SchemaKind::String { format, .. } = &mut self.kind {
            *format = Some(hint.into());
        }
        self
    }

    /// Sets the minimum value for integer schemas.
    #[must_use]
    pub fn minimum(mut self, min: i64) -> Self {
        if let SchemaKind::Integer { minimum, .. } = &mut self.kind {
            *minimum = Some(min);
        }
        self
    }

    /// Sets the maximum value for integer schemas.
    #[must_use]
    pub fn maximum(mut self, max: i64) -> Self {
        if let SchemaKind::Integer { maximum, .. } = &mut self.kind {
            *maximum = Some(max);
        }
        self
    }

    /// Sets the bounds for number schemas.
    #[must_use]
    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if let SchemaKind::Number { minimum, maximum } = &mut self.kind {
            *minimum = min;
            *maximum = max;
        }
        self
    }

    /// Sets the minimum items for array schemas.
    #[must_use]
    pub fn min_items(mut self, min: usize) -> Self {
        if let SchemaKind::Array { min_items, .. } = &mut self.kind {
            *min_items = Some(min);
        }
        self
    }

    /// Sets the maximum items for array schemas.
    #[must_use]
    pub fn max_items(mut self, max: usize) -> Self {
        if let SchemaKind::Array { max_items, .. } = &mut self.kind {
            *max_items = Some(max);
        }
        self
    }

    fn compile_kind(&self) -> Schema {
        match &self.kind {
            SchemaKind::String {
                min_length,
                max_length,
                pattern,
                format,
            } => {
                let mut result = Schema::string();
                result.min_length = min_length.map(|v| v as u64);
                result.max_length = max_length.map(|v| v as u64);
                result.pattern = pattern.clone();
                result.format = format.clone();
                result
            }
            SchemaKind::Integer { minimum, maximum } => {
                let mut result = Schema::integer();
                result.minimum = minimum.map(|v| v as f64);
                result.maximum = maximum.map(|v| v as f64);
                result
            }
            SchemaKind::Number { minimum, maximum } => {
                let mut result = Schema::number();
                result.minimum = *minimum;
                result.maximum = *maximum;
                result
            }
            SchemaKind::Boolean => Schema::boolean(),
            SchemaKind::Array {
                items,
                min_items,
                max_items,
            } => {
                let mut result = Schema::array(items.compile());
                result.min_items = min_items.map(|v| v as u64);
                result.max_items = max_items.map(|v| v as u64);
                result
            }
            SchemaKind::Object { properties } => {
                let mut result = Schema::object();
                for (name, property) in properties {
                    if property.required {
                        result.required.push(name.clone());
                    }
                    result.properties.insert(name.clone(), property.compile());
                }
                result
            }
            SchemaKind::Enum { values } => {
                let mut result = Schema::string();
                result.enum_values = values
                    .iter()
                    .map(|v| serde_json::Value::String(v.clone()))
                    .collect();
                result
            }
            SchemaKind::Any => Schema::default(),
            SchemaKind::Null => Schema::null(),
        }
    }
}

impl CompileSchema for ValidationSchema {
    fn compile(&self) -> Schema {
        let mut schema = self.compile_kind();
        schema.description.clone_from(&self.description);
        schema.nullable = self.nullable;
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural::SchemaType;

    #[test]
    fn test_string_compiles_constraints() {
        let schema = ValidationSchema::string()
            .min_length(2)
            .max_length(10)
            .pattern("^[a-z]+$")
            .format("slug")
            .compile();

        assert_eq!(schema.schema_type, Some(SchemaType::String));
        assert_eq!(schema.min_length, Some(2));
        assert_eq!(schema.max_length, Some(10));
        assert_eq!(schema.pattern.as_deref(), Some("^[a-z]+$"));
        assert_eq!(schema.format.as_deref(), Some("slug"));
    }

    #[test]
    fn test_integer_bounds_become_numbers() {
        let schema = ValidationSchema::integer().minimum(1).maximum(100).compile();
        assert_eq!(schema.schema_type, Some(SchemaType::Integer));
        assert_eq!(schema.minimum, Some(1.0));
        assert_eq!(schema.maximum, Some(100.0));
    }

    #[test]
    fn test_constraint_setters_ignore_other_kinds() {
        let schema = ValidationSchema::boolean().min_length(3).minimum(4);
        assert_eq!(schema.kind, SchemaKind::Boolean);
    }

    #[test]
    fn test_object_required_list_follows_property_markers() {
        let schema = ValidationSchema::object(vec![
            ("id", ValidationSchema::string().required()),
            ("nickname", ValidationSchema::string()),
            ("email", ValidationSchema::string().format("email").required()),
        ])
        .compile();

        assert_eq!(schema.required, vec!["id", "email"]);
        let names: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "nickname", "email"]);
    }

    #[test]
    fn test_nested_array_of_objects() {
        let schema = ValidationSchema::array(ValidationSchema::object(vec![(
            "sku",
            ValidationSchema::string().required(),
        )]))
        .min_items(1)
        .compile();

        assert_eq!(schema.schema_type, Some(SchemaType::Array));
        assert_eq!(schema.min_items, Some(1));
        let items = schema.items.expect("items");
        assert!(items.is_object_with_properties());
        assert_eq!(items.required, vec!["sku"]);
    }

    #[test]
    fn test_enum_compiles_to_string_values() {
        let schema = ValidationSchema::enumeration(["asc", "desc"]).compile();
        assert_eq!(schema.schema_type, Some(SchemaType::String));
        assert_eq!(
            schema.enum_values,
            vec![serde_json::json!("asc"), serde_json::json!("desc")]
        );
    }

    #[test]
    fn test_any_has_no_type() {
        let schema = ValidationSchema::any().compile();
        assert_eq!(schema.schema_type, None);
        assert_eq!(schema, Schema::default());
    }

    #[test]
    fn test_description_and_nullable_carry_over() {
        let schema = ValidationSchema::string()
            .describe("Display name")
            .nullable()
            .compile();
        assert_eq!(schema.description.as_deref(), Some("Display name"));
        assert!(schema.nullable);
    }

    #[test]
    fn test_schema_serialization() {
        let schema = ValidationSchema::integer().minimum(0).required();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "integer");
        assert_eq!(json["required"], true);

        let back: ValidationSchema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }
}
