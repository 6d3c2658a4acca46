//! Parameter schema builder
//!
//! Produces the JSON-schema document a tool returns from `Tool::schema()`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Definition of a tool for LLM function calling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (unique identifier)
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for parameters
    pub parameters: ToolParameters,
}

/// Parameters schema for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameters {
    /// Type (always "object")
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Properties (parameter definitions)
    pub properties: Value,

    /// Required parameters
    #[serde(default)]
    pub required: Vec<String>,
}

impl ToolDef {
    /// Create a new tool definition builder
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> ToolDefBuilder {
        ToolDefBuilder::new(name, description)
    }

    /// The parameter schema as a JSON value
    pub fn schema(&self) -> Value {
        json!({
            "type": self.parameters.schema_type,
            "properties": self.parameters.properties,
            "required": self.parameters.required,
        })
    }
}

/// Builder for ToolDef
pub struct ToolDefBuilder {
    name: String,
    description: String,
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl ToolDefBuilder {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            properties: Map::new(),
            required: vec![],
        }
    }

    fn param(mut self, name: impl Into<String>, schema: Value, required: bool) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), schema);
        if required {
            self.required.push(name);
        }
        self
    }

    /// Add a string parameter
    pub fn string_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let schema = json!({
            "type": "string",
            "description": description.into()
        });
        self.param(name, schema, required)
    }

    /// Add an integer parameter with an inclusive lower bound
    pub fn integer_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        minimum: i64,
        required: bool,
    ) -> Self {
        let schema = json!({
            "type": "integer",
            "description": description.into(),
            "minimum": minimum
        });
        self.param(name, schema, required)
    }

    /// Add a boolean parameter
    pub fn boolean_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let schema = json!({
            "type": "boolean",
            "description": description.into()
        });
        self.param(name, schema, required)
    }

    /// Add an enum parameter
    pub fn enum_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let schema = json!({
            "type": "string",
            "description": description.into(),
            "enum": values
        });
        self.param(name, schema, required)
    }

    /// Add an array-of-strings parameter
    pub fn string_array_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        min_items: usize,
        required: bool,
    ) -> Self {
        let schema = json!({
            "type": "array",
            "description": description.into(),
            "items": { "type": "string" },
            "minItems": min_items
        });
        self.param(name, schema, required)
    }

    /// Build the ToolDef
    pub fn build(self) -> ToolDef {
        ToolDef {
            name: self.name,
            description: self.description,
            parameters: ToolParameters {
                schema_type: "object".to_string(),
                properties: Value::Object(self.properties),
                required: self.required,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_schema() {
        let def = ToolDef::builder("grep", "search lines")
            .string_param("pattern", "regex", true)
            .string_array_param("files", "files", 1, true)
            .integer_param("max_matches", "limit", 0, false)
            .enum_param("output_format", "format", &["text", "json"], false)
            .boolean_param("count", "count only", false)
            .build();

        let schema = def.schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["pattern", "files"]));
        assert_eq!(schema["properties"]["max_matches"]["minimum"], 0);
        assert_eq!(schema["properties"]["files"]["minItems"], 1);
        assert_eq!(
            schema["properties"]["output_format"]["enum"],
            json!(["text", "json"])
        );
    }
}
