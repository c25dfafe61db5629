//! Tool registry and parameter schema projection
//!
//! Tools are registered once at startup, in order. The registry is then frozen
//! behind an `Arc` and only read by request handlers. `tools/list` descriptors are
//! projected purely from each tool's declared parameter schema.

use std::{collections::HashMap, fmt, sync::Arc};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::content::ToolResult;
use crate::errors::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl ParameterType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    pub fn new(kind: ParameterType) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    pub fn described(kind: ParameterType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: Some(description.into()),
        }
    }
}

/// Ordered parameter-name to spec mapping. Every declared parameter is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterSchema(IndexMap<String, ParameterSpec>);

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.0.insert(name.into(), spec);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Checks arity and JSON types of `arguments` against the declared parameters.
    pub fn validate(&self, arguments: &Map<String, Value>) -> Result<(), ToolError> {
        for (name, spec) in &self.0 {
            let Some(value) = arguments.get(name) else {
                return Err(ToolError::invalid_arguments(format!(
                    "missing required argument '{name}'"
                )));
            };

            if !spec.kind.accepts(value) {
                return Err(ToolError::invalid_arguments(format!(
                    "argument '{name}' must be of type {}",
                    spec.kind
                )));
            }
        }

        if let Some(unexpected) = arguments.keys().find(|key| !self.0.contains_key(*key)) {
            return Err(ToolError::invalid_arguments(format!(
                "unexpected argument '{unexpected}'"
            )));
        }

        Ok(())
    }
}

/// Decodes validated arguments into a tool's typed parameter struct.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|err| ToolError::invalid_arguments(err.to_string()))
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<ToolResult, ToolError>;
}

#[derive(Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
    pub handler: Arc<dyn ToolHandler>,
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParametersDescriptor {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: ParameterSchema,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: ParametersDescriptor,
}

impl ToolDescriptor {
    pub fn project(definition: &ToolDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            parameters: ParametersDescriptor {
                kind: "object",
                properties: definition.parameters.clone(),
                required: definition.parameters.names().map(str::to_string).collect(),
            },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),
}

#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    tool_index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ParameterSchema,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.tool_index.contains_key(&name) {
            return Err(RegistryError::DuplicateTool(name));
        }

        self.tool_index.insert(name.clone(), self.tools.len());
        self.tools.push(ToolDefinition {
            name,
            description: description.into(),
            parameters,
            handler,
        });
        Ok(())
    }

    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(ToolDescriptor::project).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_index.get(name).map(|&idx| &self.tools[idx])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
