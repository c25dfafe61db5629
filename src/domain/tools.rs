//! Tools exposed via Model Context Protocol
//!
//! Chuck Norris jokes are fetched through a `JokeProvider`; the dad joke and the
//! addition tool are computed locally. `build_registry` registers them in their
//! advertised order.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::content::ToolResult;
use crate::domain::registry::{
    parse_arguments, ParameterSchema, ParameterSpec, ParameterType, RegistryError, ToolHandler,
    ToolRegistry,
};
use crate::errors::ToolError;
use crate::joke_client::JokeProvider;

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct DadJokeParams {
    #[serde(rename = "dadName")]
    pub dad_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddParams {
    pub a: f64,
    pub b: f64,
}

pub struct ChuckJokeTool {
    provider: Arc<dyn JokeProvider>,
}

#[async_trait]
impl ToolHandler for ChuckJokeTool {
    async fn invoke(&self, _arguments: Map<String, Value>) -> Result<ToolResult, ToolError> {
        let joke = self.provider.random_joke(None).await?;
        Ok(ToolResult::text(joke))
    }
}

pub struct ChuckJokeByCategoryTool {
    provider: Arc<dyn JokeProvider>,
}

#[async_trait]
impl ToolHandler for ChuckJokeByCategoryTool {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<ToolResult, ToolError> {
        let params: CategoryParams = parse_arguments(arguments)?;
        let joke = self.provider.random_joke(Some(&params.category)).await?;
        Ok(ToolResult::text(joke))
    }
}

pub struct ChuckCategoriesTool {
    provider: Arc<dyn JokeProvider>,
}

#[async_trait]
impl ToolHandler for ChuckCategoriesTool {
    async fn invoke(&self, _arguments: Map<String, Value>) -> Result<ToolResult, ToolError> {
        let categories = self.provider.categories().await?;
        Ok(ToolResult::text(categories.join(", ")))
    }
}

pub struct DadJokeTool;

pub fn dad_joke(dad_name: &str) -> String {
    format!(
        "Why did {dad_name} bring a ladder to the bar? Because he heard the drinks were on the house!"
    )
}

#[async_trait]
impl ToolHandler for DadJokeTool {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<ToolResult, ToolError> {
        let params: DadJokeParams = parse_arguments(arguments)?;
        Ok(ToolResult::text(dad_joke(&params.dad_name)))
    }
}

pub struct AddTool;

#[async_trait]
impl ToolHandler for AddTool {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<ToolResult, ToolError> {
        let params: AddParams = parse_arguments(arguments)?;
        let sum = params.a + params.b;
        if !sum.is_finite() {
            return Err(ToolError::failed("sum is not a finite number"));
        }
        Ok(ToolResult::text(format!("The sum of the numbers is: {sum}")))
    }
}

pub fn build_registry(provider: Arc<dyn JokeProvider>) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();

    registry.register(
        "get-chuck-joke",
        "Get a random Chuck Norris joke",
        ParameterSchema::new(),
        Arc::new(ChuckJokeTool {
            provider: provider.clone(),
        }),
    )?;
    registry.register(
        "get-chuck-joke-by-category",
        "Get a random Chuck Norris joke by category",
        ParameterSchema::new().with(
            "category",
            ParameterSpec::described(ParameterType::String, "Category of the Chuck Norris joke"),
        ),
        Arc::new(ChuckJokeByCategoryTool {
            provider: provider.clone(),
        }),
    )?;
    registry.register(
        "get-chuck-categories",
        "Get all available categories for Chuck Norris jokes",
        ParameterSchema::new(),
        Arc::new(ChuckCategoriesTool { provider }),
    )?;
    registry.register(
        "get-dad-joke",
        "Get a personalized dad joke based on the user's dad's name",
        ParameterSchema::new().with(
            "dadName",
            ParameterSpec::described(ParameterType::String, "Name of the user's dad"),
        ),
        Arc::new(DadJokeTool),
    )?;
    registry.register(
        "add",
        "Addition Tool",
        ParameterSchema::new()
            .with(
                "a",
                ParameterSpec::described(ParameterType::Number, "First number to add"),
            )
            .with(
                "b",
                ParameterSpec::described(ParameterType::Number, "Second number to add"),
            ),
        Arc::new(AddTool),
    )?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::content::ContentItem;

    struct StaticProvider;

    #[async_trait]
    impl JokeProvider for StaticProvider {
        async fn random_joke(&self, category: Option<&str>) -> Result<String, ToolError> {
            Ok(match category {
                Some(category) => format!("a {category} joke"),
                None => "a random joke".to_string(),
            })
        }

        async fn categories(&self) -> Result<Vec<String>, ToolError> {
            Ok(vec!["animal".to_string(), "dev".to_string()])
        }
    }

    fn arguments(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object arguments")
    }

    fn text_of(result: ToolResult) -> String {
        match result.content.into_iter().next() {
            Some(ContentItem::Text { text }) => text,
            None => panic!("empty content"),
        }
    }

    #[test]
    fn registers_tools_in_advertised_order() {
        let registry = build_registry(Arc::new(StaticProvider)).expect("registry builds");
        let names = registry
            .list()
            .into_iter()
            .map(|tool| tool.name)
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                "get-chuck-joke",
                "get-chuck-joke-by-category",
                "get-chuck-categories",
                "get-dad-joke",
                "add",
            ]
        );
    }

    #[tokio::test]
    async fn dad_joke_uses_given_name() {
        let result = DadJokeTool
            .invoke(arguments(json!({"dadName": "Bob"})))
            .await
            .expect("dad joke");
        assert_eq!(
            text_of(result),
            "Why did Bob bring a ladder to the bar? Because he heard the drinks were on the house!"
        );
    }

    #[tokio::test]
    async fn add_formats_whole_and_fractional_sums() {
        let whole = AddTool
            .invoke(arguments(json!({"a": 1, "b": 2})))
            .await
            .expect("sum");
        assert_eq!(text_of(whole), "The sum of the numbers is: 3");

        let fractional = AddTool
            .invoke(arguments(json!({"a": 1.5, "b": 2})))
            .await
            .expect("sum");
        assert_eq!(text_of(fractional), "The sum of the numbers is: 3.5");
    }

    #[tokio::test]
    async fn add_renders_large_sums_in_positional_notation() {
        let large = AddTool
            .invoke(arguments(json!({"a": 1e21, "b": 0})))
            .await
            .expect("sum");
        assert_eq!(
            text_of(large),
            "The sum of the numbers is: 1000000000000000000000"
        );
    }

    #[tokio::test]
    async fn add_rejects_overflowing_sum() {
        let err = AddTool
            .invoke(arguments(json!({"a": f64::MAX, "b": f64::MAX})))
            .await
            .expect_err("overflow");
        assert!(matches!(err, ToolError::Failed(_)));
    }

    #[tokio::test]
    async fn category_tool_forwards_category() {
        let tool = ChuckJokeByCategoryTool {
            provider: Arc::new(StaticProvider),
        };
        let result = tool
            .invoke(arguments(json!({"category": "dev"})))
            .await
            .expect("joke");
        assert_eq!(text_of(result), "a dev joke");
    }

    #[tokio::test]
    async fn categories_are_joined() {
        let tool = ChuckCategoriesTool {
            provider: Arc::new(StaticProvider),
        };
        let result = tool.invoke(Map::new()).await.expect("categories");
        assert_eq!(text_of(result), "animal, dev");
    }

    #[tokio::test]
    async fn typed_params_reject_missing_fields() {
        let err = DadJokeTool
            .invoke(Map::new())
            .await
            .expect_err("missing dadName");
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
