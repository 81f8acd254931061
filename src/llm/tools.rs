//! Tool definitions offered to the model by the recommendation flow.

use super::types::Tool;

/// Name of the structured-output tool used for plant recommendations.
pub const RECOMMEND_PLANTS: &str = "recommend_plants";

/// The single tool the AI herbalist may call to return its suggestions.
#[must_use]
pub fn recommendation_tools() -> Vec<Tool> {
    vec![Tool {
        name: RECOMMEND_PLANTS.into(),
        description: "Return herbal plant recommendations for the user's goals. \
                      Prefer plants from the garden catalog."
            .into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "One or two sentences framing the suggestions"
                },
                "recommendations": {
                    "type": "array",
                    "description": "Suggested plants, most relevant first",
                    "items": {
                        "type": "object",
                        "properties": {
                            "plantName": { "type": "string", "description": "Common name of the plant" },
                            "scientificName": { "type": "string", "description": "Botanical name, if known" },
                            "reason": { "type": "string", "description": "Why this plant fits the user's goals" }
                        },
                        "required": ["plantName", "reason"]
                    }
                }
            },
            "required": ["recommendations"]
        }),
    }]
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
