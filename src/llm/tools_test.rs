use super::*;

#[test]
fn single_recommend_tool() {
    let tools = recommendation_tools();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, RECOMMEND_PLANTS);
}

#[test]
fn schema_requires_recommendations() {
    let tools = recommendation_tools();
    let schema = &tools[0].input_schema;
    assert_eq!(schema["type"], "object");
    let required: Vec<&str> = schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(required, vec!["recommendations"]);
}

#[test]
fn item_schema_requires_name_and_reason() {
    let tools = recommendation_tools();
    let item = &tools[0].input_schema["properties"]["recommendations"]["items"];
    assert!(item["properties"].get("plantName").is_some());
    assert!(item["properties"].get("scientificName").is_some());
    assert_eq!(item["required"], serde_json::json!(["plantName", "reason"]));
}
