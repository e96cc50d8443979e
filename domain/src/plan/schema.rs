//! Provider-facing JSON schema for plan documents.

/// JSON Schema the model planner embeds in its system prompt. The shape
/// (a `steps` array of 1 to 5 `{description, toolName, parameters}` objects)
/// is enforced by the provider through this document, not re-checked
/// structurally on our side beyond parsing and validation.
pub const PLAN_SCHEMA: &str = r#"{
  "type": "object",
  "required": ["steps"],
  "properties": {
    "steps": {
      "type": "array",
      "minItems": 1,
      "maxItems": 5,
      "items": {
        "type": "object",
        "required": ["description", "toolName", "parameters"],
        "properties": {
          "description": { "type": "string" },
          "toolName": { "type": "string" },
          "parameters": {
            "type": "object",
            "additionalProperties": true
          }
        }
      }
    }
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(PLAN_SCHEMA).unwrap();
        assert_eq!(value["properties"]["steps"]["minItems"], 1);
        assert_eq!(value["properties"]["steps"]["maxItems"], 5);
    }
}
