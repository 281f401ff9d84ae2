use serde::Serialize;
use serde_json::{json, Value};

use crate::core::ports::DynError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GoogleRequest {
    contents: Vec<GoogleContent>,
    #[serde(rename = "generationConfig")]
    generation_config: Value,
}

#[derive(Debug, Serialize)]
struct GoogleContent {
    role: String,
    parts: Vec<Value>,
}

fn build_request(prompt: &str, response_schema: &Value) -> GoogleRequest {
    GoogleRequest {
        contents: vec![GoogleContent {
            role: "user".to_string(),
            parts: vec![json!({ "text": prompt })],
        }],
        generation_config: json!({
            "responseMimeType": "application/json",
            "responseSchema": response_schema,
        }),
    }
}

/// Concatenates the non-thought text parts of the first candidate.
fn extract_text(parsed: &Value) -> Option<String> {
    let parts = parsed
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())?;

    let text: String = parts
        .iter()
        .filter(|part| {
            !part
                .get("thought")
                .and_then(|t| t.as_bool())
                .unwrap_or(false)
        })
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    (!text.trim().is_empty()).then_some(text)
}

/// One `generateContent` call with a JSON response schema. Returns the model's JSON text.
pub async fn generate_json(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
    response_schema: &Value,
) -> Result<String, DynError> {
    let url = format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    );
    let request_body = build_request(prompt, response_schema);

    log::debug!(
        "Google request: {}",
        serde_json::to_string_pretty(&request_body).unwrap_or_default()
    );

    let response = if api_key.trim().starts_with("AIza") {
        let url_with_key = format!("{url}?key={}", api_key.trim());
        client
            .post(&url_with_key)
            .json(&request_body)
            .send()
            .await?
    } else {
        client
            .post(&url)
            .bearer_auth(api_key.trim())
            .json(&request_body)
            .send()
            .await?
    };

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("Google API error ({}): {}", status, body).into());
    }

    let parsed: Value = response.json().await?;
    if let Some(error) = parsed.get("error") {
        let msg = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(format!("Google API error: {}", msg).into());
    }

    extract_text(&parsed).ok_or_else(|| "Google API returned no text".into())
}

#[cfg(test)]
mod tests {
    use super::{build_request, extract_text};
    use serde_json::json;

    #[test]
    fn request_carries_prompt_and_json_schema() {
        let schema = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
        let body = serde_json::to_value(build_request("露营", &schema)).expect("serialize");

        assert_eq!(body.pointer("/contents/0/role"), Some(&json!("user")));
        assert_eq!(body.pointer("/contents/0/parts/0/text"), Some(&json!("露营")));
        assert_eq!(
            body.pointer("/generationConfig/responseMimeType"),
            Some(&json!("application/json"))
        );
        assert_eq!(body.pointer("/generationConfig/responseSchema"), Some(&schema));
    }

    #[test]
    fn extracts_text_and_skips_thought_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "thinking...", "thought": true },
                        { "text": "[\"帐篷\"," },
                        { "text": "\"睡袋\"]" }
                    ]
                }
            }]
        });

        assert_eq!(
            extract_text(&response).as_deref(),
            Some("[\"帐篷\",\"睡袋\"]")
        );
    }

    #[test]
    fn missing_candidates_yield_none() {
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        assert_eq!(
            extract_text(&json!({ "candidates": [{ "content": { "parts": [{ "text": " " }] } }] })),
            None
        );
    }
}
