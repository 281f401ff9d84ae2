use serde_json::{json, Value};
use std::sync::Arc;

use crate::core::model::ItemAttribute;
use crate::core::ports::llm::{DynError, GenerationPort, GenerationRequest};

fn attribute_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "key": { "type": "STRING" },
                "value": { "type": "STRING" }
            },
            "required": ["key", "value"]
        }
    })
}

fn terms_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" }
    })
}

fn attribute_prompt(name: &str, description: &str, language: &str) -> String {
    format!(
        "Generate a list of useful inventory attributes for this item: name \"{name}\", description \"{description}\".\n\
         Return key/value pairs only, describing its physical properties, type or purpose.\n\
         For example: \"voltage\" for a battery, \"author\" for a book, \"size\" for clothing.\n\
         Answer in {language}. Limit the list to the 3-5 most important attributes."
    )
}

fn search_prompt(query: &str, language: &str) -> String {
    format!(
        "A user is searching a household inventory. Query: \"{query}\".\n\
         Return a JSON list of 3-5 synonyms, related categories or specific item types that could match it.\n\
         Answer in {language}.\n\
         Example: \"camping\" -> [\"tent\", \"sleeping bag\", \"camp lantern\", \"outdoor gear\"]"
    )
}

fn parse_attributes(text: &str) -> Result<Vec<ItemAttribute>, serde_json::Error> {
    let attributes: Vec<ItemAttribute> = serde_json::from_str(text)?;
    Ok(attributes
        .into_iter()
        .map(|attribute| ItemAttribute::new(attribute.key.trim(), attribute.value.trim()))
        .filter(|attribute| !attribute.key.is_empty())
        .collect())
}

fn parse_terms(text: &str) -> Result<Vec<String>, serde_json::Error> {
    let terms: Vec<String> = serde_json::from_str(text)?;
    let mut unique: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.trim();
        if !term.is_empty() && !unique.iter().any(|seen| seen == term) {
            unique.push(term.to_string());
        }
    }
    Ok(unique)
}

/// AI enrichment for item forms and search. Never fails: every error path
/// degrades to "no attributes" or "search for the query itself".
#[derive(Clone)]
pub struct SuggestionService {
    llm: Option<Arc<dyn GenerationPort>>,
    language: String,
}

impl SuggestionService {
    pub fn new(llm: Option<Arc<dyn GenerationPort>>, language: impl Into<String>) -> Self {
        Self {
            llm,
            language: language.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, DynError> {
        let llm = self.llm.as_ref().ok_or("no generation backend configured")?;
        llm.generate_json(GenerationRequest {
            prompt,
            response_schema: schema,
        })
        .await
    }

    /// Asks for 3-5 key/value attributes describing the item. Empty on any failure.
    pub async fn suggest_attributes(&self, name: &str, description: &str) -> Vec<ItemAttribute> {
        if self.llm.is_none() {
            return Vec::new();
        }
        let prompt = attribute_prompt(name, description, &self.language);
        let result = self
            .generate(&prompt, &attribute_schema())
            .await
            .and_then(|text| parse_attributes(&text).map_err(DynError::from));

        match result {
            Ok(attributes) => attributes,
            Err(error) => {
                log::warn!("attribute suggestion failed: {}", error);
                Vec::new()
            }
        }
    }

    /// Asks for 3-5 related search terms. Falls back to `[query]` on any failure,
    /// so the caller always has at least one term.
    pub async fn smart_search_interpretation(&self, query: &str) -> Vec<String> {
        let fallback = vec![query.to_string()];
        if self.llm.is_none() {
            return fallback;
        }
        let prompt = search_prompt(query, &self.language);
        let result = self
            .generate(&prompt, &terms_schema())
            .await
            .and_then(|text| parse_terms(&text).map_err(DynError::from));

        match result {
            Ok(terms) if !terms.is_empty() => terms,
            Ok(_) => {
                log::warn!("search expansion returned no terms for '{}'", query);
                fallback
            }
            Err(error) => {
                log::warn!("search expansion failed: {}", error);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_attributes, parse_terms, SuggestionService};
    use crate::adapters::llm::GeminiGenerationAdapter;
    use crate::core::model::ItemAttribute;
    use crate::core::ports::llm::{DynError, GenerationPort, GenerationRequest};
    use futures::future::BoxFuture;
    use std::sync::{Arc, Mutex};

    struct ScriptedLlm {
        reply: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn replying(reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    impl GenerationPort for ScriptedLlm {
        fn generate_json<'a>(
            &'a self,
            request: GenerationRequest<'a>,
        ) -> BoxFuture<'a, Result<String, DynError>> {
            self.prompts
                .lock()
                .expect("lock prompts")
                .push(request.prompt.to_string());
            let reply = self.reply.clone().map_err(DynError::from);
            Box::pin(async move { reply })
        }
    }

    fn service(llm: Arc<ScriptedLlm>) -> SuggestionService {
        SuggestionService::new(Some(llm), "简体中文")
    }

    #[tokio::test]
    async fn unconfigured_service_degrades_to_defaults() {
        let service = SuggestionService::new(None, "简体中文");
        assert!(!service.is_configured());
        assert!(service.suggest_attributes("头灯", "").await.is_empty());
        assert_eq!(
            service.smart_search_interpretation("露营").await,
            vec!["露营".to_string()]
        );
    }

    #[tokio::test]
    async fn unreachable_model_degrades_to_defaults() {
        let adapter = GeminiGenerationAdapter::new("AIza-test", "gemini-2.5-flash")
            .with_base_url("http://127.0.0.1:9");
        let service = SuggestionService::new(Some(Arc::new(adapter)), "简体中文");

        assert!(service.suggest_attributes("头灯", "户外").await.is_empty());
        assert_eq!(
            service.smart_search_interpretation("露营").await,
            vec!["露营".to_string()]
        );
    }

    #[tokio::test]
    async fn backend_errors_degrade_to_defaults() {
        let service = service(ScriptedLlm::replying(Err("503 unavailable")));
        assert!(service.suggest_attributes("头灯", "").await.is_empty());
        assert_eq!(
            service.smart_search_interpretation("露营").await,
            vec!["露营".to_string()]
        );
    }

    #[tokio::test]
    async fn malformed_json_degrades_to_defaults() {
        let service = service(ScriptedLlm::replying(Ok("sure! here are some")));
        assert!(service.suggest_attributes("头灯", "").await.is_empty());
        assert_eq!(
            service.smart_search_interpretation("露营").await,
            vec!["露营".to_string()]
        );
    }

    #[tokio::test]
    async fn well_formed_attributes_are_returned() {
        let llm = ScriptedLlm::replying(Ok(
            r#"[{"key":"电压","value":"1.5V"},{"key":"型号","value":"AA"}]"#,
        ));
        let service = service(llm.clone());

        let attributes = service.suggest_attributes("电池", "五号电池").await;
        assert_eq!(
            attributes,
            vec![
                ItemAttribute::new("电压", "1.5V"),
                ItemAttribute::new("型号", "AA"),
            ]
        );

        let prompts = llm.prompts.lock().expect("lock prompts");
        assert!(prompts[0].contains("电池"));
        assert!(prompts[0].contains("五号电池"));
        assert!(prompts[0].contains("简体中文"));
    }

    #[tokio::test]
    async fn well_formed_terms_are_returned() {
        let service = service(ScriptedLlm::replying(Ok(
            r#"["帐篷","睡袋","营地灯","户外装备"]"#,
        )));
        assert_eq!(
            service.smart_search_interpretation("露营").await,
            vec!["帐篷", "睡袋", "营地灯", "户外装备"]
        );
    }

    #[tokio::test]
    async fn empty_term_list_falls_back_to_query() {
        let service = service(ScriptedLlm::replying(Ok("[]")));
        assert_eq!(
            service.smart_search_interpretation("露营").await,
            vec!["露营".to_string()]
        );
    }

    #[test]
    fn parse_terms_trims_and_dedupes() {
        let terms = parse_terms(r#"[" 帐篷 ","帐篷","","睡袋"]"#).expect("parse terms");
        assert_eq!(terms, vec!["帐篷", "睡袋"]);
    }

    #[test]
    fn parse_attributes_drops_blank_keys() {
        let attributes =
            parse_attributes(r#"[{"key":" ","value":"x"},{"key":"流明","value":" 400 "}]"#)
                .expect("parse attributes");
        assert_eq!(attributes, vec![ItemAttribute::new("流明", "400")]);
    }

    #[test]
    fn parse_attributes_rejects_wrong_shape() {
        assert!(parse_attributes(r#"["电压"]"#).is_err());
    }
}
