//! OpenAI-compatible chat-completions client.
//!
//! One struct covers every hosted backend that speaks the
//! `/chat/completions` wire format; providers differ only by endpoint URL,
//! API key, and model name, all of which come from config.

use async_trait::async_trait;
use serde_json::{Value, json};

use askdesk_core::config::AskDeskConfig;
use askdesk_core::error::{AskDeskError, Result};
use askdesk_core::traits::AnswerProvider;

pub struct GenerativeProvider {
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    /// System-prompt framing: who the assistant speaks for.
    institute_name: String,
    client: reqwest::Client,
}

impl GenerativeProvider {
    pub fn from_config(config: &AskDeskConfig) -> Result<Self> {
        let api_key = if !config.llm.api_key.is_empty() {
            config.llm.api_key.clone()
        } else {
            std::env::var("ASKDESK_API_KEY").unwrap_or_default()
        };
        if api_key.is_empty() {
            return Err(AskDeskError::Config(
                "llm.enabled is set but no API key is configured (llm.api_key or ASKDESK_API_KEY)"
                    .into(),
            ));
        }

        Ok(Self {
            endpoint: config.llm.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            institute_name: config.institute_name.clone(),
            client: reqwest::Client::new(),
        })
    }

    fn system_prompt(&self, context: &str) -> String {
        format!(
            "You are the support assistant for {institute}. Give short, simple, \
             plain-text answers like a friendly teacher or guide — no markdown, \
             no styled text. Ground every answer in the context below; if the \
             user's premise contradicts it, correct them politely. Only answer \
             questions about {institute} and education.\n\nCONTEXT:\n{context}",
            institute = self.institute_name,
            context = context,
        )
    }
}

#[async_trait]
impl AnswerProvider for GenerativeProvider {
    fn name(&self) -> &str {
        "generative"
    }

    async fn generate(&self, query: &str, context: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "system", "content": self.system_prompt(context) },
                { "role": "user", "content": query },
            ],
        });

        let url = format!("{}/chat/completions", self.endpoint);
        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AskDeskError::Http(format!("generative call failed ({url}): {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AskDeskError::Provider(format!(
                "generative API error {status}: {text}"
            )));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| AskDeskError::Http(e.to_string()))?;

        let content = json["choices"]
            .get(0)
            .and_then(|c| c["message"]["content"].as_str())
            .ok_or_else(|| AskDeskError::Provider("No choices in response".into()))?;

        Ok(content.trim().to_string())
    }
}
