use crate::embeddings::{model::EmbeddingModel, EmbedderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_URL: &str = "https://api.openai.com/v1/embeddings";
const DEFAULT_MODEL: &str = "text-embedding-3-large";

/// Embedding client for the OpenAI embeddings API.
#[derive(Debug)]
pub struct OpenAiEmbedding {
    api_key: String,
    api_url: String,
    model: String,
    client: Client,
}

impl OpenAiEmbedding {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Deserialize)]
struct OpenAiEmbeddingResponse {
    pub data: Vec<OpenAiEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingData {
    pub embedding: Vec<f64>,
}

#[async_trait]
impl EmbeddingModel for OpenAiEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedderError> {
        let request_body = json!({
            "input": text,
            "model": self.model,
        });
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmbedderError::Request(e.to_string()))?;

        if response.status().is_success() {
            let response = response
                .json::<OpenAiEmbeddingResponse>()
                .await
                .map_err(|e| EmbedderError::Parse(e.to_string()))?;

            Ok(response
                .data
                .into_iter()
                .flat_map(|d| d.embedding)
                .collect())
        } else {
            let error_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(EmbedderError::Provider(error_message))
        }
    }
}
