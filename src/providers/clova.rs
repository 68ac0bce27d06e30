use crate::embeddings::{model::EmbeddingModel, EmbedderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_URL: &str = "https://clovastudio.stream.ntruss.com/v1/api-tools/embedding";
const DEFAULT_MODEL: &str = "bge-m3";

/// Embedding client for the NCP Clova Studio embedding API.
///
/// Clova addresses the model through the request path and takes a bare
/// `{"text": ...}` body, unlike the OpenAI-shaped `{"input", "model"}` pair.
#[derive(Debug)]
pub struct ClovaEmbedding {
    api_key: String,
    api_url: String,
    model: String,
    client: Client,
}

impl ClovaEmbedding {
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
struct ClovaEmbeddingResponse {
    pub result: ClovaEmbeddingResult,
}

#[derive(Deserialize)]
struct ClovaEmbeddingResult {
    pub embedding: Vec<f64>,
}

#[async_trait]
impl EmbeddingModel for ClovaEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedderError> {
        let request_body = json!({ "text": text });
        let response = self
            .client
            .post(format!("{}/{}", self.api_url, self.model))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmbedderError::Request(e.to_string()))?;

        if response.status().is_success() {
            let response = response
                .json::<ClovaEmbeddingResponse>()
                .await
                .map_err(|e| EmbedderError::Parse(e.to_string()))?;

            Ok(response.result.embedding)
        } else {
            let error_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(EmbedderError::Provider(error_message))
        }
    }
}
