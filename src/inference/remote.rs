use std::time::Duration;

use async_trait::async_trait;
use image::RgbImage;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{DiffusionSampler, SampleInput, StyleCondition, StyleEncoder};
use crate::{
    config::InferenceConfig,
    error::{GlyphError, Result},
    imaging::decode_png_base64,
    models::{LatentEmbedding, Tensor},
};

const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Deserialize)]
struct EncodeResponse {
    latent: Tensor,
}

#[derive(Deserialize)]
struct SampleResponse {
    image: String,
}

/// Style encoder and diffusion sampler served by a model host over HTTP/JSON.
#[derive(Clone)]
pub struct RemoteInferenceClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteInferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .ok_or_else(|| GlyphError::ConfigError("Inference base URL is required".into()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(
                config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .map_err(|e| GlyphError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GlyphError::InferenceError(format!("{} request failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GlyphError::InferenceError(format!(
                "{} returned {}: {}",
                path, status, body
            )));
        }
        Ok(response)
    }

    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| GlyphError::InferenceError(format!("health check failed: {}", e)))?;
        Ok(response.status().is_success())
    }
}

pub(crate) fn sample_payload(input: &SampleInput) -> Value {
    let mut payload = json!({
        "content": input.content,
        "num_inference_steps": input.num_inference_steps,
        "seed": input.seed,
    });
    match &input.style {
        StyleCondition::Image(image) => payload["style_image"] = json!(image),
        StyleCondition::Latent(latent) => payload["style_latent"] = json!(latent),
    }
    payload
}

#[async_trait]
impl StyleEncoder for RemoteInferenceClient {
    async fn encode_style(&self, image: &Tensor) -> Result<LatentEmbedding> {
        let response = self
            .post("/style/encode", &json!({ "image": image }))
            .await?;
        let body: EncodeResponse = response
            .json()
            .await
            .map_err(|e| GlyphError::InferenceError(format!("bad encode response: {}", e)))?;
        Tensor::new(body.latent.shape, body.latent.data)
    }
}

#[async_trait]
impl DiffusionSampler for RemoteInferenceClient {
    async fn sample(&self, input: &SampleInput) -> Result<RgbImage> {
        log::debug!(
            "Sampling {} steps on {} (seed: {:?})",
            input.num_inference_steps,
            self.base_url,
            input.seed
        );
        let response = self.post("/sample", &sample_payload(input)).await?;
        let body: SampleResponse = response
            .json()
            .await
            .map_err(|e| GlyphError::InferenceError(format!("bad sample response: {}", e)))?;
        decode_png_base64(&body.image)
    }
}
