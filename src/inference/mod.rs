pub mod remote;

use async_trait::async_trait;
use image::RgbImage;

use crate::{
    error::Result,
    models::{LatentEmbedding, Tensor},
};

pub use remote::RemoteInferenceClient;

/// How the sampler is told which style to render.
#[derive(Debug, Clone)]
pub enum StyleCondition {
    /// Normalized reference bitmap; the sampler runs its own style encoder.
    Image(Tensor),
    /// Precomputed embedding used in place of the style encoder output.
    Latent(LatentEmbedding),
}

#[derive(Debug, Clone)]
pub struct SampleInput {
    pub content: Tensor,
    pub style: StyleCondition,
    pub num_inference_steps: u32,
    pub seed: Option<u64>,
}

#[async_trait]
pub trait StyleEncoder: Send + Sync {
    async fn encode_style(&self, image: &Tensor) -> Result<LatentEmbedding>;
}

#[async_trait]
pub trait DiffusionSampler: Send + Sync {
    async fn sample(&self, input: &SampleInput) -> Result<RgbImage>;
}
