//! Stylized glyph generation service.
//!
//! Wraps an external diffusion pipeline (style encoder + sampler) with request validation,
//! style-asset lookup, content-skeleton rasterization, latent style blending, a result cache
//! and stroke-width post-processing. The HTTP surface lives behind the `server` feature.

pub mod cache;
pub mod config;
pub mod error;
pub mod font;
pub mod imaging;
pub mod inference;
pub mod logger;
pub mod models;
pub mod pipeline;
#[cfg(feature = "server")]
pub mod server;
pub mod styles;

pub use cache::{CacheKey, ResultCache};
pub use config::{Config, InferenceConfig, SamplingConfig};
pub use error::{GlyphError, Result};
pub use font::{ContentRenderer, TtfContentRenderer};
pub use inference::{DiffusionSampler, RemoteInferenceClient, StyleEncoder};
pub use models::*;
pub use pipeline::GlyphPipeline;
pub use styles::StyleAssetResolver;
