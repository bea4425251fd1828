use std::sync::Arc;

use image::RgbImage;

use crate::{
    cache::{CacheKey, ResultCache},
    config::SamplingConfig,
    error::{GlyphError, Result},
    font::ContentRenderer,
    imaging::{adjust_thickness, decode_upload, to_grayscale_rgb, to_normalized_tensor},
    inference::{DiffusionSampler, SampleInput, StyleCondition, StyleEncoder},
    logger,
    models::{single_char, BlendRequest, GenerationRequest, StyleOption},
    styles::StyleAssetResolver,
};

/// Glyph synthesis: single-style generation and latent style blending.
///
/// Every collaborator is injected, the result cache included, so handlers share one
/// pipeline behind an `Arc` and tests can substitute the model calls.
pub struct GlyphPipeline {
    resolver: StyleAssetResolver,
    renderer: Arc<dyn ContentRenderer>,
    encoder: Arc<dyn StyleEncoder>,
    sampler: Arc<dyn DiffusionSampler>,
    cache: Arc<ResultCache>,
    sampling: SamplingConfig,
}

impl GlyphPipeline {
    pub fn new(
        resolver: StyleAssetResolver,
        renderer: Arc<dyn ContentRenderer>,
        encoder: Arc<dyn StyleEncoder>,
        sampler: Arc<dyn DiffusionSampler>,
    ) -> Self {
        Self {
            resolver,
            renderer,
            encoder,
            sampler,
            cache: Arc::new(ResultCache::unbounded()),
            sampling: SamplingConfig::default(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<ResultCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn resolver(&self) -> &StyleAssetResolver {
        &self.resolver
    }

    fn content_tensor(&self, character: char) -> Result<crate::models::Tensor> {
        let skeleton = self.renderer.render(character)?;
        Ok(to_normalized_tensor(
            &skeleton,
            self.sampling.content_image_size,
        ))
    }

    /// Samples `character` in the style of a single reference image. No caching.
    pub async fn generate_image(&self, request: GenerationRequest) -> Result<RgbImage> {
        let character = single_char(&request.character)?;
        if request.sampling_step == 0 {
            return Err(GlyphError::InvalidParameter(
                "sampling_step must be at least 1".into(),
            ));
        }
        if !self.renderer.contains(character) {
            log::warn!("[generate] {} is not in the outline font", character);
            return Err(GlyphError::CharacterNotInFont(character));
        }

        let input = SampleInput {
            content: self.content_tensor(character)?,
            style: StyleCondition::Image(to_normalized_tensor(
                &request.reference_image,
                self.sampling.style_image_size,
            )),
            num_inference_steps: request.sampling_step,
            seed: Some(self.sampling.seed),
        };

        let _timer = logger::timer(&format!("generate {}", character));
        self.sampler.sample(&input).await
    }

    /// Blends the caller's style with a preset style in latent space.
    ///
    /// Preconditions are checked in order: single character, known style, asset on disk,
    /// character in the outline font, alpha in [0, 1]. A cached result for the same
    /// `(character, style, round(alpha, 2))` skips encoding and sampling entirely; the
    /// thickness adjustment always runs on the cached, unadjusted image, on the blocking pool.
    pub async fn blend_styles_latent(&self, request: BlendRequest) -> Result<RgbImage> {
        log::info!(
            "[blend] character: {}, style: {}, alpha: {}, thickness: {}",
            request.character,
            request.style_option,
            request.alpha,
            request.thickness
        );

        let character = single_char(&request.character)?;
        let style: StyleOption = request.style_option.parse()?;
        let path = self.resolver.resolve(style, character);
        if !self.resolver.exists(&path).await {
            log::warn!("[blend] style asset not found: {}", path.display());
            return Err(GlyphError::StyleAssetMissing(path));
        }
        if !self.renderer.contains(character) {
            log::warn!("[blend] {} is not in the outline font", character);
            return Err(GlyphError::CharacterNotInFont(character));
        }
        request.validate_alpha()?;

        let image_b = decode_upload(&tokio::fs::read(&path).await?)?;
        let key = CacheKey::new(character, style, request.alpha);

        let base = match self.cache.get(&key) {
            Some(cached) => {
                log::info!("[blend] using cached image");
                cached
            }
            None => {
                let image = self
                    .synthesize(character, &request.image_a, &image_b, request.alpha)
                    .await?;
                self.cache.put(key, image.clone());
                image
            }
        };

        let thickness = request.thickness;
        tokio::task::spawn_blocking(move || adjust_thickness(&base, thickness))
            .await
            .map_err(|e| GlyphError::InternalError(format!("thickness adjustment failed: {}", e)))
    }

    /// Sampled blends are stored grayscale, the same form the thickness pass emits.
    async fn synthesize(
        &self,
        character: char,
        image_a: &RgbImage,
        image_b: &RgbImage,
        alpha: f64,
    ) -> Result<RgbImage> {
        let _timer = logger::timer(&format!("blend {}", character));
        let size = self.sampling.style_image_size;

        let latent_a = self
            .encoder
            .encode_style(&to_normalized_tensor(image_a, size))
            .await?;
        let latent_b = self
            .encoder
            .encode_style(&to_normalized_tensor(image_b, size))
            .await?;
        let fused = latent_a.lerp(&latent_b, alpha as f32)?;

        let input = SampleInput {
            content: self.content_tensor(character)?,
            style: StyleCondition::Latent(fused),
            num_inference_steps: self.sampling.blend_sampling_steps,
            seed: None,
        };
        let sample = self.sampler.sample(&input).await?;
        Ok(to_grayscale_rgb(&sample))
    }
}
