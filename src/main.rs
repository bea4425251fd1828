use std::sync::Arc;

use glyphgen::{
    logger::{self, LoggerConfig},
    Config, ContentRenderer, GlyphError, GlyphPipeline, RemoteInferenceClient, ResultCache,
    StyleAssetResolver, TtfContentRenderer,
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;
    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    let (host, port) = config.bind_address();
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &host, port);
    logger::log_config_info(&config);

    let ttf_path = config
        .ttf_path
        .clone()
        .ok_or_else(|| GlyphError::ConfigError("TTF_PATH is required".into()))?;
    let renderer: Arc<dyn ContentRenderer> = Arc::new(
        TtfContentRenderer::load(&ttf_path, config.sampling.content_image_size).await?,
    );

    let inference_config = config
        .inference
        .clone()
        .ok_or_else(|| GlyphError::ConfigError("INFERENCE_URL is required".into()))?;
    let backend = Arc::new(RemoteInferenceClient::new(inference_config)?);
    match backend.health_check().await {
        Ok(true) => log::info!("✅ Inference backend reachable at {}", backend.base_url()),
        Ok(false) | Err(_) => log::warn!(
            "⚠️  Inference backend at {} did not pass its health check",
            backend.base_url()
        ),
    }

    let cache = Arc::new(match config.cache_capacity {
        Some(capacity) => ResultCache::with_capacity(capacity),
        None => ResultCache::unbounded(),
    });

    let pipeline = GlyphPipeline::new(
        StyleAssetResolver::new(&config.style_base_dir),
        renderer,
        backend.clone(),
        backend,
    )
    .with_cache(cache)
    .with_sampling(config.sampling.clone());

    glyphgen::server::run(&config, pipeline).await?;
    Ok(())
}
