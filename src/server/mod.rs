pub mod handlers;

use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{
    http::StatusCode, middleware::Logger, web, App, HttpResponse, HttpServer, ResponseError,
};

use crate::{config::Config, error::GlyphError, models::ErrorResponse, pipeline::GlyphPipeline};

const UPLOAD_LIMIT_BYTES: usize = 20 * 1024 * 1024;

impl ResponseError for GlyphError {
    fn status_code(&self) -> StatusCode {
        match self {
            e if e.is_rejection() => StatusCode::BAD_REQUEST,
            GlyphError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            GlyphError::InferenceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            kind: Some(self.kind().to_string()),
        })
    }
}

pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .memory_limit(UPLOAD_LIMIT_BYTES)
        .total_limit(UPLOAD_LIMIT_BYTES)
}

/// Registers the HTTP routes; callers provide `web::Data<GlyphPipeline>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(multipart_config())
        .route("/", web::get().to(handlers::root))
        .route("/ai/generate", web::post().to(handlers::ai_generate))
        .route("/ai/blend", web::post().to(handlers::ai_blend));
}

pub async fn run(config: &Config, pipeline: GlyphPipeline) -> std::io::Result<()> {
    let pipeline = web::Data::new(pipeline);
    let (host, port) = config.bind_address();

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::new("%r %s %Dms"))
            .app_data(pipeline.clone())
            .configure(configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
