use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};
use image::RgbImage;
use uuid::Uuid;

use crate::{
    error::GlyphError,
    imaging::{decode_upload, to_data_uri},
    models::{
        thickness_from_form, BlendRequest, ErrorResponse, GenerationRequest, HealthResponse,
        ImageResponse,
    },
    pipeline::GlyphPipeline,
};

const BLEND_FAILURE_MESSAGE: &str = "字元無法處理，請確認輸入。";

#[derive(MultipartForm)]
pub struct GenerateForm {
    pub character: Text<String>,
    pub sampling_step: Text<u32>,
    pub reference_image: Bytes,
}

#[derive(MultipartForm)]
pub struct BlendForm {
    pub character: Text<String>,
    pub style_option: Text<String>,
    pub alpha: Text<f64>,
    pub thickness: Text<f64>,
    pub image_a: Bytes,
}

fn preview(uri: &str) -> &str {
    let end = uri
        .char_indices()
        .nth(50)
        .map_or(uri.len(), |(index, _)| index);
    &uri[..end]
}

async fn decode_blocking(data: web::Bytes) -> Result<RgbImage, GlyphError> {
    web::block(move || decode_upload(&data))
        .await
        .map_err(|e| GlyphError::InternalError(e.to_string()))?
}

async fn encode_blocking(image: RgbImage) -> Result<String, GlyphError> {
    web::block(move || to_data_uri(&image))
        .await
        .map_err(|e| GlyphError::InternalError(e.to_string()))?
}

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        message: "glyphgen ✅".to_string(),
    })
}

pub async fn ai_generate(
    pipeline: web::Data<GlyphPipeline>,
    MultipartForm(form): MultipartForm<GenerateForm>,
) -> Result<HttpResponse, GlyphError> {
    let request_id = Uuid::new_v4();
    let character = form.character.into_inner();
    let sampling_step = form.sampling_step.into_inner();
    log::info!(
        "[generate] [req:{}] character: {}, sampling_step: {}",
        request_id,
        character,
        sampling_step
    );

    let reference_image = decode_blocking(form.reference_image.data).await?;
    log::debug!(
        "[generate] [req:{}] reference image {:?}",
        request_id,
        reference_image.dimensions()
    );

    let image = pipeline
        .generate_image(GenerationRequest {
            character,
            sampling_step,
            reference_image,
        })
        .await?;

    let uri = encode_blocking(image).await?;
    log::info!(
        "[generate] [req:{}] ✅ {}... ({} chars)",
        request_id,
        preview(&uri),
        uri.len()
    );
    Ok(HttpResponse::Ok().json(ImageResponse { image: uri }))
}

/// Rejected blends answer 200 with an `error` body, which is what existing clients expect.
pub async fn ai_blend(
    pipeline: web::Data<GlyphPipeline>,
    MultipartForm(form): MultipartForm<BlendForm>,
) -> Result<HttpResponse, GlyphError> {
    let request_id = Uuid::new_v4();
    let image_a = decode_blocking(form.image_a.data).await?;
    log::debug!(
        "[blend] [req:{}] image_a {:?}",
        request_id,
        image_a.dimensions()
    );

    let request = BlendRequest {
        character: form.character.into_inner(),
        style_option: form.style_option.into_inner(),
        alpha: form.alpha.into_inner(),
        thickness: thickness_from_form(form.thickness.into_inner()),
        image_a,
    };

    match pipeline.blend_styles_latent(request).await {
        Ok(image) => {
            let uri = encode_blocking(image).await?;
            log::info!(
                "[blend] [req:{}] ✅ {}... ({} chars)",
                request_id,
                preview(&uri),
                uri.len()
            );
            Ok(HttpResponse::Ok().json(ImageResponse { image: uri }))
        }
        Err(e) if e.is_rejection() => {
            log::warn!("[blend] [req:{}] ❌ {}", request_id, e);
            Ok(HttpResponse::Ok().json(ErrorResponse {
                error: BLEND_FAILURE_MESSAGE.to_string(),
                kind: Some(e.kind().to_string()),
            }))
        }
        Err(e) => {
            log::error!("[blend] [req:{}] ❌ {}", request_id, e);
            Err(e)
        }
    }
}
