use axum::extract::Multipart;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use media_core::{
    validate_upload_name, AudioCompressRequest, AudioConvertRequest, AudioFormat, Bitrate,
    ImageTransformRequest, InputBlob, MediaError, MediaKind, OutputBlob, TransformError,
    DEFAULT_AUDIO_FORMAT, DEFAULT_BITRATE,
};

use crate::upload::UploadForm;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// UI のドロップダウンに表示する選択肢
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub bitrates: Vec<&'static str>,
    pub formats: Vec<&'static str>,
    pub default_bitrate: &'static str,
    pub default_format: &'static str,
}

pub async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        bitrates: Bitrate::ALL.iter().map(Bitrate::as_str).collect(),
        formats: AudioFormat::ALL.iter().map(AudioFormat::extension).collect(),
        default_bitrate: DEFAULT_BITRATE,
        default_format: DEFAULT_AUDIO_FORMAT,
    })
}

pub async fn resize_image(multipart: Multipart) -> Result<Response, AppError> {
    let form = UploadForm::read(multipart).await?;
    validate_upload_name(&form.file_name, MediaKind::Image)?;

    let width = form.integer_field("width")?;
    let height = form.integer_field("height")?;
    let request = ImageTransformRequest::new(InputBlob::image(form.data.clone()), width, height)?;

    tracing::info!(
        file = %form.file_name,
        size = form.data.len(),
        sniffed = ?MediaKind::sniff(&form.data),
        w = request.width,
        h = request.height,
        "resizing image"
    );

    let output = run_transform(move || media_core::resize(request)).await?;
    Ok(download(output))
}

pub async fn compress_audio(multipart: Multipart) -> Result<Response, AppError> {
    let form = UploadForm::read(multipart).await?;
    validate_upload_name(&form.file_name, MediaKind::Audio)?;

    let bitrate: Bitrate = form.field("bitrate").unwrap_or(DEFAULT_BITRATE).parse()?;

    tracing::info!(
        file = %form.file_name,
        size = form.data.len(),
        sniffed = ?MediaKind::sniff(&form.data),
        bitrate = %bitrate,
        "compressing audio"
    );

    let request = AudioCompressRequest {
        source: audio_source(&form.file_name, form.data),
        bitrate,
    };
    let output = run_transform(move || media_core::compress(request)).await?;
    Ok(download(output))
}

pub async fn convert_audio(multipart: Multipart) -> Result<Response, AppError> {
    let form = UploadForm::read(multipart).await?;
    validate_upload_name(&form.file_name, MediaKind::Audio)?;

    let format: AudioFormat = form
        .field("format")
        .unwrap_or(DEFAULT_AUDIO_FORMAT)
        .parse()?;

    tracing::info!(
        file = %form.file_name,
        size = form.data.len(),
        sniffed = ?MediaKind::sniff(&form.data),
        format = %format,
        "converting audio"
    );

    let request = AudioConvertRequest {
        source: audio_source(&form.file_name, form.data),
        format,
    };
    let output = run_transform(move || media_core::convert(request)).await?;
    Ok(download(output))
}

/// マジックバイトで判別できない場合はファイル名の拡張子をデコードのヒントにする
fn audio_source(file_name: &str, data: Bytes) -> InputBlob {
    let blob = InputBlob::audio(data);
    if blob.container().is_some() {
        return blob;
    }

    match file_name
        .rsplit_once('.')
        .and_then(|(_, ext)| ext.parse::<AudioFormat>().ok())
    {
        Some(container) => blob.with_container(container),
        None => blob,
    }
}

/// 変換処理は CPU バウンドなのでブロッキングスレッドで実行する
async fn run_transform<F>(task: F) -> Result<OutputBlob, AppError>
where
    F: FnOnce() -> Result<OutputBlob, TransformError> + Send + 'static,
{
    let output = tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Internal(format!("transform task failed: {e}")))??;

    tracing::info!(
        file = %output.file_name,
        content_type = output.content_type,
        size = output.bytes.len(),
        "transform completed"
    );

    Ok(output)
}

fn download(output: OutputBlob) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, output.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", output.file_name),
            ),
        ],
        output.bytes,
    )
        .into_response()
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    PayloadTooLarge(String),
    TransformFailed(String),
    Internal(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Validation(msg) => {
                tracing::warn!(error = %msg, "validation error");
                AppError::BadRequest(msg)
            }
            MediaError::Transform(transform_err) => transform_err.into(),
        }
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::InvalidDimension { .. }
            | TransformError::InvalidBitrate(_)
            | TransformError::UnsupportedFormat(_) => {
                tracing::warn!(error = %err, "invalid transform parameters");
                AppError::BadRequest(err.to_string())
            }
            TransformError::ResolutionTooLarge { width, height } => {
                tracing::warn!(width = %width, height = %height, "image resolution too large");
                AppError::BadRequest(err.to_string())
            }
            TransformError::Decode(msg) => {
                tracing::warn!(error = %msg, "upload could not be decoded");
                AppError::TransformFailed(format!("decode failed: {msg}"))
            }
            TransformError::ProcessingFailed(msg) => {
                tracing::error!(error = %msg, "media processing failed");
                AppError::TransformFailed(msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!(error = %msg, "upload too large");
                (StatusCode::PAYLOAD_TOO_LARGE, msg)
            }
            AppError::TransformFailed(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
