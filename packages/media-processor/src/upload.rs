use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use bytes::Bytes;

use crate::handler::AppError;

/// ファイルを格納するフォームフィールド名
const FILE_FIELD: &str = "file";

/// multipart/form-data から取り出したアップロード内容
#[derive(Debug)]
pub struct UploadForm {
    pub file_name: String,
    pub data: Bytes,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// multipart ボディを読み込む
    ///
    /// `file` フィールドは必須。それ以外のフィールドはテキストとして保持する
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut file: Option<(String, Bytes)> = None;
        let mut fields = HashMap::new();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if name == FILE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, data));
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                fields.insert(name, value);
            }
        }

        let (file_name, data) =
            file.ok_or_else(|| AppError::BadRequest("missing `file` field".to_string()))?;

        if data.is_empty() {
            return Err(AppError::BadRequest("uploaded file is empty".to_string()));
        }

        Ok(Self {
            file_name,
            data,
            fields,
        })
    }

    /// テキストフィールドを取得（前後の空白は除去、空なら未指定扱い）
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// 整数フィールドを取得する
    ///
    /// 範囲の検証は呼び出し側（media-core）に任せるため符号付きで返す
    pub fn integer_field(&self, name: &str) -> Result<i64, AppError> {
        let value = self
            .field(name)
            .ok_or_else(|| AppError::BadRequest(format!("missing `{name}` field")))?;

        value
            .parse()
            .map_err(|_| AppError::BadRequest(format!("`{name}` must be an integer, got {value}")))
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("malformed multipart body: {}", err.body_text()))
    }
}
