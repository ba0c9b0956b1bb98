use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::common::SelectedFile;

use super::error::ApiError;

pub const RETRIEVE_PATH: &str = "/v1/retrieve";
pub const DOCUMENT_PATH: &str = "/v1/document";

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    message: String,
}

/// What the document endpoint said about an upload. Only ever logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadReceipt {
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Thin wrapper quanh reqwest cho hai endpoint của backend RAG.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST {base}/v1/retrieve` with a form body; returns the `message` field.
    pub async fn retrieve(&self, query_text: &str, uid: Option<&str>) -> Result<String, ApiError> {
        let mut fields = vec![("query_text", query_text)];
        if let Some(uid) = uid {
            fields.push(("uid", uid));
        }

        let response = self
            .http
            .post(self.url(RETRIEVE_PATH))
            .form(&fields)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: RETRIEVE_PATH,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: RETRIEVE_PATH,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Request {
            endpoint: RETRIEVE_PATH,
            source,
        })?;
        let parsed: RetrieveResponse =
            serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
                endpoint: RETRIEVE_PATH,
                source,
            })?;

        Ok(parsed.message)
    }

    /// `POST {base}/v1/document` as multipart. The file is consumed.
    pub async fn upload_document(
        &self,
        file: SelectedFile,
        uid: Option<&str>,
    ) -> Result<UploadReceipt, ApiError> {
        let SelectedFile { name, bytes, mime } = file;
        let mut part = Part::bytes(bytes).file_name(name);
        if let Some(mime) = mime {
            part = part.mime_str(&mime).map_err(|source| ApiError::Request {
                endpoint: DOCUMENT_PATH,
                source,
            })?;
        }

        let mut form = Form::new().part("file", part);
        if let Some(uid) = uid {
            form = form.text("uid", uid.to_string());
        }

        let response = self
            .http
            .post(self.url(DOCUMENT_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: DOCUMENT_PATH,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: DOCUMENT_PATH,
                status: status.as_u16(),
            });
        }

        // Body là tuỳ chọn; chỉ dùng để log.
        let body = response.bytes().await.unwrap_or_default();
        let mut receipt = serde_json::from_slice::<UploadReceipt>(&body).unwrap_or_default();
        receipt.status = status.as_u16();
        Ok(receipt)
    }
}
