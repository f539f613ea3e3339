use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::USER_AGENT,
    multipart::{
        Form,
        Part,
    },
    Client,
    RequestBuilder,
    Response,
};
use serde::de::DeserializeOwned;

use super::types::{
    ErrorResponse,
    Extraction,
    QuizResponse,
    SimplifyResponse,
    SummaryResponse,
    TextRequest,
    UploadFile,
};
use crate::{
    config::AppConfig,
    core::{
        models::{
            ProcessingMode,
            QuizQuestion,
            SourceKind,
        },
        quiz::QuizGenerator,
        ReaderError,
    },
    narration::SpeechSynthesizer,
};

const CLIENT_USER_AGENT: &str = concat!("dyslexia-reader/", env!("CARGO_PKG_VERSION"));

/// Client for the remote extraction / simplification / speech service.
///
/// Every call is a single attempt; failures are returned to the caller untouched.
#[derive(Clone)]
pub struct ContentClient {
    http: Client,
    config: AppConfig,
}

impl ContentClient {
    pub fn new(config: &AppConfig) -> Result<Self, ReaderError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ReaderError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { http, config: config.clone() })
    }

    fn post(&self, path: &str, timeout: Duration) -> RequestBuilder {
        self.http
            .post(self.config.endpoint(path))
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .timeout(timeout)
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ReaderError> {
        tracing::debug!("POST {}", self.config.endpoint(path));
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", path, e);
            ReaderError::from(e)
        })?;
        ensure_success(path, response).await
    }

    async fn post_text<T: DeserializeOwned>(
        &self,
        path: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<T, ReaderError> {
        let request = self.post(path, timeout).json(&TextRequest { text });
        let response = self.send(path, request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn upload(&self, file: UploadFile) -> Result<Extraction, ReaderError> {
        let (path, timeout) = match file.kind {
            SourceKind::Pdf => ("/upload_pdf", self.config.timeouts.pdf_upload()),
            SourceKind::Image => ("/upload_image", self.config.timeouts.image_upload()),
        };
        let field = file.form_field();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.media_type)
            .map_err(|e| ReaderError::Custom(format!("Invalid media type: {e}")))?;
        let form = Form::new().part(field, part);

        let response = self.send(path, self.post(path, timeout).multipart(form)).await?;
        Ok(response.json::<Extraction>().await?)
    }

    pub async fn upload_pdf(&self, file: UploadFile) -> Result<Extraction, ReaderError> {
        self.upload(UploadFile { kind: SourceKind::Pdf, ..file }).await
    }

    pub async fn upload_image(&self, file: UploadFile) -> Result<Extraction, ReaderError> {
        self.upload(UploadFile { kind: SourceKind::Image, ..file }).await
    }

    pub async fn simplify(&self, text: &str) -> Result<String, ReaderError> {
        let timeout = self.config.timeouts.text_processing();
        let response: SimplifyResponse =
            self.post_text(ProcessingMode::Simplified.endpoint(), text, timeout).await?;
        Ok(response.simplified_text)
    }

    pub async fn summarize(&self, text: &str) -> Result<String, ReaderError> {
        let timeout = self.config.timeouts.text_processing();
        let response: SummaryResponse =
            self.post_text(ProcessingMode::Summary.endpoint(), text, timeout).await?;
        Ok(response.summary)
    }

    pub async fn process(&self, mode: ProcessingMode, text: &str) -> Result<String, ReaderError> {
        match mode {
            ProcessingMode::Simplified => self.simplify(text).await,
            ProcessingMode::Summary => self.summarize(text).await,
        }
    }

    pub async fn generate_quiz(&self, text: &str) -> Result<Vec<QuizQuestion>, ReaderError> {
        let response: QuizResponse =
            self.post_text("/generate_quiz", text, self.config.timeouts.quiz()).await?;
        Ok(response.quiz)
    }

    /// Raw audio for a single sentence.
    pub async fn synthesize(&self, sentence: &str) -> Result<Vec<u8>, ReaderError> {
        let path = "/get_audio";
        let request =
            self.post(path, self.config.timeouts.audio()).json(&TextRequest { text: sentence });
        let response = self.send(path, request).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn ensure_success(path: &str, response: Response) -> Result<Response, ReaderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&body).ok().and_then(|e| e.detail_text());
    tracing::warn!("{} returned {}: {}", path, status, detail.as_deref().unwrap_or("<no detail>"));

    Err(ReaderError::Service { status: status.as_u16(), detail })
}

#[async_trait]
impl QuizGenerator for ContentClient {
    async fn generate_quiz(&self, text: &str) -> Result<Vec<QuizQuestion>, ReaderError> {
        ContentClient::generate_quiz(self, text).await
    }
}

#[async_trait]
impl SpeechSynthesizer for ContentClient {
    async fn synthesize(&self, sentence: &str) -> Result<Vec<u8>, ReaderError> {
        ContentClient::synthesize(self, sentence).await
    }
}
