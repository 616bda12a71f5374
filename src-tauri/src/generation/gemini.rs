//! Gemini `generateContent` client for nail style transfer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::generation::{GeminiConfig, ImageGenerator};
use crate::intake::DataUrl;
use crate::utils::{GenerationError, GenerationResult};

const STYLE_TRANSFER_PROMPT: &str = "The first image shows a model's hand. The second image shows a \
nail art design. Apply the nail art design from the second image onto the fingernails of the hand \
in the first image. Match the colors, patterns and finish of the design and fit it to the shape \
and angle of each nail. Keep the hand, skin tone, pose, lighting and background of the first \
image unchanged. Return only the edited photo.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataRef<'a>,
    },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataRef<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 2],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Sends both images to Gemini and returns the edited image as a data URL.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        info!("Gemini client using model {}", config.model);
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn build_request<'a>(
        destination: DataUrl<'a>,
        source: DataUrl<'a>,
    ) -> GenerateRequest<'a> {
        let inline = |url: DataUrl<'a>| RequestPart::Inline {
            inline_data: InlineDataRef {
                mime_type: url.mime_type,
                data: url.payload,
            },
        };

        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    inline(destination),
                    inline(source),
                    RequestPart::Text { text: STYLE_TRANSFER_PROMPT },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["IMAGE", "TEXT"],
            },
        }
    }

    fn extract_image(response: GenerateResponse) -> GenerationResult<String> {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GenerationError::Blocked(reason));
        }

        let parts = response
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts);

        let mut texts = Vec::new();
        for part in parts {
            if let Some(image) = part.inline_data {
                return Ok(format!("data:{};base64,{}", image.mime_type, image.data));
            }
            if let Some(text) = part.text {
                texts.push(text);
            }
        }

        if !texts.is_empty() {
            debug!("Model answered with text only: {}", texts.join(" "));
        }
        Err(GenerationError::NoImage)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, destination: &str, source: &str) -> GenerationResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::config("GEMINI_API_KEY is not set"))?;

        let request = Self::build_request(DataUrl::parse(destination)?, DataUrl::parse(source)?);

        debug!("POST {}", self.config.endpoint());
        let response = self
            .http
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::decode(e.to_string()))?;
        Self::extract_image(parsed)
    }
}
