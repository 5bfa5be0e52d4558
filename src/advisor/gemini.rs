use super::TextGenerator;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1/models";
const MODEL: &str = "gemini-2.0-flash-001";

/// All five harm categories, blocked at low-and-above.
const SAFETY_CATEGORIES: [&str; 5] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_CIVIC_INTEGRITY",
];

#[derive(Serialize)]
struct GeneratePart {
    text: String,
}

#[derive(Serialize)]
struct GenerateContent {
    parts: Vec<GeneratePart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<GenerateContent>,
    safety_settings: Vec<SafetySetting>,
}

pub struct GeminiApi {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiApi {
    pub fn new(api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120)) // generation can be slow
            .build()
            .expect("Failed to build HTTP client");
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    /// Point the client at a different endpoint (test servers, proxies).
    pub fn with_base_url(api_key: &str, api_url: &str) -> Self {
        let mut api = Self::new(api_key);
        api.api_url = crate::utils::remove_trailing_slash(api_url);
        api
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_generate_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.api_url, MODEL, self.api_key
        )
    }

    fn build_request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![GenerateContent {
                parts: vec![GeneratePart {
                    text: prompt.to_string(),
                }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: "BLOCK_LOW_AND_ABOVE",
                })
                .collect(),
        }
    }

    async fn fetch_generation(&self, prompt: &str) -> Result<String> {
        let url = self.build_generate_url();
        let response = self
            .client
            .post(&url)
            .json(&Self::build_request(prompt))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(anyhow!("rate_limited"));
        }

        let status = response.status();
        let body = response.text().await?;
        let parsed: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| anyhow!("Gemini response parse failed: {}", e))?;

        if !status.is_success() {
            let message = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            return Err(anyhow!("Gemini API returned {}: {}", status, message));
        }

        let text = parsed
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| anyhow!("No text in Gemini response"))?;

        Ok(text.to_string())
    }
}

#[async_trait]
impl TextGenerator for GeminiApi {
    async fn generate(&self, prompt: &str) -> Result<String> {
        crate::utils::retry(3, 1000, || async { self.fetch_generation(prompt).await }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_generate_url() {
        let api = GeminiApi::with_base_url("test-key", "http://localhost:9999/");
        assert_eq!(
            api.build_generate_url(),
            "http://localhost:9999/gemini-2.0-flash-001:generateContent?key=test-key"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = GeminiApi::build_request("recommend something");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "recommend something"
        );
        let settings = json["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 5, "all five harm categories must be set");
        assert!(settings
            .iter()
            .all(|s| s["threshold"] == "BLOCK_LOW_AND_ABOVE"));
    }
}
