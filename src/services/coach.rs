use serde::{Deserialize, Serialize};

use crate::config::CoachConfig;

/// System instruction prepended to every coaching completion request.
const SYSTEM_INSTRUCTION: &str = "You are ProactCoach, an evidence-based procrastination \
behavior therapy coach. Quickly identify the user's emotional and cognitive barriers, \
apply CBT, implementation intentions and micro-goal setting, reply in less than 30 words, \
and finish with one clear, doable step that starts with 'Action: '. If the user shows \
distress, validate their feelings before giving advice.";

/// Thin pass-through to an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct CoachProvider {
    config: CoachConfig,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("coach is disabled")]
    Disabled,
    #[error("coach request timed out")]
    Timeout,
    #[error("coach network error: {0}")]
    Network(String),
    #[error("coach api error: status={status}, message={message}")]
    ApiError { status: u16, message: String },
}

impl CoachProvider {
    pub fn new(config: &CoachConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            config: config.clone(),
            client,
        }
    }

    /// Validate coach configuration at startup.
    /// Panics if real mode is enabled without an API key, which would make
    /// every completion request fail at runtime.
    pub fn validate_config(config: &CoachConfig) {
        if config.enabled && !config.mock && config.api_key.trim().is_empty() {
            panic!(
                "Invalid coach configuration: enabled=true and mock=false but \
                 COACH_API_KEY is empty. Set COACH_API_KEY or COACH_MOCK=true."
            );
        }
    }

    /// Run one coaching completion: system instruction + task context +
    /// the dialogue so far, returning the assistant's reply text.
    pub async fn complete(
        &self,
        task_title: &str,
        dialogues: Vec<ChatMessage>,
    ) -> Result<String, CoachError> {
        if !self.config.enabled {
            return Err(CoachError::Disabled);
        }
        if self.config.mock {
            return Ok(format!(
                "Let's make '{task_title}' smaller. Action: work on it for two minutes now."
            ));
        }

        let mut messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_INSTRUCTION.to_string(),
            },
            ChatMessage {
                role: "system".to_string(),
                content: format!("Here's the user's task: {task_title}"),
            },
        ];
        messages.extend(dialogues);

        let request = CompletionRequest {
            model: &self.config.model,
            messages,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CoachError::Timeout
                } else {
                    CoachError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CoachError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CoachError::Network(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CoachError::ApiError {
                status: status.as_u16(),
                message: "completion returned no choices".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, mock: bool) -> CoachConfig {
        CoachConfig {
            enabled,
            mock,
            api_url: String::new(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn disabled_mode_returns_error() {
        let provider = CoachProvider::new(&config(false, true));
        let result = provider.complete("read one chapter", vec![]).await;
        assert!(matches!(result, Err(CoachError::Disabled)));
    }

    #[tokio::test]
    async fn mock_mode_returns_actionable_text() {
        let provider = CoachProvider::new(&config(true, true));
        let reply = provider.complete("read one chapter", vec![]).await.unwrap();
        assert!(reply.contains("Action:"));
        assert!(reply.contains("read one chapter"));
    }

    #[test]
    fn validate_accepts_mock_mode_without_key() {
        CoachProvider::validate_config(&config(true, true));
        CoachProvider::validate_config(&config(false, false));
    }

    #[test]
    #[should_panic(expected = "COACH_API_KEY")]
    fn validate_rejects_real_mode_without_key() {
        CoachProvider::validate_config(&CoachConfig {
            enabled: true,
            mock: false,
            api_url: "https://example.invalid".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 1,
        });
    }
}
