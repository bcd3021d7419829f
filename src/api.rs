use std::sync::mpsc;
use std::thread;

use crate::model::{HistoryEntry, Preview, Quiz};

/// Client for the quiz service. The origin is fixed at construction; every
/// failure surfaces as one user-facing message string — the response body
/// text when the service sent one, a per-operation fallback otherwise.
/// Callers never see status codes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        // No client-side timeout: the service bounds its own work, and quiz
        // generation can legitimately take a while.
        let http = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| format!("Cannot build HTTP client: {}", e))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn generate_quiz(&self, url: &str) -> Result<Quiz, String> {
        let response = self
            .http
            .post(self.endpoint("/generate_quiz"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .map_err(|e| format!("Cannot reach quiz service: {}", e))?;
        let response = check_response(response, "Failed to generate quiz")?;
        response
            .json::<Quiz>()
            .map_err(|e| format!("Invalid quiz response: {}", e))
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, String> {
        let response = self
            .http
            .get(self.endpoint("/history"))
            .send()
            .map_err(|e| format!("Cannot reach quiz service: {}", e))?;
        let response = check_response(response, "Failed to fetch history")?;
        // Server order is kept as-is.
        response
            .json::<Vec<HistoryEntry>>()
            .map_err(|e| format!("Invalid history response: {}", e))
    }

    pub fn quiz_by_id(&self, id: i64) -> Result<Quiz, String> {
        let response = self
            .http
            .get(self.endpoint(&format!("/quiz/{}", id)))
            .send()
            .map_err(|e| format!("Cannot reach quiz service: {}", e))?;
        let response = check_response(response, "Failed to fetch quiz")?;
        response
            .json::<Quiz>()
            .map_err(|e| format!("Invalid quiz response: {}", e))
    }

    /// Best-effort title/summary lookup. Any failure collapses to one fixed
    /// message; callers treat it as "no preview", never as an error.
    pub fn preview(&self, url: &str) -> Result<Preview, String> {
        const NO_PREVIEW: &str = "No preview available";
        let response = self
            .http
            .get(self.endpoint("/preview"))
            .query(&[("url", url)])
            .send()
            .map_err(|_| NO_PREVIEW.to_string())?;
        if !response.status().is_success() {
            return Err(NO_PREVIEW.to_string());
        }
        response.json::<Preview>().map_err(|_| NO_PREVIEW.to_string())
    }
}

/// Map a non-success response to the uniform error message.
fn check_response(
    response: reqwest::blocking::Response,
    fallback: &str,
) -> Result<reqwest::blocking::Response, String> {
    if response.status().is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(failure_message(&body, fallback))
}

fn failure_message(body: &str, fallback: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}

/// Results delivered back to the event loop. Preview, history and detail
/// carry the generation current when the request was spawned; the loop drops
/// events whose generation has been superseded instead of letting the last
/// response win.
#[derive(Debug)]
pub enum ApiEvent {
    Preview {
        generation: u64,
        result: Result<Preview, String>,
    },
    Generated {
        result: Result<Quiz, String>,
    },
    History {
        generation: u64,
        result: Result<Vec<HistoryEntry>, String>,
    },
    Detail {
        generation: u64,
        result: Result<Quiz, String>,
    },
}

pub fn spawn_preview(client: &ApiClient, url: String, generation: u64, tx: mpsc::Sender<ApiEvent>) {
    let client = client.clone();
    thread::spawn(move || {
        let result = client.preview(&url);
        let _ = tx.send(ApiEvent::Preview { generation, result });
    });
}

pub fn spawn_generate(client: &ApiClient, url: String, tx: mpsc::Sender<ApiEvent>) {
    let client = client.clone();
    thread::spawn(move || {
        let result = client.generate_quiz(&url);
        let _ = tx.send(ApiEvent::Generated { result });
    });
}

pub fn spawn_history(client: &ApiClient, generation: u64, tx: mpsc::Sender<ApiEvent>) {
    let client = client.clone();
    thread::spawn(move || {
        let result = client.history();
        let _ = tx.send(ApiEvent::History { generation, result });
    });
}

pub fn spawn_detail(client: &ApiClient, id: i64, generation: u64, tx: mpsc::Sender<ApiEvent>) {
    let client = client.clone();
    thread::spawn(move || {
        let result = client.quiz_by_id(id);
        let _ = tx.send(ApiEvent::Detail { generation, result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_body_text() {
        assert_eq!(
            failure_message("Quiz not found", "Failed to fetch quiz"),
            "Quiz not found"
        );
        assert_eq!(failure_message("  \n", "Failed to fetch quiz"), "Failed to fetch quiz");
        assert_eq!(failure_message("", "Failed to generate quiz"), "Failed to generate quiz");
    }

    #[test]
    fn endpoint_joins_against_trimmed_base() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.endpoint("/history"), "http://localhost:8000/history");
        assert_eq!(client.endpoint("/quiz/7"), "http://localhost:8000/quiz/7");
    }
}
