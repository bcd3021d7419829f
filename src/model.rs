use serde::Deserialize;

/// A generated quiz as returned by `POST /generate_quiz` and `GET /quiz/{id}`.
/// The service names the question array `quiz`.
#[derive(Debug, Clone, Deserialize)]
pub struct Quiz {
    #[serde(default)]
    pub id: Option<i64>,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub related_topics: Vec<String>,
    #[serde(rename = "quiz", default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Header text: title when present, source URL otherwise.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// One row of `GET /history`. `date_generated` carries no timezone
/// designator and is UTC (see `timefmt`).
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub date_generated: Option<String>,
}

/// Best-effort article lookup from `GET /preview`.
#[derive(Debug, Clone, Deserialize)]
pub struct Preview {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
}
