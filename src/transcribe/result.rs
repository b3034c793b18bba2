use serde::{Deserialize, Serialize};

/// Structured output of the transcription engine.
///
/// All fields are pass-through data from the engine's own output format;
/// nothing here is computed or validated beyond the structure itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub segments: Vec<Segment>,
    pub language: String,
}

/// One timed segment of the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,
    pub seek: f64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub tokens: Vec<i64>,
    pub temperature: f64,
}
