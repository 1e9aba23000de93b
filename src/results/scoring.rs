//! Pure aggregation of a session's answers into sub-scores and a severity
//! label. Deterministic and monotone: raising any distress signal can only
//! keep or raise the final label.

use crate::answers::repo::Answer;
use crate::config::ScoringConfig;
use crate::error::ApiError;

pub const LABELS: [&str; 5] = [
    "None-Minimal",
    "Mild",
    "Moderate",
    "Moderately Severe",
    "Severe",
];

/// Aggregated outcome for one session. Sub-scores are None when no answer
/// carried the corresponding signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Scores {
    pub facial: Option<f64>,
    pub vocal: Option<f64>,
    pub linguistic: Option<f64>,
    pub heartbeat: Option<f64>,
    pub final_label: &'static str,
}

/// Distress weight of an emotion label on a 0..3 scale. Unknown labels sit
/// at the neutral midpoint.
fn emotion_weight(label: &str) -> f64 {
    match label.to_ascii_lowercase().as_str() {
        "happy" => 0.0,
        "surprise" => 0.5,
        "neutral" => 1.0,
        "disgust" => 2.0,
        "fear" | "angry" => 2.5,
        "sad" => 3.0,
        _ => 1.0,
    }
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Distress carried by one vocal feature payload: the detected emotion when
/// the capture side labelled one, otherwise the clamped mean of whatever
/// numeric measurements it sent.
fn vocal_distress(payload: &serde_json::Value) -> Option<f64> {
    let obj = payload.as_object()?;
    if let Some(emotion) = obj.get("emotion").and_then(|v| v.as_str()) {
        return Some(emotion_weight(emotion));
    }
    let numeric: Vec<f64> = obj
        .values()
        .filter_map(|v| v.as_f64())
        .map(|v| clamp(v, 0.0, 3.0))
        .collect();
    mean(&numeric)
}

fn facial_score(answers: &[Answer]) -> Option<f64> {
    let weights: Vec<f64> = answers
        .iter()
        .filter_map(|a| a.facial_emotion.as_deref())
        .map(emotion_weight)
        .collect();
    mean(&weights)
}

fn vocal_score(answers: &[Answer]) -> Option<f64> {
    let values: Vec<f64> = answers
        .iter()
        .filter_map(|a| a.vocal_features.as_ref())
        .filter_map(vocal_distress)
        .collect();
    mean(&values)
}

fn linguistic_score(answers: &[Answer]) -> Option<f64> {
    let values: Vec<f64> = answers.iter().filter_map(|a| a.linguistic_score).collect();
    mean(&values)
}

fn heartbeat_score(answers: &[Answer]) -> Option<f64> {
    let values: Vec<f64> = answers
        .iter()
        .filter_map(|a| a.heartbeat)
        .map(f64::from)
        .collect();
    mean(&values)
}

/// Combine present sub-scores into a PHQ-9-style 0..27 severity index.
/// Each modality is first normalized to a 0..3 distress component; absent
/// modalities drop out of the weighted mean entirely.
pub fn severity_index(scores: &Scores, cfg: &ScoringConfig) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    if let Some(f) = scores.facial {
        weighted += cfg.facial_weight * clamp(f, 0.0, 3.0);
        total_weight += cfg.facial_weight;
    }
    if let Some(v) = scores.vocal {
        weighted += cfg.vocal_weight * clamp(v, 0.0, 3.0);
        total_weight += cfg.vocal_weight;
    }
    if let Some(l) = scores.linguistic {
        // Sentiment polarity is -1..1 with positive meaning well; invert
        // onto the distress scale.
        let distress = (1.0 - clamp(l, -1.0, 1.0)) / 2.0 * 3.0;
        weighted += cfg.linguistic_weight * distress;
        total_weight += cfg.linguistic_weight;
    }
    if let Some(h) = scores.heartbeat {
        let span = cfg.elevated_bpm - cfg.resting_bpm;
        let distress = if span > 0.0 {
            clamp((h - cfg.resting_bpm) / span, 0.0, 1.0) * 3.0
        } else {
            0.0
        };
        weighted += cfg.heartbeat_weight * distress;
        total_weight += cfg.heartbeat_weight;
    }

    if total_weight == 0.0 {
        return 0.0;
    }
    9.0 * weighted / total_weight
}

pub fn label_for_index(index: f64, cfg: &ScoringConfig) -> &'static str {
    let [minimal, mild, moderate, moderately_severe] = cfg.label_bounds;
    if index <= minimal {
        LABELS[0]
    } else if index <= mild {
        LABELS[1]
    } else if index <= moderate {
        LABELS[2]
    } else if index <= moderately_severe {
        LABELS[3]
    } else {
        LABELS[4]
    }
}

/// Aggregate a session's answers. A session with no answers cannot be
/// scored and never produces a result row.
pub fn aggregate(answers: &[Answer], cfg: &ScoringConfig) -> Result<Scores, ApiError> {
    if answers.is_empty() {
        return Err(ApiError::InsufficientData("session has no answers"));
    }

    let mut scores = Scores {
        facial: facial_score(answers),
        vocal: vocal_score(answers),
        linguistic: linguistic_score(answers),
        heartbeat: heartbeat_score(answers),
        final_label: LABELS[0],
    };
    scores.final_label = label_for_index(severity_index(&scores, cfg), cfg);
    Ok(scores)
}
