use serde::Deserialize;

/// Body for recording one answer. Signal fields are whatever the capture
/// side managed to observe; all are optional.
#[derive(Debug, Deserialize)]
pub struct RecordAnswerRequest {
    pub question_id: i64,
    pub answer_text: String,
    pub facial_emotion: Option<String>,
    pub vocal_features: Option<serde_json::Value>,
    pub linguistic_score: Option<f64>,
    pub heartbeat: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_body_deserializes() {
        let body: RecordAnswerRequest =
            serde_json::from_str(r#"{"question_id": 3, "answer_text": "sometimes"}"#).unwrap();
        assert_eq!(body.question_id, 3);
        assert!(body.facial_emotion.is_none());
        assert!(body.vocal_features.is_none());
        assert!(body.linguistic_score.is_none());
        assert!(body.heartbeat.is_none());
    }

    #[test]
    fn full_body_deserializes() {
        let body: RecordAnswerRequest = serde_json::from_str(
            r#"{
                "question_id": 1,
                "answer_text": "nearly every day",
                "facial_emotion": "sad",
                "vocal_features": {"emotion": "sad", "energy": 0.4},
                "linguistic_score": -0.62,
                "heartbeat": 88
            }"#,
        )
        .unwrap();
        assert_eq!(body.facial_emotion.as_deref(), Some("sad"));
        assert_eq!(body.heartbeat, Some(88));
        assert_eq!(body.vocal_features.unwrap()["emotion"], "sad");
    }
}
