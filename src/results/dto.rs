use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result_id: i64,
    pub session_id: i64,
    pub facial_score: Option<f64>,
    pub vocal_score: Option<f64>,
    pub linguistic_score: Option<f64>,
    pub heartbeat_score: Option<f64>,
    pub final_label: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<crate::results::repo::AssessmentResult> for ResultResponse {
    fn from(r: crate::results::repo::AssessmentResult) -> Self {
        Self {
            result_id: r.result_id,
            session_id: r.session_id,
            facial_score: r.facial_score,
            vocal_score: r.vocal_score,
            linguistic_score: r.linguistic_score,
            heartbeat_score: r.heartbeat_score,
            final_label: r.final_label,
            created_at: r.created_at,
        }
    }
}
