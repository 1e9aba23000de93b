use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: i64,
    pub start_time: OffsetDateTime,
    pub end_time: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn open_session_serializes_null_end_time() {
        let s = SessionResponse {
            session_id: 5,
            start_time: OffsetDateTime::UNIX_EPOCH,
            end_time: None,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"end_time\":null"));
    }
}
