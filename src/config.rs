use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Scoring policy for the result aggregator. The mapping from sub-scores to
/// a severity label is a product decision, not derivable from the data, so
/// it is carried as explicit state and overridable from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub facial_weight: f64,
    pub vocal_weight: f64,
    pub linguistic_weight: f64,
    pub heartbeat_weight: f64,
    /// BPM mapped to zero distress.
    pub resting_bpm: f64,
    /// BPM mapped to maximum distress.
    pub elevated_bpm: f64,
    /// Upper bounds (inclusive) of the 0..27 severity index for the first
    /// four labels; anything above the last bound is "Severe".
    pub label_bounds: [f64; 4],
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            facial_weight: 1.0,
            vocal_weight: 1.0,
            linguistic_weight: 1.0,
            heartbeat_weight: 1.0,
            resting_bpm: 70.0,
            elevated_bpm: 100.0,
            label_bounds: [4.0, 9.0, 14.0, 19.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub scoring: ScoringConfig,
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}

/// Parse "4,9,14,19"-style label bounds. Exactly four values, strictly
/// ascending; anything else falls back to the defaults.
fn parse_label_bounds(raw: &str) -> Option<[f64; 4]> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(str::trim)
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    let bounds: [f64; 4] = parts.try_into().ok()?;
    if bounds.windows(2).all(|w| w[0] < w[1]) {
        Some(bounds)
    } else {
        None
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "mindtrace".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "mindtrace-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            facial_weight: env_f64("SCORING_FACIAL_WEIGHT", defaults.facial_weight),
            vocal_weight: env_f64("SCORING_VOCAL_WEIGHT", defaults.vocal_weight),
            linguistic_weight: env_f64("SCORING_LINGUISTIC_WEIGHT", defaults.linguistic_weight),
            heartbeat_weight: env_f64("SCORING_HEARTBEAT_WEIGHT", defaults.heartbeat_weight),
            resting_bpm: env_f64("SCORING_RESTING_BPM", defaults.resting_bpm),
            elevated_bpm: env_f64("SCORING_ELEVATED_BPM", defaults.elevated_bpm),
            label_bounds: std::env::var("SCORING_LABEL_BOUNDS")
                .ok()
                .and_then(|v| parse_label_bounds(&v))
                .unwrap_or(defaults.label_bounds),
        };
        Ok(Self {
            database_url,
            jwt,
            scoring,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_defaults_are_phq9_bounds() {
        let s = ScoringConfig::default();
        assert_eq!(s.label_bounds, [4.0, 9.0, 14.0, 19.0]);
        assert!(s.resting_bpm < s.elevated_bpm);
    }

    #[test]
    fn label_bounds_parse_from_csv() {
        assert_eq!(parse_label_bounds("4,9,14,19"), Some([4.0, 9.0, 14.0, 19.0]));
        assert_eq!(
            parse_label_bounds(" 3.5, 8 , 13, 18.5 "),
            Some([3.5, 8.0, 13.0, 18.5])
        );
    }

    #[test]
    fn bad_label_bounds_are_rejected() {
        // wrong arity
        assert_eq!(parse_label_bounds("4,9"), None);
        assert_eq!(parse_label_bounds("4,9,14,19,24"), None);
        // not ascending
        assert_eq!(parse_label_bounds("9,4,14,19"), None);
        assert_eq!(parse_label_bounds("4,4,14,19"), None);
        // not numbers
        assert_eq!(parse_label_bounds("a,b,c,d"), None);
    }

    #[test]
    fn from_env_honors_scoring_overrides() {
        std::env::set_var("DATABASE_URL", "postgres://postgres@localhost/postgres");
        std::env::set_var("JWT_SECRET", "test-secret");
        std::env::set_var("SCORING_LABEL_BOUNDS", "3,8,13,18");
        std::env::set_var("SCORING_FACIAL_WEIGHT", "2.5");

        let cfg = AppConfig::from_env().expect("config should load");
        assert_eq!(cfg.scoring.label_bounds, [3.0, 8.0, 13.0, 18.0]);
        assert_eq!(cfg.scoring.facial_weight, 2.5);

        std::env::remove_var("SCORING_LABEL_BOUNDS");
        std::env::remove_var("SCORING_FACIAL_WEIGHT");
    }
}
