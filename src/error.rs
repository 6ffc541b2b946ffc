use thiserror::Error;

/// Configuration problems surfaced while resolving a profile set.
///
/// These are fatal at setup time: a planner is never constructed from a
/// malformed profile set, so planning itself has no error path.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unknown completion profile set `{0}`")]
    UnknownProfileSet(String),

    #[error("profile set `{0}` is not a mapping of profile name to profile")]
    InvalidProfileSet(String),

    #[error("invalid profile `{profile}` in set `{set}`: {source}")]
    InvalidProfile {
        set: String,
        profile: String,
        #[source]
        source: serde_json::Error,
    },
}
