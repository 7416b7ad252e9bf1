use thiserror::Error;

/// Error type for match session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("net index {index} out of range for {count} nets")]
    NetIndexOutOfRange { index: u32, count: u32 },

    #[error("no active match")]
    NoActiveMatch,

    #[error("a match is already active")]
    MatchAlreadyActive,

    #[error("match duration must be at least one minute")]
    InvalidDuration,

    #[error("number of nets must be at least one")]
    InvalidNetCount,

    #[error("unknown alarm: {0}")]
    AlarmNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display() {
        let err = CoreError::NetIndexOutOfRange { index: 4, count: 3 };
        assert_eq!(err.to_string(), "net index 4 out of range for 3 nets");

        let err = CoreError::NoActiveMatch;
        assert_eq!(err.to_string(), "no active match");

        let err = CoreError::AlarmNotFound("abc-123".to_string());
        assert_eq!(err.to_string(), "unknown alarm: abc-123");

        let err = CoreError::InvalidNetCount;
        assert_eq!(err.to_string(), "number of nets must be at least one");
    }
}
