use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::error::SessionError;

// High-water mark of issued ids. Generation takes max(now, last + 1) so
// two sessions created within the same millisecond still get distinct,
// strictly increasing ids.
static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Unique token identifying one recording session.
///
/// Used as the filename prefix for all of the session's artifacts, which
/// is what keeps concurrent or back-to-back sessions from clobbering each
/// other's files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh id from the current time in Unix milliseconds.
    pub fn generate() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match LAST_ISSUED.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(candidate.to_string()),
                Err(observed) => last = observed,
            }
        }
    }

    /// Wraps a caller-supplied token, for hosts that manage their own ids.
    ///
    /// The token becomes a filename prefix, so it must be non-empty and
    /// must not contain path separators.
    pub fn new(token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionError::Configuration(
                "session id must not be empty".to_string(),
            ));
        }
        if token.contains(['/', '\\']) {
            return Err(SessionError::Configuration(format!(
                "session id '{token}' must not contain path separators"
            )));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_increasing() {
        let ids: Vec<SessionId> = (0..200).map(|_| SessionId::generate()).collect();

        for pair in ids.windows(2) {
            let a: i64 = pair[0].as_str().parse().unwrap();
            let b: i64 = pair[1].as_str().parse().unwrap();
            assert!(b > a, "ids must be strictly increasing: {a} then {b}");
        }
    }

    #[test]
    fn custom_ids_are_validated() {
        assert!(SessionId::new("meeting-42").is_ok());
        assert!(matches!(
            SessionId::new(""),
            Err(SessionError::Configuration(_))
        ));
        assert!(matches!(
            SessionId::new("../escape"),
            Err(SessionError::Configuration(_))
        ));
    }
}
