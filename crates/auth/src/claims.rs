use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trattoria_core::UserId;

use crate::Identity;

/// Session token claims (transport-agnostic).
///
/// `role` is whatever tag the identity provider stored for the user; it is not
/// checked against [`crate::Role`] here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,

    #[serde(default)]
    pub role: Option<String>,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    pub fn into_identity(self) -> Identity {
        Identity::new(self.sub, self.role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("session has expired")]
    Expired,

    #[error("session not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate session claims.
///
/// Signature verification happens in whichever provider decoded the token.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_offset: i64, ttl: i64) -> (SessionClaims, DateTime<Utc>) {
        let now = Utc::now();
        let issued_at = now + Duration::seconds(issued_offset);
        (
            SessionClaims {
                sub: UserId::new(),
                role: Some("waiter".to_string()),
                issued_at,
                expires_at: issued_at + Duration::seconds(ttl),
            },
            now,
        )
    }

    #[test]
    fn accepts_live_session() {
        let (c, now) = claims(-10, 600);
        assert_eq!(validate_claims(&c, now), Ok(()));
    }

    #[test]
    fn rejects_expired_future_and_inverted() {
        let (c, now) = claims(-600, 60);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::Expired));

        let (c, now) = claims(60, 600);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotYetValid));

        let (c, now) = claims(-10, 0);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::InvalidTimeWindow));
    }

    #[test]
    fn role_is_optional_on_the_wire() {
        let json = serde_json::json!({
            "sub": UserId::new(),
            "issued_at": Utc::now(),
            "expires_at": Utc::now() + Duration::minutes(5),
        });
        let c: SessionClaims = serde_json::from_value(json).unwrap();
        assert_eq!(c.role, None);
        assert_eq!(c.into_identity().role(), None);
    }
}
