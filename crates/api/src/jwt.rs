//! HS256 session tokens carrying [`SessionClaims`].

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use trattoria_auth::{Identity, IdentityError, IdentityProvider, SessionClaims, validate_claims};

pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Session time windows live in `issued_at`/`expires_at` and are checked
        // by `validate_claims`, not via the registered `exp` claim.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;
        validate_claims(&data.claims, Utc::now())?;
        Ok(Some(data.claims.into_identity()))
    }
}
