use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::errors::FlowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    AirlineAdmin,
}

/// The authenticated identity a booking is submitted under.
///
/// Passed explicitly to whatever needs it; nothing in the flow reads tokens
/// from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buyer {
    pub id: u32,
    pub role: Role,
}

#[derive(Deserialize)]
struct Claims {
    sub: Option<IdClaim>,
    id: Option<IdClaim>,
    role: Option<String>,
}

// Tokens in the wild carry the subject either as a number or as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdClaim {
    Num(u32),
    Text(String),
}

impl IdClaim {
    fn as_u32(&self) -> Option<u32> {
        match self {
            IdClaim::Num(n) => Some(*n),
            IdClaim::Text(s) => s.parse().ok(),
        }
    }
}

impl Buyer {
    /// Decodes a buyer from the payload segment of a JWT.
    ///
    /// Only the claims are read; signature verification is the backend's
    /// job, the token is merely carried back with the submission context.
    /// The buyer id comes from the `sub` claim, falling back to `id`.
    pub fn from_token(token: &str) -> Result<Buyer, FlowError> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| FlowError::InvalidToken("Missing payload segment".to_string()))?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| FlowError::InvalidToken(e.to_string()))?;

        let claims: Claims = serde_json::from_slice(&bytes)
            .map_err(|e| FlowError::InvalidToken(e.to_string()))?;

        let id = claims
            .sub
            .as_ref()
            .and_then(IdClaim::as_u32)
            .or_else(|| claims.id.as_ref().and_then(IdClaim::as_u32))
            .ok_or_else(|| FlowError::InvalidToken("No buyer id claim".to_string()))?;

        let role = match claims.role.as_deref() {
            Some("Airline-Admin") => Role::AirlineAdmin,
            _ => Role::Customer,
        };

        Ok(Buyer { id, role })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::AirlineAdmin
    }
}
