//! Mock signed-in identity. No credentials are stored or checked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use marketplace_core::{DomainError, DomainResult, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub session_id: SessionId,
    pub display_name: String,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

impl Profile {
    pub fn sign_in(
        display_name: &str,
        email: &str,
        signed_in_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let display_name = display_name.trim();
        let email = email.trim();

        if display_name.is_empty() {
            return Err(DomainError::validation("display name cannot be empty"));
        }

        // Shape check only: something@something.
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(DomainError::validation(format!("invalid email: {email}"))),
        }

        Ok(Self {
            session_id: SessionId::new(),
            display_name: display_name.to_string(),
            email: email.to_string(),
            signed_in_at,
        })
    }
}
