//! Premium upgrade requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Review state of a submitted payment proof
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Payment proof a seller submits to request premium membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentProof {
    pub user_id: UserId,
    pub file_name: String,
    pub file_size: u64,
    pub status: ProofStatus,
    pub uploaded_at: DateTime<Utc>,
}

impl PaymentProof {
    pub fn pending(user_id: impl Into<UserId>, file_name: impl Into<String>, file_size: u64) -> Self {
        Self {
            user_id: user_id.into(),
            file_name: file_name.into(),
            file_size,
            status: ProofStatus::Pending,
            uploaded_at: Utc::now(),
        }
    }
}
