//! Premium upgrade payment proofs.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{PaymentProof, TABLE_PAYMENT_PROOFS};

use crate::store::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Record a proof for admin review. `Unavailable` when the proofs table
    /// is not provisioned.
    async fn submit(&self, proof: PaymentProof) -> AppResult<()>;
}

pub struct PaymentStore {
    store: Arc<dyn RecordStore>,
}

impl PaymentStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn submit(&self, proof: PaymentProof) -> AppResult<()> {
        self.store
            .insert(TABLE_PAYMENT_PROOFS, serde_json::to_value(&proof)?)
            .await
    }
}
