// Patient Repository Port (Interface)

use crate::domain::{NewPatient, Patient, PatientId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Patient persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Insert a new patient, returning it with its store-generated ID
    async fn insert(&self, patient: &NewPatient) -> Result<Patient>;

    /// Find patient by ID
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>>;
}
