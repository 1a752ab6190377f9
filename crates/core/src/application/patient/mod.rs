// Patient Service - registration and lookup

pub mod lookup;
pub mod register;

use crate::domain::{NewPatient, Patient, PatientId};
use crate::error::Result;
use crate::port::PatientRepository;
use std::sync::Arc;

/// Patient Service
pub struct PatientService {
    patient_repo: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(patient_repo: Arc<dyn PatientRepository>) -> Self {
        Self { patient_repo }
    }

    /// Register a new patient
    pub async fn register(&self, req: NewPatient) -> Result<Patient> {
        register::execute(self.patient_repo.as_ref(), req).await
    }

    /// Fetch a patient by ID (NotFound if absent)
    pub async fn get(&self, id: PatientId) -> Result<Patient> {
        lookup::execute(self.patient_repo.as_ref(), id).await
    }
}
