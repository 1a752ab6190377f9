// Patient Lookup Use Case

use crate::domain::{Patient, PatientId};
use crate::error::{AppError, Result};
use crate::port::PatientRepository;

pub async fn execute(patient_repo: &dyn PatientRepository, id: PatientId) -> Result<Patient> {
    patient_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Patient {} not found", id)))
}
