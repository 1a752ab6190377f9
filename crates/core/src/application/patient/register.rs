// Register Patient Use Case

use crate::domain::{NewPatient, Patient};
use crate::error::Result;
use crate::port::PatientRepository;
use tracing::info;

/// Execute register use case. Fields are stored exactly as received.
pub async fn execute(patient_repo: &dyn PatientRepository, req: NewPatient) -> Result<Patient> {
    let patient = patient_repo.insert(&req).await?;
    info!(patient_id = patient.id, "Patient registered");
    Ok(patient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::patient_repository::MockPatientRepository;

    #[tokio::test]
    async fn test_register_copies_fields() {
        let mut repo = MockPatientRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|new| Ok(Patient::from_new(1, new.clone())));

        let req = NewPatient {
            name: "".to_string(),
            address: "nowhere".to_string(),
            age: -1,
            contact_number: "n/a".to_string(),
        };

        let patient = execute(&repo, req.clone()).await.unwrap();
        assert_eq!(patient.id, 1);
        assert_eq!(patient.name, req.name);
        assert_eq!(patient.age, -1);
        assert_eq!(patient.contact_number, req.contact_number);
    }
}
