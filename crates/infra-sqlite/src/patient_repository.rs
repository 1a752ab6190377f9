// SQLite PatientRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use qflow_core::domain::{NewPatient, Patient, PatientId};
use qflow_core::error::Result;
use qflow_core::port::PatientRepository;
use sqlx::SqlitePool;

pub struct SqlitePatientRepository {
    pool: SqlitePool,
}

impl SqlitePatientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for SqlitePatientRepository {
    async fn insert(&self, patient: &NewPatient) -> Result<Patient> {
        let result = sqlx::query(
            r#"
            INSERT INTO patients (name, address, age, contact_number)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&patient.name)
        .bind(&patient.address)
        .bind(patient.age)
        .bind(&patient.contact_number)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Patient::from_new(result.last_insert_rowid(), patient.clone()))
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>> {
        let row = sqlx::query_as::<_, PatientRow>("SELECT * FROM patients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PatientRow::into_patient))
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct PatientRow {
    id: i64,
    name: String,
    address: String,
    age: i32,
    contact_number: String,
}

impl PatientRow {
    fn into_patient(self) -> Patient {
        Patient {
            id: self.id,
            name: self.name,
            address: self.address,
            age: self.age,
            contact_number: self.contact_number,
        }
    }
}
