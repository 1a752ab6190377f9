// Patient Domain Model

use serde::{Deserialize, Serialize};

/// Patient ID (store-generated)
pub type PatientId = i64;

/// Registration input. Fields are copied as-is; no validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub address: String,
    pub age: i32,
    pub contact_number: String,
}

/// Patient Entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub address: String,
    pub age: i32,
    pub contact_number: String,
}

impl Patient {
    /// Attach the identity the store assigned on insert.
    pub fn from_new(id: PatientId, new: NewPatient) -> Self {
        Self {
            id,
            name: new.name,
            address: new.address,
            age: new.age,
            contact_number: new.contact_number,
        }
    }
}
