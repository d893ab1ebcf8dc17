// libs/scheduling-cell/src/services/clinic.rs
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::SchedulingError;
use crate::models::WorkingHours;

/// Reads a clinic's declared working hours from its profile.
#[async_trait]
pub trait ClinicProfileReader: Send + Sync {
    /// `None` when the clinic has never declared working hours.
    async fn get_working_hours(&self, clinic_id: Uuid) -> Result<Option<WorkingHours>, SchedulingError>;
}

#[derive(Debug, Default)]
pub struct InMemoryClinicDirectory {
    clinics: RwLock<HashMap<Uuid, WorkingHours>>,
}

impl InMemoryClinicDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clinics(clinics: HashMap<Uuid, WorkingHours>) -> Self {
        Self {
            clinics: RwLock::new(clinics),
        }
    }

    /// Replaces a clinic's hours. Slot lists rendered from the old hours are stale.
    pub async fn set_working_hours(&self, clinic_id: Uuid, working_hours: WorkingHours) {
        debug!("Updating working hours for clinic {}", clinic_id);
        self.clinics.write().await.insert(clinic_id, working_hours);
    }

    pub async fn clinic_count(&self) -> usize {
        self.clinics.read().await.len()
    }
}

#[async_trait]
impl ClinicProfileReader for InMemoryClinicDirectory {
    async fn get_working_hours(&self, clinic_id: Uuid) -> Result<Option<WorkingHours>, SchedulingError> {
        Ok(self.clinics.read().await.get(&clinic_id).cloned())
    }
}
