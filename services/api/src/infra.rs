use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(test)]
use std::{collections::HashMap, sync::Mutex};

#[cfg(test)]
use gummy_mummy::profile::{ClientId, ClientProfile, NewClient};
#[cfg(test)]
use gummy_mummy::store::{ArchiveEntry, ClientRepository, StoreError, SubmissionArchive};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory doubles mirroring the SQLite store, so router tests run
/// without touching disk.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct InMemoryClientRepository {
    profiles: Mutex<HashMap<ClientId, ClientProfile>>,
    next_id: Mutex<ClientId>,
}

#[cfg(test)]
impl ClientRepository for InMemoryClientRepository {
    fn insert(&self, client: &NewClient) -> Result<ClientProfile, StoreError> {
        let mut next_id = self.next_id.lock().expect("id counter poisoned");
        *next_id += 1;
        let id = *next_id;

        let profile = ClientProfile {
            id,
            name: client.name.clone(),
            age: client.age,
            marital_status: client.marital_status,
            phone: client.phone.clone(),
            email: client.email.clone(),
            is_first_child: client.is_first_child.unwrap_or(false),
            is_breastfeeding: client.is_breastfeeding.unwrap_or(false),
            baby_age_months: client.baby_age_months,
            baby_gender: client.baby_gender,
            created_at: chrono::Utc::now(),
        };

        self.profiles
            .lock()
            .expect("profile table poisoned")
            .insert(id, profile.clone());
        Ok(profile)
    }

    fn fetch(&self, id: ClientId) -> Result<Option<ClientProfile>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .expect("profile table poisoned")
            .get(&id)
            .cloned())
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct InMemoryArchive {
    entries: Mutex<Vec<ArchiveEntry>>,
}

#[cfg(test)]
impl SubmissionArchive for InMemoryArchive {
    fn append(&self, entry: ArchiveEntry) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("archive poisoned")
            .push(entry);
        Ok(())
    }

    fn history(&self, client_id: ClientId) -> Result<Vec<ArchiveEntry>, StoreError> {
        Ok(self
            .entries
            .lock()
            .expect("archive poisoned")
            .iter()
            .filter(|entry| entry.client_id == client_id)
            .cloned()
            .collect())
    }
}
