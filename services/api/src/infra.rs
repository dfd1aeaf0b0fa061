use course_advisor::error::AppError;
use course_advisor::workflows::assessment::{
    ProfileRepository, RepositoryError, StudentId, StudentProfileRecord,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    records: Arc<Mutex<HashMap<StudentId, StudentProfileRecord>>>,
}

impl InMemoryProfileRepository {
    pub(crate) fn seeded(records: impl IntoIterator<Item = StudentProfileRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.student_id.clone(), record))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<StudentId, StudentProfileRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("profile store lock poisoned".to_string()))
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentProfileRecord>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn upsert(&self, record: StudentProfileRecord) -> Result<StudentProfileRecord, RepositoryError> {
        self.lock()?
            .insert(record.student_id.clone(), record.clone());
        Ok(record)
    }

    fn students(&self) -> Result<Vec<StudentProfileRecord>, RepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}

/// Deserialize a JSON document from `path`, or from stdin when `path` is `-`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    if path.as_os_str() == "-" {
        let stdin = io::stdin();
        return Ok(serde_json::from_reader(stdin.lock())?);
    }

    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
