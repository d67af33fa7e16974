#![allow(dead_code)]

use async_trait::async_trait;
use moto_inventory::{
    AppConfig, AppState, RepositoryError,
    models::{Motorcycle, MotorcycleFields, MotorcycleFilter, MotorcycleRequest},
    repository::{MotorcycleRepository, RepositoryResult, RepositoryState},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

// --- IN-MEMORY REPOSITORY ---

// Same semantics as the WHERE clause `PostgresRepository::list` builds.
pub fn filter_matches(filter: &MotorcycleFilter, moto: &Motorcycle) -> bool {
    filter.brand.as_deref().is_none_or(|b| moto.brand == b)
        && filter.model.as_deref().is_none_or(|m| moto.model == m)
        && filter.active.is_none_or(|a| moto.active == a)
}

// Behaves like the Postgres table: sequential ids, id ordering and a unique
// license plate. `fail` turns every call into a database error.
#[derive(Default)]
pub struct InMemoryRepository {
    rows: Mutex<Vec<Motorcycle>>,
    next_id: Mutex<i64>,
    pub fail: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail.store(true, Ordering::SeqCst);
        repo
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl MotorcycleRepository for InMemoryRepository {
    async fn list(&self, filter: &MotorcycleFilter) -> RepositoryResult<Vec<Motorcycle>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|m| filter_matches(filter, m)).cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Motorcycle>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_plate(&self, license_plate: &str) -> RepositoryResult<Option<Motorcycle>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|m| m.license_plate == license_plate).cloned())
    }

    async fn insert(&self, fields: MotorcycleFields) -> RepositoryResult<Motorcycle> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|m| m.license_plate == fields.license_plate) {
            return Err(RepositoryError::DuplicatePlate(fields.license_plate));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let row = Motorcycle::from_fields(*next_id, fields);
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, fields: MotorcycleFields) -> RepositoryResult<Option<Motorcycle>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|m| m.id != id && m.license_plate == fields.license_plate)
        {
            return Err(RepositoryError::DuplicatePlate(fields.license_plate));
        }
        match rows.iter_mut().find(|m| m.id == id) {
            Some(row) => {
                *row = Motorcycle::from_fields(id, fields);
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        Ok(rows.len() < before)
    }
}

// --- TEST UTILITIES ---

pub fn test_state() -> (AppState, Arc<InMemoryRepository>) {
    test_state_with(InMemoryRepository::new())
}

pub fn test_state_with(repo: InMemoryRepository) -> (AppState, Arc<InMemoryRepository>) {
    let repo = Arc::new(repo);
    let state = AppState::new(repo.clone() as RepositoryState, AppConfig::default());
    (state, repo)
}

pub fn request(brand: &str, model: &str, plate: &str) -> MotorcycleRequest {
    MotorcycleRequest {
        brand: Some(brand.to_string()),
        model: Some(model.to_string()),
        year: Some(2021),
        license_plate: Some(plate.to_string()),
        mileage: Some(12_000),
        description: Some("Routine service".to_string()),
        active: true,
    }
}
