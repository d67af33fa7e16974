use crate::error::AppError;
use crate::models::{Motorcycle, MotorcycleFilter, MotorcycleRequest};
use crate::repository::RepositoryState;

/// MotorcycleService
///
/// The business layer between the handlers and the repository. It owns the
/// rules that are not expressible as a single query: payload validation,
/// the license plate uniqueness check on create, and existence checks that turn into 404s.
///
/// Cloning is cheap; the repository is behind an `Arc`.
#[derive(Clone)]
pub struct MotorcycleService {
    repo: RepositoryState,
}

impl MotorcycleService {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Motorcycle>, AppError> {
        self.list(MotorcycleFilter::default()).await
    }

    pub async fn list(&self, filter: MotorcycleFilter) -> Result<Vec<Motorcycle>, AppError> {
        Ok(self.repo.list(&filter).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Motorcycle, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound(id))
    }

    /// create
    ///
    /// Validation runs before any lookup, so an invalid payload with a taken
    /// plate is reported as a 400 rather than a 409.
    pub async fn create(&self, request: MotorcycleRequest) -> Result<Motorcycle, AppError> {
        let fields = request.validate().map_err(AppError::Validation)?;

        if self.repo.find_by_plate(&fields.license_plate).await?.is_some() {
            tracing::warn!(plate = %fields.license_plate, "rejected duplicate license plate");
            return Err(AppError::DuplicatePlate(fields.license_plate));
        }

        let created = self.repo.insert(fields).await?;
        tracing::info!(id = created.id, plate = %created.license_plate, "motorcycle created");
        Ok(created)
    }

    /// update
    ///
    /// Replaces the descriptive fields of an existing motorcycle. The license
    /// plate is the natural key and stays as registered, whatever the payload
    /// carries, so an update never conflicts on it.
    pub async fn update(&self, id: i64, request: MotorcycleRequest) -> Result<Motorcycle, AppError> {
        let mut fields = request.validate().map_err(AppError::Validation)?;

        let current = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound(id))?;

        if current.license_plate != fields.license_plate {
            tracing::debug!(id, ignored = %fields.license_plate, "plate change ignored on update");
        }
        fields.license_plate = current.license_plate;

        // The row can disappear between the lookup and the write.
        let updated = self.repo.update(id, fields).await?.ok_or(AppError::NotFound(id))?;
        tracing::info!(id, "motorcycle updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.repo.delete(id).await? {
            tracing::info!(id, "motorcycle deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(id))
        }
    }

    pub async fn by_brand(&self, brand: &str) -> Result<Vec<Motorcycle>, AppError> {
        self.list(MotorcycleFilter::by_brand(brand)).await
    }

    pub async fn by_model(&self, model: &str) -> Result<Vec<Motorcycle>, AppError> {
        self.list(MotorcycleFilter::by_model(model)).await
    }

    pub async fn by_active(&self, active: bool) -> Result<Vec<Motorcycle>, AppError> {
        self.list(MotorcycleFilter::by_active(active)).await
    }

    pub async fn by_plate(&self, license_plate: &str) -> Result<Motorcycle, AppError> {
        self.repo
            .find_by_plate(license_plate)
            .await?
            .ok_or_else(|| AppError::PlateNotFound(license_plate.to_string()))
    }
}
