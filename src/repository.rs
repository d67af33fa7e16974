use crate::error::RepositoryError;
use crate::models::{Motorcycle, MotorcycleFields, MotorcycleFilter};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// MotorcycleRepository
///
/// Defines the abstract contract for all persistence operations on the
/// `motorcycles` table. Handlers and the service only see this trait, so the
/// Postgres implementation can be swapped for an in-memory one in tests.
///
/// **Send + Sync + async_trait** are required to share the trait object
/// (`Arc<dyn MotorcycleRepository>`) across Axum's task boundaries.
#[async_trait]
pub trait MotorcycleRepository: Send + Sync {
    // Every row matching the filter, ordered by id.
    async fn list(&self, filter: &MotorcycleFilter) -> RepositoryResult<Vec<Motorcycle>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Motorcycle>>;
    async fn find_by_plate(&self, license_plate: &str) -> RepositoryResult<Option<Motorcycle>>;

    async fn insert(&self, fields: MotorcycleFields) -> RepositoryResult<Motorcycle>;
    // Overwrites every column. `None` when the id does not exist.
    async fn update(&self, id: i64, fields: MotorcycleFields) -> RepositoryResult<Option<Motorcycle>>;
    // `false` when the id does not exist.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn MotorcycleRepository>;

const SELECT_COLUMNS: &str =
    "SELECT id, brand, model, year, license_plate, mileage, description, active FROM motorcycles";

/// PostgresRepository
///
/// The concrete implementation of `MotorcycleRepository`, backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translates a unique violation on the plate column into its own variant.
fn map_write_error(err: sqlx::Error, license_plate: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::DuplicatePlate(license_plate.to_string())
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl MotorcycleRepository for PostgresRepository {
    /// list
    ///
    /// Builds the WHERE clause with QueryBuilder so every filter value is a
    /// bound parameter, never interpolated into the SQL text.
    async fn list(&self, filter: &MotorcycleFilter) -> RepositoryResult<Vec<Motorcycle>> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(SELECT_COLUMNS);
        builder.push(" WHERE TRUE");

        if let Some(brand) = &filter.brand {
            builder.push(" AND brand = ");
            builder.push_bind(brand.clone());
        }

        if let Some(model) = &filter.model {
            builder.push(" AND model = ");
            builder.push_bind(model.clone());
        }

        if let Some(active) = filter.active {
            builder.push(" AND active = ");
            builder.push_bind(active);
        }

        builder.push(" ORDER BY id ASC");

        let rows = builder
            .build_query_as::<Motorcycle>()
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| tracing::error!("list motorcycles error: {:?}", e))?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Motorcycle>> {
        let row = sqlx::query_as::<_, Motorcycle>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .inspect_err(|e| tracing::error!("find_by_id error: {:?}", e))?;
        Ok(row)
    }

    async fn find_by_plate(&self, license_plate: &str) -> RepositoryResult<Option<Motorcycle>> {
        let row = sqlx::query_as::<_, Motorcycle>(&format!(
            "{SELECT_COLUMNS} WHERE license_plate = $1"
        ))
        .bind(license_plate)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!("find_by_plate error: {:?}", e))?;
        Ok(row)
    }

    /// insert
    ///
    /// Returns the stored row, including the id assigned by the sequence.
    async fn insert(&self, fields: MotorcycleFields) -> RepositoryResult<Motorcycle> {
        sqlx::query_as::<_, Motorcycle>(
            r#"
            INSERT INTO motorcycles (brand, model, year, license_plate, mileage, description, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, brand, model, year, license_plate, mileage, description, active
            "#,
        )
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(fields.year)
        .bind(&fields.license_plate)
        .bind(fields.mileage)
        .bind(&fields.description)
        .bind(fields.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &fields.license_plate))
    }

    async fn update(&self, id: i64, fields: MotorcycleFields) -> RepositoryResult<Option<Motorcycle>> {
        sqlx::query_as::<_, Motorcycle>(
            r#"
            UPDATE motorcycles
            SET brand = $2,
                model = $3,
                year = $4,
                license_plate = $5,
                mileage = $6,
                description = $7,
                active = $8
            WHERE id = $1
            RETURNING id, brand, model, year, license_plate, mileage, description, active
            "#,
        )
        .bind(id)
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(fields.year)
        .bind(&fields.license_plate)
        .bind(fields.mileage)
        .bind(&fields.description)
        .bind(fields.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &fields.license_plate))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM motorcycles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .inspect_err(|e| tracing::error!("delete error: {:?}", e))?;
        Ok(result.rows_affected() > 0)
    }
}
