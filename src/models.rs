use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};

// --- Core Application Schemas (Mapped to Database) ---

/// Motorcycle
///
/// Represents a motorcycle record from the `public.motorcycles` table.
/// The same structure is returned by every read and write endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Motorcycle {
    // Surrogate key, assigned by the BIGSERIAL sequence.
    #[ts(type = "number")]
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,

    // Natural key. Enforced unique by `motorcycles_license_plate_key`.
    pub license_plate: String,

    pub mileage: i32,
    pub description: Option<String>,

    // Whether the bike is still part of the shop's working inventory.
    pub active: bool,
}

impl Motorcycle {
    /// Builds the entity for an already-assigned id from a validated payload.
    pub fn from_fields(id: i64, fields: MotorcycleFields) -> Self {
        Self {
            id,
            brand: fields.brand,
            model: fields.model,
            year: fields.year,
            license_plate: fields.license_plate,
            mileage: fields.mileage,
            description: fields.description,
            active: fields.active,
        }
    }
}

// --- Request Payloads (Input Schemas) ---

/// MotorcycleRequest
///
/// Input payload for creating (POST /api/motorcycles) and replacing
/// (PUT /api/motorcycles/{id}) a motorcycle.
///
/// Every field is optional on the wire so a missing value is reported by
/// `validate` with a field-level message instead of a decode failure.
/// Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MotorcycleRequest {
    #[schema(example = "Honda")]
    pub brand: Option<String>,
    #[schema(example = "CB500F")]
    pub model: Option<String>,
    #[schema(example = 2021)]
    pub year: Option<i32>,
    #[schema(example = "ABC-123")]
    pub license_plate: Option<String>,
    #[schema(example = 15000)]
    pub mileage: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Absent or `null` means inactive.
    #[serde(default, deserialize_with = "null_as_false")]
    pub active: bool,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// MotorcycleFields
///
/// The validated field set. Only `MotorcycleRequest::validate` produces one
/// outside of tests, so the persistence layer can assume every invariant holds.
#[derive(Debug, Clone, PartialEq)]
pub struct MotorcycleFields {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub mileage: i32,
    pub description: Option<String>,
    pub active: bool,
}

/// FieldError
///
/// A single validation failure, reported back to the client in the error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl MotorcycleRequest {
    /// validate
    ///
    /// Checks required fields and positivity, collecting every failure rather
    /// than stopping at the first one. Text fields consisting only of
    /// whitespace count as missing.
    pub fn validate(self) -> Result<MotorcycleFields, Vec<FieldError>> {
        let mut errors = Vec::new();

        let brand = required_text("brand", self.brand, &mut errors);
        let model = required_text("model", self.model, &mut errors);
        let year = positive_number("year", self.year, &mut errors);
        let license_plate = required_text("license_plate", self.license_plate, &mut errors);
        let mileage = positive_number("mileage", self.mileage, &mut errors);

        match (brand, model, year, license_plate, mileage) {
            (Some(brand), Some(model), Some(year), Some(license_plate), Some(mileage))
                if errors.is_empty() =>
            {
                Ok(MotorcycleFields {
                    brand,
                    model,
                    year,
                    license_plate,
                    mileage,
                    description: self.description,
                    active: self.active,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required_text(field: &str, value: Option<String>, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            errors.push(FieldError::new(field, &format!("{} is required", field)));
            None
        }
    }
}

fn positive_number(field: &str, value: Option<i32>, errors: &mut Vec<FieldError>) -> Option<i32> {
    match value {
        Some(n) if n > 0 => Some(n),
        Some(_) => {
            errors.push(FieldError::new(field, &format!("{} must be positive", field)));
            None
        }
        None => {
            errors.push(FieldError::new(field, &format!("{} is required", field)));
            None
        }
    }
}

// --- Query Filters ---

/// MotorcycleFilter
///
/// Accepted query parameters for the listing endpoint (GET /api/motorcycles).
/// Every filter is an exact match; provided filters are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MotorcycleFilter {
    /// Only motorcycles of this brand.
    pub brand: Option<String>,
    /// Only motorcycles of this model.
    pub model: Option<String>,
    /// Only active (`true`) or inactive (`false`) motorcycles.
    pub active: Option<bool>,
}

impl MotorcycleFilter {
    pub fn by_brand(brand: impl Into<String>) -> Self {
        Self { brand: Some(brand.into()), ..Self::default() }
    }

    pub fn by_model(model: impl Into<String>) -> Self {
        Self { model: Some(model.into()), ..Self::default() }
    }

    pub fn by_active(active: bool) -> Self {
        Self { active: Some(active), ..Self::default() }
    }
}
