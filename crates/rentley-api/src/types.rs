// Wire types for the platform REST API
//
// Field names follow the backend's camelCase JSON. `#[serde(default)]` is
// used liberally because the API is inconsistent about field presence
// across endpoints (list vs. detail views, nested vs. flattened user
// info). The stored-procedure bridge keeps its PascalCase envelope.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
}

// ── User ─────────────────────────────────────────────────────────────

/// User object from `/auth/login`, `/auth/profile`, and rental nesting.
///
/// The role arrives either as a structured `userRole` object or as a
/// bare `role` string depending on which backend layer produced the
/// response; both are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub user_role: Option<UserRoleDto>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleDto {
    pub role_id: i64,
    pub role_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ── Vehicle ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub vehicle_id: i64,
    pub vehicle_registration: String,
    pub daily_rental_rate: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub vehicle_description: Option<String>,
    #[serde(default)]
    pub model: Option<VehicleModelDto>,
    #[serde(default)]
    pub current_status: Option<VehicleStatusDto>,
    #[serde(default)]
    pub current_location: Option<LocationDto>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModelDto {
    #[serde(default)]
    pub model_id: i64,
    pub model_name: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub seating_capacity: Option<u32>,
    #[serde(default)]
    pub brand: Option<VehicleBrandDto>,
    #[serde(default)]
    pub category: Option<VehicleCategoryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleBrandDto {
    #[serde(default)]
    pub brand_id: i64,
    pub brand_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCategoryDto {
    #[serde(default)]
    pub category_id: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatusDto {
    #[serde(default)]
    pub status_id: i64,
    pub status_name: String,
    #[serde(default)]
    pub is_available_for_rent: bool,
}

/// Search filter payload for `POST /vehicles/search`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

// ── Location ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub location_id: i64,
    pub location_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub city: Option<CityDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    #[serde(default)]
    pub city_id: i64,
    pub city_name: String,
}

// ── Pricing ──────────────────────────────────────────────────────────

/// Breakdown payload from `GET /pricing/breakdown`.
///
/// Every field is optional: depending on backend version the response
/// carries either an itemized breakdown (`basePrice`, `taxAmount`, ...)
/// or just the raw inputs (`baseRate`, `totalDays`, `weekendDays`,
/// `totalPrice`). The estimator normalizes both shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownDto {
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub weekend_surcharge: Option<f64>,
    #[serde(default)]
    pub seasonal_adjustment: Option<f64>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub tax_amount: Option<f64>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub total_days: Option<i64>,
    #[serde(default)]
    pub average_rate: Option<f64>,
    #[serde(default)]
    pub base_rate: Option<f64>,
    #[serde(default)]
    pub weekend_days: Option<i64>,
}

// ── Rentals ──────────────────────────────────────────────────────────

/// Request body for the rental-creation stored procedure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub pickup_location_id: i64,
    pub return_location_id: i64,
    pub planned_pickup_date: NaiveDateTime,
    pub planned_return_date: NaiveDateTime,
    pub created_by: i64,
}

/// Outcome envelope of the rental-creation stored procedure.
///
/// PascalCase on the wire -- the bridge passes SQL output parameters
/// through verbatim. Success is signalled by `IsSuccess` OR the mere
/// presence of `RentalID`, depending on procedure version.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRentalOutcome {
    #[serde(default, rename = "IsSuccess")]
    pub is_success: Option<bool>,
    #[serde(default, rename = "RentalID")]
    pub rental_id: Option<i64>,
    #[serde(default, rename = "TotalAmount")]
    pub total_amount: Option<f64>,
    #[serde(default, rename = "ErrorMessage")]
    pub error_message: Option<String>,
}

impl CreateRentalOutcome {
    /// Whether the procedure reported success.
    pub fn succeeded(&self) -> bool {
        self.is_success.unwrap_or(false) || self.rental_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalDto {
    pub rental_id: i64,
    #[serde(default)]
    pub planned_pickup_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub planned_return_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub actual_pickup_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub actual_return_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rental_status: Option<RentalStatusDto>,
    #[serde(default)]
    pub vehicle: Option<VehicleDto>,
    #[serde(default)]
    pub pickup_location: Option<LocationDto>,
    #[serde(default)]
    pub return_location: Option<LocationDto>,
    #[serde(default)]
    pub customer: Option<UserDto>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalStatusDto {
    pub status_id: i32,
    pub status_name: String,
    #[serde(default)]
    pub status_description: Option<String>,
}

// ── Pagination ───────────────────────────────────────────────────────

/// Spring-style page envelope for paginated listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
}
