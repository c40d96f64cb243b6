// ── Vehicle domain type ──

use serde::{Deserialize, Serialize};

use super::location::Location;

/// Read-only vehicle snapshot.
///
/// Owned by the remote system; the client holds an immutable copy for
/// the duration of a booking flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub registration: String,
    /// Base daily rate in the platform currency.
    pub daily_rate: f64,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub status: Option<VehicleStatus>,
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleStatus {
    pub name: String,
    pub available_for_rent: bool,
}

impl Vehicle {
    /// "Brand Model" when both are known, otherwise the registration.
    pub fn label(&self) -> String {
        match (self.brand.as_deref(), self.model.as_deref()) {
            (Some(brand), Some(model)) => format!("{brand} {model}"),
            (Some(one), None) | (None, Some(one)) => one.to_owned(),
            (None, None) => self.registration.clone(),
        }
    }

    /// Name of the vehicle's current location, if known.
    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.name.as_str())
    }
}
