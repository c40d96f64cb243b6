// ── Rental domain types ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Rental lifecycle status.
///
/// The numeric ids are fixed small integers agreed with the backend out
/// of band; `from_id` rejects anything outside the known set instead of
/// guessing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum RentalStatus {
    Reserved,
    Active,
    Overdue,
    Completed,
    Cancelled,
}

impl RentalStatus {
    /// Map a backend status id to a status.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Reserved),
            2 => Some(Self::Active),
            3 => Some(Self::Overdue),
            4 => Some(Self::Completed),
            5 => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The backend status id.
    pub fn id(self) -> i32 {
        match self {
            Self::Reserved => 1,
            Self::Active => 2,
            Self::Overdue => 3,
            Self::Completed => 4,
            Self::Cancelled => 5,
        }
    }
}

/// A rental as listed/read back from the platform.
///
/// Most fields are optional because the backend trims nesting depending
/// on the endpoint (list vs. detail vs. back-office views).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub id: i64,
    pub planned_pickup: Option<NaiveDateTime>,
    pub planned_return: Option<NaiveDateTime>,
    pub total_amount: Option<f64>,
    pub status: Option<RentalStatus>,
    /// Raw status name for display when the id is outside the known set.
    pub status_name: Option<String>,
    pub vehicle_label: Option<String>,
    pub vehicle_registration: Option<String>,
    pub customer_name: Option<String>,
    pub pickup_location: Option<String>,
    pub return_location: Option<String>,
    pub notes: Option<String>,
}

impl Rental {
    /// Status for display: canonical name, raw backend name, or "-".
    pub fn status_label(&self) -> String {
        self.status.map(|s| s.to_string()).unwrap_or_else(|| {
            self.status_name
                .clone()
                .unwrap_or_else(|| "-".to_owned())
        })
    }
}

/// The server-confirmed booking result, held for receipt display.
///
/// Created only by a successful reservation call; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub rental_id: i64,
    pub confirmed_amount: f64,
    pub pickup: NaiveDateTime,
    pub return_at: NaiveDateTime,
    pub total_days: i64,
    pub vehicle_label: String,
    pub vehicle_registration: String,
    pub customer_name: String,
    pub pickup_location: String,
    pub return_location: String,
}
