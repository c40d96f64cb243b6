// Rental endpoints
//
// Availability checking and reservation creation go through the
// database-integration bridge (a SQL function and a stored procedure
// exposed over REST); everything else is a plain resource controller.

use chrono::NaiveDateTime;
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{CreateRentalOutcome, CreateRentalRequest, RentalDto};

/// Timestamp format the bridge expects: local date-time, no zone.
fn bridge_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

impl ApiClient {
    /// Check whether a vehicle is free for the whole window.
    ///
    /// `GET /database-integration/functions/is-vehicle-available` --
    /// returns a bare JSON boolean.
    pub async fn is_vehicle_available(
        &self,
        vehicle_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<bool, Error> {
        let url = self.api_url("database-integration/functions/is-vehicle-available")?;
        debug!(vehicle_id, "checking availability");
        self.get_query(
            url,
            &[
                ("vehicleId", vehicle_id.to_string()),
                ("startDate", bridge_timestamp(start)),
                ("endDate", bridge_timestamp(end)),
            ],
        )
        .await
    }

    /// Create a reservation through the stored procedure.
    ///
    /// `POST /database-integration/stored-procedures/create-rental` --
    /// the procedure re-validates availability and computes the
    /// authoritative amount server-side. A 2xx response can still carry
    /// a failure flag; callers must inspect the outcome envelope.
    pub async fn create_rental(
        &self,
        request: &CreateRentalRequest,
    ) -> Result<CreateRentalOutcome, Error> {
        let url = self.api_url("database-integration/stored-procedures/create-rental")?;
        debug!(
            vehicle_id = request.vehicle_id,
            customer_id = request.customer_id,
            "creating rental"
        );
        self.post(url, request).await
    }

    /// List the authenticated customer's rentals.
    ///
    /// `GET /rentals/my-rentals`
    pub async fn my_rentals(&self) -> Result<Vec<RentalDto>, Error> {
        let url = self.api_url("rentals/my-rentals")?;
        self.get(url).await
    }

    /// List a specific user's rentals (back-office views).
    ///
    /// `GET /rentals/user/{id}`
    pub async fn user_rentals(&self, user_id: i64) -> Result<Vec<RentalDto>, Error> {
        let url = self.api_url(&format!("rentals/user/{user_id}"))?;
        self.get(url).await
    }

    /// Fetch a single rental.
    ///
    /// `GET /rentals/{id}`
    pub async fn get_rental(&self, id: i64) -> Result<RentalDto, Error> {
        let url = self.api_url(&format!("rentals/{id}"))?;
        self.get(url).await
    }

    /// Move a rental to a new status.
    ///
    /// `PUT /rentals/{id}/status` with `{"statusId": n}` -- status ids
    /// are fixed small integers agreed with the backend out of band.
    pub async fn update_rental_status(&self, id: i64, status_id: i32) -> Result<RentalDto, Error> {
        let url = self.api_url(&format!("rentals/{id}/status"))?;
        debug!(id, status_id, "updating rental status");
        self.put(url, &json!({ "statusId": status_id })).await
    }

    /// Cancel a rental.
    ///
    /// `POST /rentals/{id}/cancel`
    pub async fn cancel_rental(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("rentals/{id}/cancel"))?;
        debug!(id, "cancelling rental");
        self.post_unit(url).await
    }

    /// Complete a rental (vehicle returned).
    ///
    /// `POST /rentals/{id}/complete`
    pub async fn complete_rental(&self, id: i64) -> Result<RentalDto, Error> {
        let url = self.api_url(&format!("rentals/{id}/complete"))?;
        debug!(id, "completing rental");
        self.post(url, &json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::bridge_timestamp;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn bridge_timestamp_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date");
        let time = NaiveTime::from_hms_opt(10, 0, 0).expect("valid time");
        assert_eq!(bridge_timestamp(date.and_time(time)), "2026-03-05T10:00:00");
    }
}
