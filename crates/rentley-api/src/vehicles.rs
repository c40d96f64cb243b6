// Vehicle endpoints
//
// Public browsing (list, detail, availability window, search) plus the
// management CRUD used by back-office roles. The server enforces role
// checks on CRUD independently of the client-side gate.

use chrono::NaiveDate;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Page, SearchFilters, VehicleDto};

impl ApiClient {
    /// List vehicles, paginated.
    ///
    /// `GET /vehicles?page={page}&size={size}`
    pub async fn list_vehicles(&self, page: u32, size: u32) -> Result<Page<VehicleDto>, Error> {
        let url = self.api_url("vehicles")?;
        self.get_query(url, &[("page", page), ("size", size)]).await
    }

    /// Fetch a single vehicle.
    ///
    /// `GET /vehicles/{id}`
    pub async fn get_vehicle(&self, id: i64) -> Result<VehicleDto, Error> {
        let url = self.api_url(&format!("vehicles/{id}"))?;
        self.get(url).await
    }

    /// List vehicles available in a date window.
    ///
    /// `GET /vehicles/available?startDate&endDate` -- both bounds
    /// optional; without them the server returns currently idle stock.
    pub async fn available_vehicles(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<VehicleDto>, Error> {
        let url = self.api_url("vehicles/available")?;
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start_date {
            query.push(("startDate", start.to_string()));
        }
        if let Some(end) = end_date {
            query.push(("endDate", end.to_string()));
        }
        self.get_query(url, &query).await
    }

    /// Search vehicles by filter criteria.
    ///
    /// `POST /vehicles/search`
    pub async fn search_vehicles(&self, filters: &SearchFilters) -> Result<Vec<VehicleDto>, Error> {
        let url = self.api_url("vehicles/search")?;
        self.post(url, filters).await
    }

    /// Create a vehicle (management roles).
    ///
    /// `POST /vehicles` -- payload passed through as JSON since the
    /// admin screens build it from free-form fields.
    pub async fn create_vehicle(&self, data: &serde_json::Value) -> Result<VehicleDto, Error> {
        let url = self.api_url("vehicles")?;
        debug!("creating vehicle");
        self.post(url, data).await
    }

    /// Update a vehicle (management roles).
    ///
    /// `PUT /vehicles/{id}`
    pub async fn update_vehicle(
        &self,
        id: i64,
        data: &serde_json::Value,
    ) -> Result<VehicleDto, Error> {
        let url = self.api_url(&format!("vehicles/{id}"))?;
        debug!(id, "updating vehicle");
        self.put(url, data).await
    }

    /// Delete a vehicle (management roles).
    ///
    /// `DELETE /vehicles/{id}`
    pub async fn delete_vehicle(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("vehicles/{id}"))?;
        debug!(id, "deleting vehicle");
        self.delete_unit(url).await
    }
}
