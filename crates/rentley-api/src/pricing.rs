// Pricing endpoint
//
// The authoritative price computation lives server-side; this is the
// primary path of the estimator. The fallback lives in rentley-core.

use chrono::NaiveDate;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::BreakdownDto;

impl ApiClient {
    /// Fetch the authoritative pricing breakdown for a vehicle and
    /// date range.
    ///
    /// `GET /pricing/breakdown?vehicleId&startDate&endDate`
    pub async fn pricing_breakdown(
        &self,
        vehicle_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<BreakdownDto, Error> {
        let url = self.api_url("pricing/breakdown")?;
        self.get_query(
            url,
            &[
                ("vehicleId", vehicle_id.to_string()),
                ("startDate", start_date.to_string()),
                ("endDate", end_date.to_string()),
            ],
        )
        .await
    }
}
