// Reference data endpoints
//
// Read-only lookups used to populate pickers. Failures here must never
// block a booking -- callers degrade to empty lists.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::LocationDto;

impl ApiClient {
    /// List all rental locations.
    ///
    /// `GET /locations`
    pub async fn locations(&self) -> Result<Vec<LocationDto>, Error> {
        let url = self.api_url("locations")?;
        self.get(url).await
    }
}
