use tracing::{debug, instrument};

use super::BookingApiClient;
use crate::catalog::ServiceCatalog;
use crate::error::CatalogLoadError;

impl BookingApiClient {
    /// Fetch the service catalog, optionally scoped to one business unit.
    ///
    /// Makes exactly one request; there is no retry and no cache.
    #[instrument(skip(self))]
    pub async fn fetch_services(
        &self,
        business_unit_id: Option<&str>,
    ) -> Result<ServiceCatalog, CatalogLoadError> {
        let mut request = self.client.get(self.endpoint("services")).accept_json();
        if let Some(id) = business_unit_id.filter(|id| !id.is_empty()) {
            request = request.query("business_unit", id);
        }

        let catalog: ServiceCatalog = self.client.send_json(request).await?;
        debug!(count = catalog.len(), "Loaded service catalog");
        Ok(catalog)
    }
}
