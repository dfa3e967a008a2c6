use tracing::{info, instrument};

use super::BookingApiClient;
use crate::appointment::{AppointmentConfirmation, AppointmentRequest};
use crate::error::SubmitError;

impl BookingApiClient {
    /// Create an appointment.
    ///
    /// A rejection carrying field messages becomes
    /// [`SubmitError::Validation`]; everything else that goes wrong is
    /// [`SubmitError::Submission`].
    #[instrument(skip(self, request), fields(service = %request.service))]
    pub async fn create_appointment(
        &self,
        request: &AppointmentRequest,
    ) -> Result<AppointmentConfirmation, SubmitError> {
        let http_request = self
            .client
            .post(self.endpoint("appointments"))
            .accept_json()
            .json(request)
            .map_err(SubmitError::Submission)?;

        let confirmation: AppointmentConfirmation = self.client.send_json(http_request).await?;
        info!(
            payment_status = confirmation.payment_status.as_str(),
            "Appointment created"
        );
        Ok(confirmation)
    }
}
