use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use goguide_widget_api::{
    AppointmentConfirmation, AppointmentRequest, BookingApiClient, CatalogLoadError, Service,
    ServiceCatalog, SubmitError,
};
use goguide_widget_config::embed::{self, Connection};
use goguide_widget_config::{resolve, WidgetConfig};
use goguide_widget_preview::{PreviewHost, PreviewOutcome, SandboxedPreview};

use super::state::{AttachTicket, FormInput, FormState, InputField, SubmitTicket};
use super::view::{self, Banner, BannerKind, FormView, ServiceOption};
use super::{LOAD_FAILED_COPY, PAID_COPY, SUBMITTING_STATUS, SUBMIT_FAILED_COPY};

/// Why a submit was not started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRefused {
    #[error("A submission is already in flight")]
    AlreadySubmitting,

    #[error("The form is not ready")]
    NotReady,

    #[error("No service selected")]
    NoService,

    #[error("Required field is empty: {0:?}")]
    MissingField(InputField),
}

/// State machine of one embedded booking form.
#[derive(Debug)]
pub struct BookingFormController {
    config: WidgetConfig,
    connection: Connection,
    api: BookingApiClient,
    preview: SandboxedPreview,
    catalog: ServiceCatalog,
    selected: Option<String>,
    input: FormInput,
    state: FormState,
    scroll_pending: bool,
    attach_generation: u64,
    submit_generation: u64,
}

impl BookingFormController {
    pub fn new(
        config: WidgetConfig,
        connection: Connection,
        api: BookingApiClient,
        host: Arc<PreviewHost>,
    ) -> Self {
        let preview =
            SandboxedPreview::new(host).with_auto_close_ms(config.options.preview_auto_close_ms);
        Self {
            config,
            connection,
            api,
            preview,
            catalog: ServiceCatalog::default(),
            selected: None,
            input: FormInput::default(),
            state: FormState::Loading,
            scroll_pending: false,
            attach_generation: 0,
            submit_generation: 0,
        }
    }

    /// Build a controller the way a `<booking-widget>` element does: its own
    /// attributes override the persisted configuration. `page_origin` (e.g.
    /// `https://tours.example.com`) supplies the API base when the element
    /// has no `data-api-base`.
    pub fn from_element(
        attrs: &[(String, String)],
        persisted_blob: &str,
        page_origin: &str,
        host: Arc<PreviewHost>,
    ) -> goguide_widget_api::Result<Self> {
        let overrides = embed::overrides_from_attributes(attrs);
        let config = resolve::resolve(&overrides, persisted_blob);
        let connection = Connection::from_attributes(attrs, page_origin);
        let api = BookingApiClient::new(connection.api_base.clone())?;
        Ok(Self::new(config, connection, api, host))
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.selected.as_deref().and_then(|id| self.catalog.get(id))
    }

    pub fn preview(&self) -> &SandboxedPreview {
        &self.preview
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Start a catalog load. Any earlier load or submission becomes stale.
    pub fn begin_attach(&mut self) -> AttachTicket {
        self.attach_generation += 1;
        self.submit_generation += 1;
        self.catalog = ServiceCatalog::default();
        self.selected = None;
        self.state = FormState::Loading;
        AttachTicket(self.attach_generation)
    }

    /// Apply a catalog load result. Returns false if `ticket` is stale.
    pub fn finish_attach(
        &mut self,
        ticket: AttachTicket,
        result: Result<ServiceCatalog, CatalogLoadError>,
    ) -> bool {
        if ticket.0 != self.attach_generation {
            debug!(ticket = ticket.0, current = self.attach_generation, "Ignoring stale catalog response");
            return false;
        }

        match result {
            Ok(catalog) => {
                info!(services = catalog.len(), "Booking form ready");
                self.catalog = catalog;
                self.state = FormState::Ready;
                if let Some(first) = self.catalog.first().map(|s| s.id.clone()) {
                    self.change_selection(first);
                }
            }
            Err(err) => {
                warn!(error = %err, "Catalog load failed");
                self.state = FormState::LoadFailed;
            }
        }
        true
    }

    /// Load the catalog from the backend.
    #[instrument(skip(self), fields(business_unit = ?self.connection.business_unit_id))]
    pub async fn attach(&mut self) -> bool {
        let ticket = self.begin_attach();
        let result = self
            .api
            .fetch_services(self.connection.business_unit_id.as_deref())
            .await;
        self.finish_attach(ticket, result)
    }

    // =========================================================================
    // User events
    // =========================================================================

    /// Select a service. Only an actual change can auto-open the preview.
    pub fn select_service(&mut self, id: &str) -> bool {
        if self.catalog.get(id).is_none() {
            return false;
        }
        self.settle_to_ready();
        if self.selected.as_deref() != Some(id) {
            self.change_selection(id.to_string());
        }
        true
    }

    /// Change one input value.
    pub fn edit(&mut self, field: InputField, value: impl Into<String>) {
        self.input.set(field, value.into());
        self.settle_to_ready();
    }

    /// Open the preview for the selected service.
    pub fn open_preview(&mut self) -> PreviewOutcome {
        let Some(fragment) = self.selected_service().and_then(|s| s.tour()).map(str::to_owned)
        else {
            return PreviewOutcome::Unavailable;
        };
        self.preview.open(&fragment, &self.config.theme)
    }

    pub fn close_preview(&mut self) {
        self.preview.close();
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validate the inputs, build the request and enter `Submitting`.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, AppointmentRequest), SubmitRefused> {
        match self.state {
            FormState::Submitting => return Err(SubmitRefused::AlreadySubmitting),
            FormState::Loading | FormState::LoadFailed => return Err(SubmitRefused::NotReady),
            _ => {}
        }
        let request = self.build_request()?;

        self.submit_generation += 1;
        self.state = FormState::Submitting;
        self.scroll_pending = false;
        Ok((SubmitTicket(self.submit_generation), request))
    }

    /// Apply a submission result. Returns false if `ticket` is stale.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<AppointmentConfirmation, SubmitError>,
    ) -> bool {
        if ticket.0 != self.submit_generation || self.state != FormState::Submitting {
            debug!(ticket = ticket.0, current = self.submit_generation, "Ignoring stale submit response");
            return false;
        }

        self.state = match result {
            Ok(confirmation) => {
                let message = if confirmation.payment_status.is_paid() {
                    PAID_COPY.to_string()
                } else {
                    self.config.labels.success.clone()
                };
                self.reset_form();
                FormState::Success(message)
            }
            Err(err) => {
                warn!(error = %err, "Appointment submission failed");
                FormState::Failed(
                    err.joined_messages()
                        .unwrap_or_else(|| SUBMIT_FAILED_COPY.to_string()),
                )
            }
        };
        self.scroll_pending = self.config.options.scroll_into_view;
        true
    }

    /// Submit the form to the backend.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<bool, SubmitRefused> {
        let (ticket, request) = self.begin_submit()?;
        let result = self.api.create_appointment(&request).await;
        Ok(self.finish_submit(ticket, result))
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn view(&self) -> FormView {
        let options = self
            .catalog
            .iter()
            .map(|service| ServiceOption {
                id: service.id.clone(),
                label: service.display_label(),
                selected: self.selected.as_deref() == Some(service.id.as_str()),
            })
            .collect();

        let banner = match &self.state {
            FormState::LoadFailed => Some(Banner {
                kind: BannerKind::Error,
                text: LOAD_FAILED_COPY.to_string(),
            }),
            FormState::Success(text) => Some(Banner {
                kind: BannerKind::Success,
                text: text.clone(),
            }),
            FormState::Failed(text) => Some(Banner {
                kind: BannerKind::Error,
                text: text.clone(),
            }),
            _ => None,
        };

        let options_cfg = &self.config.options;
        FormView {
            state: self.state.clone(),
            options,
            selected_id: self.selected.clone(),
            show_preview_link: self.selected_service().is_some_and(Service::has_tour),
            submit_disabled: !matches!(
                self.state,
                FormState::Ready | FormState::Success(_) | FormState::Failed(_)
            ),
            status_text: if self.state == FormState::Submitting {
                SUBMITTING_STATUS.to_string()
            } else {
                String::new()
            },
            banner,
            show_email: !options_cfg.hide_email,
            email_required: !options_cfg.hide_email && !options_cfg.email_optional,
            show_end: !options_cfg.hide_end,
            phone_placeholder: options_cfg.phone_placeholder.clone(),
            scroll_into_view: self.scroll_pending,
            input: self.input.clone(),
        }
    }

    /// Shadow-root markup of the form. Tour fragments never appear here.
    pub fn render(&self) -> Result<String, minijinja::Error> {
        view::render(&self.view(), &self.config.labels, &self.config.theme)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn settle_to_ready(&mut self) {
        if self.state.is_settled() {
            self.state = FormState::Ready;
            self.scroll_pending = false;
        }
    }

    fn change_selection(&mut self, id: String) {
        self.selected = Some(id);
        if self.config.options.auto_open_preview
            && self.selected_service().is_some_and(Service::has_tour)
        {
            self.open_preview();
        }
    }

    /// Clear inputs and return the selector to its first option.
    fn reset_form(&mut self) {
        self.input = FormInput::default();
        self.selected = self.catalog.first().map(|s| s.id.clone());
    }

    fn build_request(&self) -> Result<AppointmentRequest, SubmitRefused> {
        let service = self.selected.clone().ok_or(SubmitRefused::NoService)?;
        let options = &self.config.options;

        let required = |field: InputField| {
            let value = self.input.get(field).trim();
            if value.is_empty() {
                Err(SubmitRefused::MissingField(field))
            } else {
                Ok(value.to_string())
            }
        };

        let start_at = required(InputField::StartAt)?;
        let end_at = if options.hide_end {
            Some(self.input.end_at.trim())
                .filter(|end| !end.is_empty())
                .map_or_else(|| start_at.clone(), str::to_string)
        } else {
            required(InputField::EndAt)?
        };
        let client_name = required(InputField::Name)?;
        let client_phone = required(InputField::Phone)?;

        let client_email = if options.hide_email {
            None
        } else if options.email_optional {
            Some(self.input.client_email.trim().to_string()).filter(|email| !email.is_empty())
        } else {
            Some(required(InputField::Email)?)
        };

        Ok(AppointmentRequest {
            business_unit: self.connection.business_unit_id.clone(),
            service,
            client_name,
            client_phone,
            client_email,
            start_at,
            end_at,
        })
    }
}
