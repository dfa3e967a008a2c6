//! The visitor-facing booking form.
//!
//! [`BookingFormController`] is long-lived: user events are method calls on
//! it, and [`BookingFormController::render`] only produces markup from the
//! current [`FormView`]. Network work is split into `begin_*`/`finish_*`
//! pairs joined by tickets, with `attach`/`submit` as the async conveniences.

mod controller;
mod state;
mod view;

pub use controller::{BookingFormController, SubmitRefused};
pub use state::{AttachTicket, FormInput, FormState, InputField, SubmitTicket};
pub use view::{Banner, BannerKind, FormView, ServiceOption};

/// Banner shown when the catalog cannot be loaded.
pub const LOAD_FAILED_COPY: &str = "Не удалось загрузить услуги";

/// Banner shown when a submission fails without backend messages.
pub const SUBMIT_FAILED_COPY: &str = "Не удалось создать бронь";

/// Banner shown when the backend reports the booking as already paid.
pub const PAID_COPY: &str = "Оплата получена. Бронирование подтверждено.";

/// Status line while a submission is in flight.
pub const SUBMITTING_STATUS: &str = "Отправляем...";
