use serde::Serialize;

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "message", rename_all = "snake_case")]
pub enum FormState {
    Loading,
    /// The catalog failed to load; the form stays inert until reattached.
    LoadFailed,
    Ready,
    Submitting,
    Success(String),
    Failed(String),
}

impl FormState {
    /// Settled states fall back to `Ready` on the next edit.
    pub fn is_settled(&self) -> bool {
        matches!(self, FormState::Success(_) | FormState::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormState::Success(message) | FormState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Editable inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Name,
    Phone,
    Email,
    StartAt,
    EndAt,
}

/// Current values of the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormInput {
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    /// `datetime-local` value, e.g. `2026-05-01T10:00`.
    pub start_at: String,
    pub end_at: String,
}

impl FormInput {
    pub fn set(&mut self, field: InputField, value: String) {
        let slot = match field {
            InputField::Name => &mut self.client_name,
            InputField::Phone => &mut self.client_phone,
            InputField::Email => &mut self.client_email,
            InputField::StartAt => &mut self.start_at,
            InputField::EndAt => &mut self.end_at,
        };
        *slot = value;
    }

    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Name => &self.client_name,
            InputField::Phone => &self.client_phone,
            InputField::Email => &self.client_email,
            InputField::StartAt => &self.start_at,
            InputField::EndAt => &self.end_at,
        }
    }
}

/// Identifies one catalog load. Only the latest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachTicket(pub(crate) u64);

/// Identifies one submission. Only the latest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket(pub(crate) u64);
