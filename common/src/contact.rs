//! Contact form draft. Submission is local only: the draft is logged and
//! cleared, nothing is transmitted.

use tracing::info;

/// How long the confirmation stays up before the form clears.
pub const CONFIRMATION_MS: u64 = 3000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Form field, for the generic change handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactDraft {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }
}

/// Contact form state: the draft plus the "message sent" confirmation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub draft: ContactDraft,
    pub submitted: bool,
}

impl ContactForm {
    /// Simulated submission: log the draft and show the confirmation.
    pub fn submit(&mut self) {
        info!(
            "Contact form submitted (name={:?}, email={:?}, subject={:?}, {} chars)",
            self.draft.name,
            self.draft.email,
            self.draft.subject,
            self.draft.message.chars().count()
        );
        self.submitted = true;
    }

    /// Called once the confirmation has been shown long enough.
    pub fn clear(&mut self) {
        self.submitted = false;
        self.draft = ContactDraft::default();
    }
}
