use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use web_sys::{FormData, HtmlFormElement};

use crate::components::notification::{NoticeKind, Notifier, ToastSurface};
use crate::timers::Timers;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! We will get back to you soon.";

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Why a contact submission was refused. `Display` is what the visitor sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// A submission that passed validation, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn validate(name: &str, email: &str, message: &str) -> Result<ContactMessage, ContactError> {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(ContactError::InvalidEmail);
    }

    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// Read/reset access to the contact form's named fields.
pub trait FormFields {
    fn value(&self, name: &str) -> String;
    fn reset(&self);
}

impl FormFields for HtmlFormElement {
    fn value(&self, name: &str) -> String {
        FormData::new_with_form(self)
            .ok()
            .and_then(|data| data.get(name).as_string())
            .unwrap_or_default()
    }

    fn reset(&self) {
        HtmlFormElement::reset(self);
    }
}

/// Submit handler: validate, tell the visitor how it went, clear on success.
///
/// Nothing is sent anywhere; delivery is not handled by the page.
pub fn submit<F, S, T>(form: &F, notifier: &Notifier<S, T>) -> Result<ContactMessage, ContactError>
where
    F: FormFields + ?Sized,
    S: ToastSurface,
    T: Timers,
{
    let result = validate(
        &form.value("name"),
        &form.value("email"),
        &form.value("message"),
    );

    match &result {
        Ok(_) => {
            notifier.show(SUCCESS_MESSAGE, NoticeKind::Success);
            form.reset();
        }
        Err(err) => notifier.show(err.to_string(), NoticeKind::Error),
    }
    result
}
