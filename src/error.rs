use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring a behaviour onto the page.
///
/// Missing elements are not errors: a feature whose markup is absent just
/// stays off. These cover the browser refusing something we asked for.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("style sheet rejected: {0}")]
    Style(String),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<stylist::Error> for SiteError {
    fn from(err: stylist::Error) -> Self {
        SiteError::Style(err.to_string())
    }
}
