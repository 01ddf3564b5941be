use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::SiteError;

/// Class every "one of many" group uses to mark its selected member.
pub const ACTIVE: &str = "active";

/// What the behaviours are allowed to do to a page element.
///
/// Implemented for `web_sys::HtmlElement` in the browser and by an in-memory
/// node in tests.
pub trait Element: Clone + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_style(&self, property: &str, value: &str);
    fn attribute(&self, name: &str) -> Option<String>;
    fn layout_top(&self) -> f64;
    fn layout_height(&self) -> f64;

    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&self, class: &str) -> bool {
        let on = !self.has_class(class);
        self.set_class(class, on);
        on
    }
}

impl Element for HtmlElement {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn layout_top(&self) -> f64 {
        f64::from(self.offset_top())
    }

    fn layout_height(&self) -> f64 {
        f64::from(self.offset_height())
    }
}

/// Window and document handles, looked up once at startup.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
}

impl Page {
    pub fn current() -> Result<Self, SiteError> {
        let window = web_sys::window().ok_or(SiteError::NoWindow)?;
        let document = window.document().ok_or(SiteError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn one(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    pub fn all(&self, selector: &str) -> Vec<HtmlElement> {
        html_elements(self.document.query_selector_all(selector))
    }

    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

/// Descendants of `root` matching `selector`, in document order.
pub fn descendants(root: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
    html_elements(root.query_selector_all(selector))
}

fn html_elements(list: Result<NodeList, JsValue>) -> Vec<HtmlElement> {
    let Ok(list) = list else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SiteError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    // Page-lifetime listeners are never removed
    callback.forget();
    Ok(())
}
