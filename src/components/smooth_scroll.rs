use crate::components::scroll_tracker::highlight_link;
use crate::dom::Element;

/// Where clicking an in-page anchor should scroll to.
///
/// `href` is the anchor's raw attribute; `find` resolves it to the target
/// element. Returns `None` for a bare `#`, non-fragment links, and fragments
/// with no target, all of which leave the page where it is.
pub fn scroll_target<E, F>(href: &str, navbar: Option<&E>, find: F) -> Option<f64>
where
    E: Element,
    F: FnOnce(&str) -> Option<E>,
{
    if href == "#" || !href.starts_with('#') {
        return None;
    }

    let target = find(href)?;
    let navbar_height = navbar.map_or(0.0, Element::layout_height);
    Some(target.layout_top() - navbar_height)
}

/// Anchor click handler: scroll position to go to, and the nav link to mark.
pub struct SmoothScroll<E> {
    navbar: Option<E>,
    links: Vec<E>,
}

impl<E: Element> SmoothScroll<E> {
    pub fn new(navbar: Option<E>, links: Vec<E>) -> Self {
        Self { navbar, links }
    }

    pub fn follow<F>(&self, href: &str, find: F) -> Option<f64>
    where
        F: FnOnce(&str) -> Option<E>,
    {
        let top = scroll_target(href, self.navbar.as_ref(), find)?;
        highlight_link(&self.links, href);
        Some(top)
    }
}
