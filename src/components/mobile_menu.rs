use crate::dom::{Element, ACTIVE};

/// Burger button that shows and hides `.nav-links` on small screens.
pub struct MobileMenu<E> {
    nav_links: E,
    bars: Vec<E>,
}

/// Transform and opacity for burger bar `index` when the menu is open or shut.
fn bar_look(index: usize, open: bool) -> (&'static str, &'static str) {
    if !open {
        return ("none", "1");
    }
    match index {
        0 => ("rotate(45deg) translate(5px, 5px)", "1"),
        1 => ("none", "0"),
        _ => ("rotate(-45deg) translate(7px, -6px)", "1"),
    }
}

impl<E: Element> MobileMenu<E> {
    pub fn new(nav_links: E, bars: Vec<E>) -> Self {
        Self { nav_links, bars }
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.nav_links.has_class(ACTIVE)
    }

    /// Burger click.
    pub fn toggle(&self) -> bool {
        let open = self.nav_links.toggle_class(ACTIVE);
        self.draw_bars(open);
        open
    }

    /// Any nav link click.
    pub fn close(&self) {
        self.nav_links.remove_class(ACTIVE);
        self.draw_bars(false);
    }

    fn draw_bars(&self, open: bool) {
        for (i, bar) in self.bars.iter().enumerate() {
            let (transform, opacity) = bar_look(i, open);
            bar.set_style("transform", transform);
            bar.set_style("opacity", opacity);
        }
    }
}
