use crate::dom::{Element, ACTIVE};

/// What clicking the already-active member of a group does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reselect {
    /// Stays active (tabs).
    Keep,
    /// Closes, leaving nothing active (expandables).
    Collapse,
}

/// A set of elements of which at most one carries `active`.
pub struct ActiveGroup<E> {
    items: Vec<E>,
    reselect: Reselect,
    active: Option<usize>,
}

impl<E: Element> ActiveGroup<E> {
    /// Adopts whichever item the markup already marks active.
    pub fn new(items: Vec<E>, reselect: Reselect) -> Self {
        let active = items.iter().position(|item| item.has_class(ACTIVE));
        Self {
            items,
            reselect,
            active,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Applies a click on item `index` and returns the new active item.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.items.len() {
            return self.active;
        }

        let collapse = self.reselect == Reselect::Collapse && self.active == Some(index);
        self.active = if collapse { None } else { Some(index) };

        for (i, item) in self.items.iter().enumerate() {
            item.set_class(ACTIVE, Some(i) == self.active);
        }
        self.active
    }
}

/// `.tab-btn[data-tab=X]` buttons driving `#X-panel` panels.
pub struct Tabs<E> {
    buttons: ActiveGroup<E>,
    panels: Vec<E>,
}

impl<E: Element> Tabs<E> {
    pub fn new(buttons: Vec<E>, panels: Vec<E>) -> Option<Self> {
        if buttons.is_empty() {
            return None;
        }
        Some(Self {
            buttons: ActiveGroup::new(buttons, Reselect::Keep),
            panels,
        })
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<usize> {
        self.buttons.active()
    }

    pub fn select(&mut self, index: usize) {
        let Some(index) = self.buttons.select(index) else {
            return;
        };
        let target = self.buttons.items()[index]
            .attribute("data-tab")
            .map(|tab| format!("{tab}-panel"));

        for panel in &self.panels {
            let matches = target.is_some() && panel.attribute("id") == target;
            panel.set_class(ACTIVE, matches);
        }
    }
}

/// `.expandable` items; at most one open.
pub struct Expandables<E> {
    items: ActiveGroup<E>,
}

impl<E: Element> Expandables<E> {
    pub fn new(items: Vec<E>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            items: ActiveGroup::new(items, Reselect::Collapse),
        })
    }

    #[cfg(test)]
    pub fn open(&self) -> Option<usize> {
        self.items.active()
    }

    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        self.items.select(index)
    }
}
