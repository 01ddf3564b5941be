use crate::dom::Element;

pub const SCROLL_ANIMATE: &str = "scroll-animate";
pub const VISIBLE: &str = "visible";
pub const ANIMATE_IN: &str = "animate-in";

/// Injected once; regions start hidden and slide up when revealed.
pub const REVEAL_CSS: &str = r#"
    .scroll-animate {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.6s ease-out, transform 0.6s ease-out;
    }
    .scroll-animate.visible {
        opacity: 1;
        transform: translateY(0);
    }
    .animate-in {
        animation: fadeInUp 0.5s ease-out forwards;
        opacity: 0;
    }
    @keyframes fadeInUp {
        from {
            opacity: 0;
            transform: translateY(20px);
        }
        to {
            opacity: 1;
            transform: translateY(0);
        }
    }
"#;

/// Sets `animation-delay` to `index * step_ms` on each element.
pub fn stagger<E: Element>(elements: &[E], step_ms: u32) {
    for (i, el) in elements.iter().enumerate() {
        el.set_style("animation-delay", &format!("{}ms", i as u64 * u64::from(step_ms)));
    }
}

struct Region<E> {
    element: E,
    children: Vec<E>,
    revealed: bool,
}

/// One-way reveal of observed page regions.
pub struct Reveal<E> {
    regions: Vec<Region<E>>,
    stagger_ms: u32,
}

impl<E: Element> Reveal<E> {
    /// Takes each region with its animatable children and hides it.
    ///
    /// The visibility threshold belongs to the observer: any intersecting
    /// report it delivers counts as crossing it.
    pub fn new(regions: Vec<(E, Vec<E>)>, stagger_ms: u32) -> Option<Self> {
        if regions.is_empty() {
            return None;
        }

        let regions = regions
            .into_iter()
            .map(|(element, children)| {
                element.add_class(SCROLL_ANIMATE);
                Region {
                    element,
                    children,
                    revealed: false,
                }
            })
            .collect();

        Some(Self {
            regions,
            stagger_ms,
        })
    }

    #[cfg(test)]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.regions.get(index).is_some_and(|r| r.revealed)
    }

    /// Index of the region backed by the element `is_target` picks out.
    pub fn position<F>(&self, mut is_target: F) -> Option<usize>
    where
        F: FnMut(&E) -> bool,
    {
        self.regions.iter().position(|r| is_target(&r.element))
    }

    /// Feeds one intersection observation; true only on the first reveal.
    pub fn observe(&mut self, index: usize, is_intersecting: bool) -> bool {
        let stagger_ms = self.stagger_ms;
        let Some(region) = self.regions.get_mut(index) else {
            return false;
        };
        if region.revealed || !is_intersecting {
            return false;
        }

        region.revealed = true;
        region.element.add_class(VISIBLE);
        stagger(&region.children, stagger_ms);
        for child in &region.children {
            child.add_class(ANIMATE_IN);
        }
        true
    }
}
