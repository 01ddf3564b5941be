use crate::components::reveal::stagger;
use crate::dom::Element;

pub const FADE_IN_LEFT: &str = "fadeInLeft";
pub const INNOVATION_STEP_MS: u32 = 200;
pub const PROCESS_STEP_MS: u32 = 300;

/// Hover lift on team and value cards.
pub fn lift<E: Element>(card: &E, raised: bool) {
    let transform = if raised {
        "translateY(-10px)"
    } else {
        "translateY(0)"
    };
    card.set_style("transform", transform);
}

/// Staggers the innovation list entrance and tags each item for it.
pub fn cascade_innovations<E: Element>(items: &[E]) {
    stagger(items, INNOVATION_STEP_MS);
    for item in items {
        item.add_class(FADE_IN_LEFT);
    }
}

pub fn cascade_process_steps<E: Element>(steps: &[E]) {
    stagger(steps, PROCESS_STEP_MS);
}
