use rand::Rng;

use crate::dom::Element;

pub const PARTICLE_CLASS: &str = "particle";

/// Randomised look of one floating background dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub size_px: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub opacity: f64,
    pub hue: f64,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            size_px: rng.gen_range(2.0..6.0),
            left_pct: rng.gen_range(0.0..100.0),
            top_pct: rng.gen_range(0.0..100.0),
            duration_s: rng.gen_range(10.0..30.0),
            delay_s: rng.gen_range(0.0..10.0),
            opacity: rng.gen_range(0.1..0.6),
            hue: rng.gen_range(200.0..230.0),
        }
    }

    pub fn apply<E: Element>(&self, el: &E) {
        let size = format!("{:.2}px", self.size_px);
        el.set_style("width", &size);
        el.set_style("height", &size);
        el.set_style("left", &format!("{:.2}%", self.left_pct));
        el.set_style("top", &format!("{:.2}%", self.top_pct));
        el.set_style(
            "animation",
            &format!(
                "float {:.2}s {:.2}s infinite ease-in-out",
                self.duration_s, self.delay_s
            ),
        );
        el.set_style("opacity", &format!("{:.2}", self.opacity));
        el.set_style("background", &format!("hsl({:.0}, 70%, 60%)", self.hue));
    }
}

/// Creates `count` particles through `spawn`, which appends a fresh element
/// to the container. Stops early if `spawn` fails; returns how many exist.
pub fn populate<E, R, F>(count: usize, rng: &mut R, mut spawn: F) -> usize
where
    E: Element,
    R: Rng + ?Sized,
    F: FnMut() -> Option<E>,
{
    for created in 0..count {
        let Some(el) = spawn() else {
            return created;
        };
        el.add_class(PARTICLE_CLASS);
        Particle::random(rng).apply(&el);
    }
    count
}
