use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{Element, ACTIVE};
use crate::timers::Timers;

struct Slides<E> {
    track: E,
    dots: Vec<E>,
    current: usize,
}

impl<E: Element> Slides<E> {
    fn go_to(&mut self, index: usize) {
        debug_assert!(index < self.dots.len(), "slide {index} out of range");
        self.current = index;
        self.track
            .set_style("transform", &format!("translateX(-{}%)", index * 100));

        for (i, dot) in self.dots.iter().enumerate() {
            dot.set_class(ACTIVE, i == index);
        }
    }

    fn next(&mut self) {
        let next = (self.current + 1) % self.dots.len();
        self.go_to(next);
    }
}

/// Slide track with one dot per slide and an auto-advance timer.
pub struct Carousel<E: Element, T: Timers> {
    slides: Rc<RefCell<Slides<E>>>,
    timers: T,
    period_ms: u32,
    auto_play: Option<T::Interval>,
}

impl<E: Element, T: Timers> Carousel<E, T> {
    /// `None` when there are no dots, which leaves the page untouched.
    pub fn new(track: E, dots: Vec<E>, timers: T, period_ms: u32) -> Option<Self> {
        if dots.is_empty() {
            return None;
        }

        Some(Self {
            slides: Rc::new(RefCell::new(Slides {
                track,
                dots,
                current: 0,
            })),
            timers,
            period_ms,
            auto_play: None,
        })
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.slides.borrow().current
    }

    pub fn go_to_slide(&self, index: usize) {
        self.slides.borrow_mut().go_to(index);
    }

    /// What each auto-play tick does.
    #[cfg(test)]
    pub fn next(&self) {
        self.slides.borrow_mut().next();
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.auto_play.is_some()
    }

    pub fn start_auto_play(&mut self) {
        // Restart, never stack
        self.stop_auto_play();

        let slides = Rc::downgrade(&self.slides);
        let tick = self.timers.interval(
            self.period_ms,
            Box::new(move || {
                if let Some(slides) = slides.upgrade() {
                    slides.borrow_mut().next();
                }
            }),
        );
        self.auto_play = Some(tick);
    }

    pub fn stop_auto_play(&mut self) {
        self.auto_play = None;
    }

    /// Dot click: jump, then give the new slide a full interval.
    pub fn select(&mut self, index: usize) {
        self.go_to_slide(index);
        self.stop_auto_play();
        self.start_auto_play();
    }

    pub fn pause(&mut self) {
        self.stop_auto_play();
    }

    pub fn resume(&mut self) {
        self.start_auto_play();
    }
}
