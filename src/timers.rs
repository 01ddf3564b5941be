use gloo_timers::callback::{Interval, Timeout};

/// Source of periodic and one-shot timers.
///
/// Handles cancel their timer when dropped, so replacing a stored handle
/// is how a component restarts a countdown.
pub trait Timers: Clone + 'static {
    type Interval: 'static;
    type Timeout: 'static;

    fn interval(&self, millis: u32, tick: Box<dyn FnMut()>) -> Self::Interval;
    fn timeout(&self, millis: u32, fire: Box<dyn FnOnce()>) -> Self::Timeout;
}

/// `setInterval`/`setTimeout` through gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    type Interval = Interval;
    type Timeout = Timeout;

    fn interval(&self, millis: u32, mut tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(millis, move || tick())
    }

    fn timeout(&self, millis: u32, fire: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(millis, fire)
    }
}
