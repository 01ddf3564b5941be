//! In-memory stand-ins for the browser, used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use crate::components::contact_form::FormFields;
use crate::components::modal::{ImagePayload, KeySource, ModalClick, ModalSurface};
use crate::components::notification::{Notice, ToastHandle, ToastSurface};
use crate::dom::Element;
use crate::timers::Timers;

#[derive(Default)]
struct Node {
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    top: f64,
    height: f64,
}

#[derive(Clone, Default)]
pub struct FakeElement(Rc<RefCell<Node>>);

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn at(self, top: f64, height: f64) -> Self {
        {
            let mut node = self.0.borrow_mut();
            node.top = top;
            node.height = height;
        }
        self
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn layout_top(&self) -> f64 {
        self.0.borrow().top
    }

    fn layout_height(&self) -> f64 {
        self.0.borrow().height
    }
}

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat(Box<dyn FnMut()>, u64),
}

struct Scheduled {
    id: u64,
    due: u64,
    task: Task,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    queue: Vec<Scheduled>,
}

/// Timer handle; dropping it cancels the timer like gloo's do.
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

/// A clock that only moves when a test calls `advance`.
#[derive(Clone, Default)]
pub struct ManualTimers(Rc<RefCell<Clock>>);

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule(&self, millis: u32, task: Task) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.0.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + u64::from(millis);
        clock.queue.push(Scheduled {
            id,
            due,
            task,
            cancelled: cancelled.clone(),
        });
        ManualHandle { cancelled }
    }

    /// Runs every timer that falls due within the next `millis`, in order.
    pub fn advance(&self, millis: u64) {
        let target = self.0.borrow().now + millis;
        loop {
            let next = {
                let mut clock = self.0.borrow_mut();
                clock.queue.retain(|s| !s.cancelled.get());
                let due = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due <= target)
                    .min_by_key(|(_, s)| (s.due, s.id))
                    .map(|(i, _)| i);
                match due {
                    Some(i) => {
                        let scheduled = clock.queue.remove(i);
                        clock.now = scheduled.due;
                        scheduled
                    }
                    None => {
                        clock.now = target;
                        break;
                    }
                }
            };

            let Scheduled { id, due, task, cancelled } = next;
            match task {
                Task::Once(fire) => fire(),
                Task::Repeat(mut tick, period) => {
                    tick();
                    if !cancelled.get() {
                        self.0.borrow_mut().queue.push(Scheduled {
                            id,
                            due: due + period,
                            task: Task::Repeat(tick, period),
                            cancelled,
                        });
                    }
                }
            }
        }
    }

    /// Timers that have neither fired (one-shot) nor been cancelled.
    pub fn live(&self) -> usize {
        self.0
            .borrow()
            .queue
            .iter()
            .filter(|s| !s.cancelled.get())
            .count()
    }
}

impl Timers for ManualTimers {
    type Interval = ManualHandle;
    type Timeout = ManualHandle;

    fn interval(&self, millis: u32, tick: Box<dyn FnMut()>) -> ManualHandle {
        self.schedule(millis, Task::Repeat(tick, u64::from(millis)))
    }

    fn timeout(&self, millis: u32, fire: Box<dyn FnOnce()>) -> ManualHandle {
        self.schedule(millis, Task::Once(fire))
    }
}

type KeyHandler = Box<dyn FnMut(&str)>;

#[derive(Default)]
struct KeyRegistry {
    next_id: usize,
    handlers: BTreeMap<usize, Option<KeyHandler>>,
}

/// Document-level keydown listeners.
#[derive(Clone, Default)]
pub struct FakeKeys(Rc<RefCell<KeyRegistry>>);

pub struct FakeKeyGuard {
    id: usize,
    registry: Weak<RefCell<KeyRegistry>>,
}

impl Drop for FakeKeyGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().handlers.remove(&self.id);
        }
    }
}

impl FakeKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> usize {
        self.0.borrow().handlers.len()
    }

    pub fn press(&self, key: &str) {
        let ids: Vec<usize> = self.0.borrow().handlers.keys().copied().collect();
        for id in ids {
            let handler = self
                .0
                .borrow_mut()
                .handlers
                .get_mut(&id)
                .and_then(Option::take);
            let Some(mut handler) = handler else {
                continue;
            };
            handler(key);
            // Put it back unless it deregistered itself
            if let Some(slot) = self.0.borrow_mut().handlers.get_mut(&id) {
                *slot = Some(handler);
            }
        }
    }
}

impl KeySource for FakeKeys {
    type Guard = FakeKeyGuard;

    fn on_key(&self, handler: Box<dyn FnMut(&str)>) -> Option<FakeKeyGuard> {
        let mut registry = self.0.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.insert(id, Some(handler));
        Some(FakeKeyGuard {
            id,
            registry: Rc::downgrade(&self.0),
        })
    }
}

#[derive(Default)]
struct Overlays {
    next_id: usize,
    open: BTreeMap<usize, ImagePayload>,
    on_click: Option<Rc<dyn Fn(ModalClick)>>,
    mounted: usize,
}

/// Records which lightbox overlays are on the page.
#[derive(Clone, Default)]
pub struct FakeModalSurface(Rc<RefCell<Overlays>>);

pub struct FakeOverlay {
    id: usize,
    overlays: Weak<RefCell<Overlays>>,
}

impl Drop for FakeOverlay {
    fn drop(&mut self) {
        if let Some(overlays) = self.overlays.upgrade() {
            overlays.borrow_mut().open.remove(&self.id);
        }
    }
}

impl FakeModalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) -> Vec<ImagePayload> {
        self.0.borrow().open.values().cloned().collect()
    }

    pub fn mounted(&self) -> usize {
        self.0.borrow().mounted
    }

    /// Clicks inside the most recently mounted overlay.
    pub fn click(&self, target: ModalClick) {
        let on_click = self.0.borrow().on_click.clone();
        if let Some(on_click) = on_click {
            on_click(target);
        }
    }
}

impl ModalSurface for FakeModalSurface {
    type Mounted = FakeOverlay;

    fn mount(&self, image: &ImagePayload, on_click: Rc<dyn Fn(ModalClick)>) -> Option<FakeOverlay> {
        let mut overlays = self.0.borrow_mut();
        let id = overlays.next_id;
        overlays.next_id += 1;
        overlays.mounted += 1;
        overlays.open.insert(id, image.clone());
        overlays.on_click = Some(on_click);
        Some(FakeOverlay {
            id,
            overlays: Rc::downgrade(&self.0),
        })
    }
}

#[derive(Default)]
struct Toasts {
    next_id: usize,
    shown: BTreeMap<usize, (Notice, Rc<Cell<bool>>)>,
}

/// Records which toasts are on the page and whether they are leaving.
#[derive(Clone, Default)]
pub struct FakeToastSurface(Rc<RefCell<Toasts>>);

pub struct FakeToast {
    id: usize,
    leaving: Rc<Cell<bool>>,
    toasts: Weak<RefCell<Toasts>>,
}

impl ToastHandle for FakeToast {
    fn begin_exit(&self) {
        self.leaving.set(true);
    }
}

impl Drop for FakeToast {
    fn drop(&mut self) {
        if let Some(toasts) = self.toasts.upgrade() {
            toasts.borrow_mut().shown.remove(&self.id);
        }
    }
}

impl FakeToastSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> Vec<Notice> {
        self.0
            .borrow()
            .shown
            .values()
            .map(|(notice, _)| notice.clone())
            .collect()
    }

    pub fn leaving(&self) -> Vec<bool> {
        self.0
            .borrow()
            .shown
            .values()
            .map(|(_, leaving)| leaving.get())
            .collect()
    }
}

impl ToastSurface for FakeToastSurface {
    type Toast = FakeToast;

    fn mount(&self, notice: &Notice) -> Option<FakeToast> {
        let mut toasts = self.0.borrow_mut();
        let id = toasts.next_id;
        toasts.next_id += 1;
        let leaving = Rc::new(Cell::new(false));
        toasts.shown.insert(id, (notice.clone(), leaving.clone()));
        Some(FakeToast {
            id,
            leaving,
            toasts: Rc::downgrade(&self.0),
        })
    }
}

/// A contact form whose fields tests can fill in.
#[derive(Default)]
pub struct FakeForm {
    fields: RefCell<BTreeMap<String, String>>,
}

impl FakeForm {
    pub fn filled(name: &str, email: &str, message: &str) -> Self {
        let form = Self::default();
        {
            let mut fields = form.fields.borrow_mut();
            fields.insert("name".into(), name.into());
            fields.insert("email".into(), email.into());
            fields.insert("message".into(), message.into());
        }
        form
    }

    pub fn is_empty(&self) -> bool {
        self.fields.borrow().values().all(String::is_empty)
    }
}

impl FormFields for FakeForm {
    fn value(&self, name: &str) -> String {
        self.fields.borrow().get(name).cloned().unwrap_or_default()
    }

    fn reset(&self) {
        for value in self.fields.borrow_mut().values_mut() {
            value.clear();
        }
    }
}
