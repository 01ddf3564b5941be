use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use stylist::GlobalStyle;
use web_sys::{Document, HtmlElement};
use yew::prelude::*;
use yew::AppHandle;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::timers::Timers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            NoticeKind::Success => "linear-gradient(135deg, #28a745 0%, #20c997 100%)",
            NoticeKind::Error => "linear-gradient(135deg, #dc3545 0%, #e83e8c 100%)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

/// A toast currently on the page. Dropping it removes it.
pub trait ToastHandle: 'static {
    fn begin_exit(&self);
}

/// Puts toasts on the page.
pub trait ToastSurface: 'static {
    type Toast: ToastHandle;

    fn mount(&self, notice: &Notice) -> Option<Self::Toast>;
}

struct Shown<H, D> {
    toast: H,
    // Either the exit countdown or, once leaving, the removal countdown
    _pending: D,
}

type Slot<S, T> = Rc<RefCell<Option<Shown<<S as ToastSurface>::Toast, <T as Timers>::Timeout>>>>;

/// Shows at most one toast at a time and dismisses it after a delay.
pub struct Notifier<S: ToastSurface, T: Timers> {
    surface: S,
    timers: T,
    visible_ms: u32,
    exit_ms: u32,
    current: Slot<S, T>,
}

impl<S: ToastSurface, T: Timers> Notifier<S, T> {
    pub fn new(surface: S, timers: T, config: &SiteConfig) -> Self {
        Self {
            surface,
            timers,
            visible_ms: config.notification_visible_ms,
            exit_ms: config.notification_exit_ms,
            current: Rc::new(RefCell::new(None)),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: NoticeKind) {
        // Tear down the old toast and its timers before mounting the new one
        let previous = self.current.borrow_mut().take();
        drop(previous);

        let notice = Notice {
            message: message.into(),
            kind,
        };
        let Some(toast) = self.surface.mount(&notice) else {
            return;
        };
        let pending = self.schedule_exit();
        *self.current.borrow_mut() = Some(Shown {
            toast,
            _pending: pending,
        });
    }

    fn schedule_exit(&self) -> T::Timeout {
        let current = Rc::downgrade(&self.current);
        let timers = self.timers.clone();
        let exit_ms = self.exit_ms;

        self.timers.timeout(
            self.visible_ms,
            Box::new(move || {
                let Some(current) = current.upgrade() else {
                    return;
                };

                let slot = Rc::downgrade(&current);
                let removal = timers.timeout(
                    exit_ms,
                    Box::new(move || {
                        if let Some(slot) = slot.upgrade() {
                            let gone = slot.borrow_mut().take();
                            drop(gone);
                        }
                    }),
                );

                let mut open = current.borrow_mut();
                if let Some(shown) = open.as_mut() {
                    shown.toast.begin_exit();
                    shown._pending = removal;
                }
            }),
        )
    }
}

const LEAVING: &str = "leaving";

const TOAST_CSS: &str = r#"
    @keyframes slideIn {
        from {
            transform: translateX(100%);
            opacity: 0;
        }
        to {
            transform: translateX(0);
            opacity: 1;
        }
    }
    @keyframes slideOut {
        from {
            transform: translateX(0);
            opacity: 1;
        }
        to {
            transform: translateX(100%);
            opacity: 0;
        }
    }
    .notification {
        position: fixed;
        top: 100px;
        right: 20px;
        padding: 15px 25px;
        border-radius: 10px;
        color: white;
        font-weight: 500;
        z-index: 10000;
        animation: slideIn 0.3s ease-out;
        max-width: 350px;
    }
    .toast-host.leaving .notification {
        animation: slideOut 0.3s ease-out forwards;
    }
"#;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: AttrValue,
    pub kind: NoticeKind,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    html! {
        <div
            class={classes!("notification", props.kind.class())}
            style={format!("background: {};", props.kind.background())}
        >
            { props.message.to_string() }
        </div>
    }
}

/// Renders toasts with Yew into a host `div` appended to `<body>`.
pub struct BrowserToasts {
    document: Document,
    body: HtmlElement,
    _sheet: GlobalStyle,
}

impl BrowserToasts {
    pub fn new(document: &Document) -> Result<Self, SiteError> {
        let body = document.body().ok_or(SiteError::NoBody)?;
        let sheet = GlobalStyle::new(TOAST_CSS)?;
        Ok(Self {
            document: document.clone(),
            body,
            _sheet: sheet,
        })
    }

    fn host(&self) -> Result<web_sys::Element, SiteError> {
        let host = self.document.create_element("div")?;
        host.set_class_name("toast-host");
        self.body.append_child(&host)?;
        Ok(host)
    }
}

pub struct MountedToast {
    app: Option<AppHandle<Toast>>,
    host: web_sys::Element,
}

impl ToastHandle for MountedToast {
    fn begin_exit(&self) {
        let _ = self.host.class_list().add_1(LEAVING);
    }
}

impl Drop for MountedToast {
    fn drop(&mut self) {
        if let Some(app) = self.app.take() {
            app.destroy();
        }
        self.host.remove();
    }
}

impl ToastSurface for BrowserToasts {
    type Toast = MountedToast;

    fn mount(&self, notice: &Notice) -> Option<MountedToast> {
        let host = match self.host() {
            Ok(host) => host,
            Err(err) => {
                warn!("Could not show notification: {}", err);
                return None;
            }
        };

        let props = ToastProps {
            message: AttrValue::from(notice.message.clone()),
            kind: notice.kind,
        };
        let app = yew::Renderer::<Toast>::with_root_and_props(host.clone(), props).render();
        Some(MountedToast {
            app: Some(app),
            host,
        })
    }
}
