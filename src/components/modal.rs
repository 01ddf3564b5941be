use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;
use stylist::GlobalStyle;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;
use yew::AppHandle;

use crate::error::SiteError;

/// What the lightbox shows, copied from the clicked image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub src: String,
    pub alt: String,
}

/// Where a click inside the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    CloseButton,
    Backdrop,
    Image,
}

impl ModalClick {
    fn dismisses(self) -> bool {
        !matches!(self, ModalClick::Image)
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Puts the overlay on the page. Dropping the returned value removes the
/// overlay together with any style it injected.
pub trait ModalSurface: 'static {
    type Mounted: 'static;

    fn mount(&self, image: &ImagePayload, on_click: Rc<dyn Fn(ModalClick)>) -> Option<Self::Mounted>;
}

/// Document-level key listeners. Dropping the guard deregisters the handler.
pub trait KeySource: 'static {
    type Guard: 'static;

    fn on_key(&self, handler: Box<dyn FnMut(&str)>) -> Option<Self::Guard>;
}

struct OpenModal<M, G> {
    _view: M,
    _escape: Option<G>,
}

type Opened<S, K> = OpenModal<<S as ModalSurface>::Mounted, <K as KeySource>::Guard>;

/// Full-screen image lightbox; one open at a time.
pub struct ImageModal<S: ModalSurface, K: KeySource> {
    surface: S,
    keys: K,
    open: RefCell<Option<Opened<S, K>>>,
    this: Weak<Self>,
}

impl<S: ModalSurface, K: KeySource> ImageModal<S, K> {
    pub fn new(surface: S, keys: K) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            surface,
            keys,
            open: RefCell::new(None),
            this: this.clone(),
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> ModalState {
        if self.open.borrow().is_some() {
            ModalState::Open
        } else {
            ModalState::Closed
        }
    }

    pub fn open(&self, image: ImagePayload) {
        // A second open replaces the first instead of stacking overlays
        self.close();

        let this = self.this.clone();
        let on_click: Rc<dyn Fn(ModalClick)> = Rc::new(move |click: ModalClick| {
            if click.dismisses() {
                if let Some(modal) = this.upgrade() {
                    modal.close();
                }
            }
        });
        let Some(view) = self.surface.mount(&image, on_click) else {
            return;
        };

        let this = self.this.clone();
        let escape = self.keys.on_key(Box::new(move |key: &str| {
            if key == "Escape" {
                if let Some(modal) = this.upgrade() {
                    modal.close();
                }
            }
        }));

        *self.open.borrow_mut() = Some(OpenModal {
            _view: view,
            _escape: escape,
        });
    }

    /// Returns whether anything was open.
    pub fn close(&self) -> bool {
        let open = self.open.borrow_mut().take();
        let was_open = open.is_some();
        // View and key listener go away here, outside the borrow
        drop(open);
        was_open
    }
}

const MODAL_CSS: &str = r#"
    .image-modal {
        position: fixed;
        top: 0;
        left: 0;
        width: 100%;
        height: 100%;
        background: rgba(0, 0, 0, 0.9);
        display: flex;
        align-items: center;
        justify-content: center;
        z-index: 10000;
        animation: fadeIn 0.3s ease-out;
    }
    .modal-content {
        position: relative;
        max-width: 90%;
        max-height: 90%;
    }
    .modal-content img {
        max-width: 100%;
        max-height: 90vh;
        border-radius: 10px;
        box-shadow: 0 10px 50px rgba(0, 0, 0, 0.5);
    }
    .modal-close {
        position: absolute;
        top: -40px;
        right: 0;
        font-size: 40px;
        color: white;
        cursor: pointer;
        transition: color 0.3s ease;
    }
    .modal-close:hover {
        color: #4a90d9;
    }
"#;

#[derive(Properties, PartialEq)]
pub struct ModalViewProps {
    pub src: AttrValue,
    pub alt: AttrValue,
    pub on_click: Callback<ModalClick>,
}

#[function_component(ModalView)]
pub fn modal_view(props: &ModalViewProps) -> Html {
    let backdrop = use_node_ref();

    let on_backdrop = {
        let backdrop = backdrop.clone();
        let on_click = props.on_click.clone();
        Callback::from(move |e: MouseEvent| {
            // Clicks on the picture bubble up here too
            let target = e.target();
            if target.is_some() && target == backdrop.get().map(EventTarget::from) {
                on_click.emit(ModalClick::Backdrop);
            }
        })
    };

    let on_image = {
        let on_click = props.on_click.clone();
        Callback::from(move |_: MouseEvent| on_click.emit(ModalClick::Image))
    };

    let on_close = {
        let on_click = props.on_click.clone();
        Callback::from(move |_: MouseEvent| on_click.emit(ModalClick::CloseButton))
    };

    html! {
        <div class="image-modal" ref={backdrop} onclick={on_backdrop}>
            <div class="modal-content">
                <img src={props.src.clone()} alt={props.alt.clone()} onclick={on_image} />
                <span class="modal-close" onclick={on_close}>{"\u{00d7}"}</span>
            </div>
        </div>
    }
}

/// Mounts `ModalView` into a fresh `<div>` on `<body>`.
pub struct BrowserModal {
    document: Document,
    body: HtmlElement,
}

impl BrowserModal {
    pub fn new(document: &Document) -> Result<Self, SiteError> {
        let body = document.body().ok_or(SiteError::NoBody)?;
        Ok(Self {
            document: document.clone(),
            body,
        })
    }

    fn mount_view(
        &self,
        image: &ImagePayload,
        on_click: Rc<dyn Fn(ModalClick)>,
    ) -> Result<MountedModal, SiteError> {
        let sheet = GlobalStyle::new(MODAL_CSS)?;
        let host = self.document.create_element("div")?;
        self.body.append_child(&host)?;

        let props = ModalViewProps {
            src: AttrValue::from(image.src.clone()),
            alt: AttrValue::from(image.alt.clone()),
            on_click: Callback::from(move |click: ModalClick| on_click(click)),
        };
        let app = yew::Renderer::<ModalView>::with_root_and_props(host.clone(), props).render();

        Ok(MountedModal {
            app: Some(app),
            host,
            sheet,
        })
    }
}

pub struct MountedModal {
    app: Option<AppHandle<ModalView>>,
    host: web_sys::Element,
    sheet: GlobalStyle,
}

impl Drop for MountedModal {
    fn drop(&mut self) {
        if let Some(app) = self.app.take() {
            app.destroy();
        }
        self.host.remove();
        self.sheet.unregister();
    }
}

impl ModalSurface for BrowserModal {
    type Mounted = MountedModal;

    fn mount(&self, image: &ImagePayload, on_click: Rc<dyn Fn(ModalClick)>) -> Option<MountedModal> {
        match self.mount_view(image, on_click) {
            Ok(mounted) => Some(mounted),
            Err(err) => {
                warn!("Could not open image modal: {}", err);
                None
            }
        }
    }
}

/// `keydown` on the document.
pub struct DocumentKeys {
    document: Document,
}

impl DocumentKeys {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
        }
    }
}

pub struct KeyListener {
    document: Document,
    callback: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.callback.as_ref().unchecked_ref());
    }
}

impl KeySource for DocumentKeys {
    type Guard = KeyListener;

    fn on_key(&self, mut handler: Box<dyn FnMut(&str)>) -> Option<KeyListener> {
        let callback = Closure::wrap(
            Box::new(move |event: KeyboardEvent| handler(&event.key())) as Box<dyn FnMut(KeyboardEvent)>
        );

        match self
            .document
            .add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
        {
            Ok(()) => Some(KeyListener {
                document: self.document.clone(),
                callback,
            }),
            Err(err) => {
                warn!("Could not listen for Escape: {:?}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeKeys, FakeModalSurface};

    fn modal() -> (Rc<ImageModal<FakeModalSurface, FakeKeys>>, FakeModalSurface, FakeKeys) {
        let surface = FakeModalSurface::new();
        let keys = FakeKeys::new();
        (ImageModal::new(surface.clone(), keys.clone()), surface, keys)
    }

    fn picture(name: &str) -> ImagePayload {
        ImagePayload {
            src: format!("/assets/{name}.jpg"),
            alt: name.to_string(),
        }
    }

    #[test]
    fn opening_shows_the_clicked_image() {
        let (modal, surface, keys) = modal();

        modal.open(picture("workshop"));

        assert_eq!(modal.state(), ModalState::Open);
        assert_eq!(surface.open(), vec![picture("workshop")]);
        assert_eq!(keys.listeners(), 1);
    }

    #[test]
    fn escape_closes_and_unhooks_the_listener() {
        let (modal, surface, keys) = modal();
        modal.open(picture("team"));

        keys.press("Escape");

        assert_eq!(modal.state(), ModalState::Closed);
        assert!(surface.open().is_empty());
        assert_eq!(keys.listeners(), 0);

        // Nothing left to react to a second press
        keys.press("Escape");
        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(surface.mounted(), 1);
    }

    #[test]
    fn other_keys_are_ignored() {
        let (modal, _, keys) = modal();
        modal.open(picture("team"));

        keys.press("Enter");

        assert_eq!(modal.state(), ModalState::Open);
    }

    #[test]
    fn backdrop_and_close_button_dismiss_but_image_does_not() {
        let (modal, surface, keys) = modal();
        modal.open(picture("a"));

        surface.click(ModalClick::Image);
        assert_eq!(modal.state(), ModalState::Open);

        surface.click(ModalClick::Backdrop);
        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(keys.listeners(), 0);

        modal.open(picture("b"));
        surface.click(ModalClick::CloseButton);
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(surface.open().is_empty());
    }

    #[test]
    fn second_open_replaces_the_first() {
        let (modal, surface, keys) = modal();

        modal.open(picture("a"));
        modal.open(picture("b"));

        assert_eq!(surface.open(), vec![picture("b")]);
        assert_eq!(keys.listeners(), 1);
        keys.press("Escape");
        assert!(surface.open().is_empty());
    }

    #[test]
    fn closing_when_closed_is_a_no_op() {
        let (modal, _, _) = modal();
        assert!(!modal.close());
    }
}
