use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use stylist::GlobalStyle;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Event, HtmlElement, HtmlFormElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};

use crate::components::carousel::Carousel;
use crate::components::contact_form;
use crate::components::effects;
use crate::components::mobile_menu::MobileMenu;
use crate::components::modal::{BrowserModal, DocumentKeys, ImageModal, ImagePayload};
use crate::components::notification::{BrowserToasts, Notifier};
use crate::components::particles;
use crate::components::reveal::{Reveal, REVEAL_CSS};
use crate::components::scroll_tracker::ScrollTracker;
use crate::components::smooth_scroll::SmoothScroll;
use crate::components::toggle::{Expandables, Tabs};
use crate::config::SiteConfig;
use crate::dom::{descendants, listen, Element, Page};
use crate::error::SiteError;
use crate::timers::BrowserTimers;

const NAV_LINKS: &str = ".nav-links a";
const REVEAL_REGIONS: &str = ".team-section, .principle-section, .process-section, .values-content";
const REVEAL_CHILDREN: &str = ".member-card, .value-card, .process-step, .step-images img";
const MODAL_IMAGES: &str = ".story-img, .step-images img, .future-img";

type Init = fn(&Page, &SiteConfig) -> Result<(), SiteError>;

/// Wires every behaviour onto the current document.
///
/// Each feature is independent: one that fails is logged and skipped.
pub fn init() {
    let page = match Page::current() {
        Ok(page) => page,
        Err(err) => {
            warn!("Page behaviours disabled: {}", err);
            return;
        }
    };
    let config = SiteConfig::from_document(&page.document);
    debug!("Using {:?}", config);

    let steps: [(&str, Init); 13] = [
        ("particles", init_particles),
        ("tabs", init_tabs),
        ("expandables", init_expandables),
        ("mobile menu", init_mobile_menu),
        ("smooth scroll", init_smooth_scroll),
        ("navbar scroll", init_navbar_scroll),
        ("contact form", init_contact_form),
        ("scroll animations", init_scroll_animations),
        ("carousel", init_carousel),
        ("card hover", init_card_hover),
        ("image modal", init_image_modal),
        ("innovation list", init_innovations),
        ("process steps", init_process_steps),
    ];

    for (name, step) in steps {
        if let Err(err) = step(&page, &config) {
            warn!("Skipping {}: {}", name, err);
        }
    }

    info!("Site behaviours initialised");
}

fn init_particles(page: &Page, config: &SiteConfig) -> Result<(), SiteError> {
    let Some(container) = page.document.get_element_by_id("particles") else {
        debug!("No #particles container");
        return Ok(());
    };

    let mut failure = None;
    let created = particles::populate(config.particle_count, &mut rand::thread_rng(), || {
        let spawned = page
            .document
            .create_element("div")
            .and_then(|el| container.append_child(&el).map(|_| el));
        match spawned {
            Ok(el) => Some(el.unchecked_into::<HtmlElement>()),
            Err(err) => {
                failure = Some(SiteError::from(err));
                None
            }
        }
    });
    debug!("Created {} particles", created);

    failure.map_or(Ok(()), Err)
}

fn init_tabs(page: &Page, _: &SiteConfig) -> Result<(), SiteError> {
    let buttons = page.all(".tab-btn");
    let Some(tabs) = Tabs::new(buttons.clone(), page.all(".tab-panel")) else {
        debug!("No tabs");
        return Ok(());
    };

    let tabs = Rc::new(RefCell::new(tabs));
    for (index, button) in buttons.iter().enumerate() {
        let tabs = tabs.clone();
        listen(button, "click", move |_| tabs.borrow_mut().select(index))?;
    }
    Ok(())
}

fn init_expandables(page: &Page, _: &SiteConfig) -> Result<(), SiteError> {
    let items = page.all(".expandable");
    let Some(expandables) = Expandables::new(items.clone()) else {
        debug!("No expandables");
        return Ok(());
    };

    let expandables = Rc::new(RefCell::new(expandables));
    for (index, item) in items.iter().enumerate() {
        let Some(header) = descendants(item, ".expandable-header").into_iter().next() else {
            continue;
        };
        let expandables = expandables.clone();
        listen(&header, "click", move |_| {
            expandables.borrow_mut().toggle(index);
        })?;
    }
    Ok(())
}

fn init_mobile_menu(page: &Page, _: &SiteConfig) -> Result<(), SiteError> {
    let (Some(burger), Some(nav_links)) = (page.one(".mobile-menu"), page.one(".nav-links")) else {
        debug!("No mobile menu");
        return Ok(());
    };

    let menu = Rc::new(MobileMenu::new(nav_links, descendants(&burger, "span")));
    {
        let menu = menu.clone();
        listen(&burger, "click", move |_| {
            menu.toggle();
        })?;
    }
    for link in page.all(NAV_LINKS) {
        let menu = menu.clone();
        listen(&link, "click", move |_| menu.close())?;
    }
    Ok(())
}

fn init_smooth_scroll(page: &Page, _: &SiteConfig) -> Result<(), SiteError> {
    let scroll = Rc::new(SmoothScroll::new(page.one(".navbar"), page.all(NAV_LINKS)));

    for anchor in page.all("a[href^=\"#\"]") {
        let scroll = scroll.clone();
        let page = page.clone();
        let source = anchor.clone();
        listen(&anchor, "click", move |event: Event| {
            event.prevent_default();
            let Some(href) = source.get_attribute("href") else {
                return;
            };
            if let Some(top) = scroll.follow(&href, |selector| page.one(selector)) {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                page.window.scroll_to_with_scroll_to_options(&options);
            }
        })?;
    }
    Ok(())
}

fn init_navbar_scroll(page: &Page, config: &SiteConfig) -> Result<(), SiteError> {
    let navbar = page.one(".navbar");
    let sections = page.all("section[id]");
    if navbar.is_none() && sections.is_empty() {
        debug!("No navbar or sections to track");
        return Ok(());
    }

    let tracker = RefCell::new(ScrollTracker::new(navbar, page.all(NAV_LINKS), sections, config));
    let scrolled = page.clone();
    listen(&page.window, "scroll", move |_| {
        tracker.borrow_mut().on_scroll(scrolled.scroll_y());
    })
}

fn init_contact_form(page: &Page, config: &SiteConfig) -> Result<(), SiteError> {
    let Some(form) = page
        .document
        .get_element_by_id("contactForm")
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        debug!("No #contactForm");
        return Ok(());
    };

    let notifier = Notifier::new(BrowserToasts::new(&page.document)?, BrowserTimers, config);
    let fields = form.clone();
    listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        match contact_form::submit(&fields, &notifier) {
            Ok(sent) => info!(
                "Contact message from {} <{}> accepted ({} characters)",
                sent.name,
                sent.email,
                sent.message.len()
            ),
            Err(err) => debug!("Contact message refused: {}", err),
        }
    })
}

fn init_scroll_animations(page: &Page, config: &SiteConfig) -> Result<(), SiteError> {
    let regions = page.all(REVEAL_REGIONS);
    if regions.is_empty() {
        debug!("No regions to reveal");
        return Ok(());
    }

    // Registered for the page's lifetime
    GlobalStyle::new(REVEAL_CSS)?;

    let with_children = regions
        .iter()
        .map(|region| (region.clone(), descendants(region, REVEAL_CHILDREN)))
        .collect();
    let Some(reveal) = Reveal::new(with_children, config.reveal_stagger_ms) else {
        return Ok(());
    };

    let reveal = RefCell::new(reveal);
    let callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
        let mut reveal = reveal.borrow_mut();
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let target = entry.target();
            let Some(index) = reveal.position(|region: &HtmlElement| region.is_same_node(Some(&*target)))
            else {
                continue;
            };
            if reveal.observe(index, entry.is_intersecting()) {
                debug!("Revealed region {} at ratio {:.3}", index, entry.intersection_ratio());
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for region in &regions {
        observer.observe(region);
    }
    callback.forget();
    Ok(())
}

fn init_carousel(page: &Page, config: &SiteConfig) -> Result<(), SiteError> {
    let Some(track) = page.one(".carousel-track") else {
        debug!("No carousel");
        return Ok(());
    };
    let dots = page.all(".carousel-dots .dot");
    let Some(mut carousel) = Carousel::new(track, dots.clone(), BrowserTimers, config.carousel_interval_ms)
    else {
        debug!("Carousel has no dots");
        return Ok(());
    };

    carousel.start_auto_play();
    let carousel = Rc::new(RefCell::new(carousel));

    for (index, dot) in dots.iter().enumerate() {
        let carousel = carousel.clone();
        listen(dot, "click", move |_| carousel.borrow_mut().select(index))?;
    }

    if let Some(frame) = page.one(".device-carousel") {
        let entered = carousel.clone();
        listen(&frame, "mouseenter", move |_| entered.borrow_mut().pause())?;
        let left = carousel.clone();
        listen(&frame, "mouseleave", move |_| left.borrow_mut().resume())?;
    }
    Ok(())
}

fn init_card_hover(page: &Page, _: &SiteConfig) -> Result<(), SiteError> {
    for card in page.all(".member-card, .value-card") {
        let raised = card.clone();
        listen(&card, "mouseenter", move |_| effects::lift(&raised, true))?;
        let lowered = card.clone();
        listen(&card, "mouseleave", move |_| effects::lift(&lowered, false))?;
    }
    Ok(())
}

fn image_payload(img: &HtmlElement) -> ImagePayload {
    match img.dyn_ref::<HtmlImageElement>() {
        Some(image) => ImagePayload {
            src: image.src(),
            alt: image.alt(),
        },
        None => ImagePayload {
            src: img.get_attribute("src").unwrap_or_default(),
            alt: img.get_attribute("alt").unwrap_or_default(),
        },
    }
}

fn init_image_modal(page: &Page, _: &SiteConfig) -> Result<(), SiteError> {
    let images = page.all(MODAL_IMAGES);
    if images.is_empty() {
        debug!("No images for the lightbox");
        return Ok(());
    }

    let modal = ImageModal::new(BrowserModal::new(&page.document)?, DocumentKeys::new(&page.document));
    for img in images {
        img.set_style("cursor", "pointer");
        let modal = modal.clone();
        let source = img.clone();
        listen(&img, "click", move |_| modal.open(image_payload(&source)))?;
    }
    Ok(())
}

fn init_innovations(page: &Page, _: &SiteConfig) -> Result<(), SiteError> {
    effects::cascade_innovations(&page.all(".innovations li"));
    Ok(())
}

fn init_process_steps(page: &Page, _: &SiteConfig) -> Result<(), SiteError> {
    effects::cascade_process_steps(&page.all(".process-step"));
    Ok(())
}
