use log::info;

mod config;
mod dom;
mod error;
mod page;
mod timers;
mod components {
    pub mod carousel;
    pub mod contact_form;
    pub mod effects;
    pub mod mobile_menu;
    pub mod modal;
    pub mod notification;
    pub mod particles;
    pub mod reveal;
    pub mod scroll_tracker;
    pub mod smooth_scroll;
    pub mod toggle;
}

#[cfg(test)]
mod testing;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site behaviours");
    page::init();
}
