use relm4::prelude::*;
use spindle::Session;
use spinner::config;
use spinner::gui::app::AppModel;
use spinner::sys::runtime;

fn main() {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }
    let session = Session::new(config::load_options());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.spinner");

    app.run::<AppModel>((session, rx));
}
