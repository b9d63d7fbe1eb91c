use clap::Parser;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, DrawingArea};
use log::{info, warn};
use plasma_sweep::animator::Animator;
use plasma_sweep::idle::IdleSuppressor;
use std::cell::RefCell;
use std::rc::Rc;

const APP_ID: &str = "com.github.plasma_sweep";

/// plasma-sweep - Full-screen moving bar to clear image retention on plasma displays
#[derive(Parser, Debug, Clone)]
#[command(name = "plasma-sweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only; RUST_LOG overrides the CLI setting
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting plasma-sweep v{}", env!("CARGO_PKG_VERSION"));

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(build_ui);

    // Run the application (pass empty args since we already parsed them)
    app.run_with_args(&["plasma-sweep"]);
}

fn build_ui(app: &Application) {
    info!("Building UI");

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Plasma Sweep")
        .decorated(false)
        .build();
    window.fullscreen();

    let area = DrawingArea::new();
    area.set_hexpand(true);
    area.set_vexpand(true);
    window.set_child(Some(&area));

    let animator = Animator::attach(&area);

    // Hide the pointer while sweeping. Losing the blank cursor is only a
    // cosmetic impairment, so keep going if it is unavailable.
    match gdk4::Cursor::from_name("none", None) {
        Some(cursor) => window.set_cursor(Some(&cursor)),
        None => warn!("Blank cursor unavailable, pointer stays visible"),
    }

    // Any key press quits
    let key_controller = gtk4::EventControllerKey::new();
    let window_for_key = window.clone();
    key_controller.connect_key_pressed(move |_, _, _, _| {
        window_for_key.close();
        glib::Propagation::Stop
    });
    window.add_controller(key_controller);

    // ...as does any pointer button press
    let gesture_click = gtk4::GestureClick::new();
    gesture_click.set_button(0); // 0 = listen for all buttons
    let window_for_click = window.clone();
    gesture_click.connect_pressed(move |_, _, _, _| {
        window_for_click.close();
    });
    window.add_controller(gesture_click);

    let idle = Rc::new(RefCell::new(IdleSuppressor::start()));

    // Both timers and the cached pattern are released on the close path,
    // whether triggered by key or button.
    let animator_for_close = animator.clone();
    let idle_for_close = idle.clone();
    window.connect_close_request(move |_| {
        info!("Shutting down");
        animator_for_close.borrow_mut().teardown();
        idle_for_close.borrow_mut().stop();
        glib::Propagation::Proceed
    });

    window.present();
}
