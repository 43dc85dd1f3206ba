// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the console screens.
//!
//! The `App` struct wires together the screens and translates their effects
//! into side effects like report loading, chat scheduling or classifier
//! calls. Navigation policy lives here: entering a screen rebuilds it, so
//! every visit starts from a freshly mounted state.

mod message;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::config::{self, Config};
use crate::feed::playback::RetryPolicy;
use crate::feed::{self, FeedDescriptor};
use crate::ui::{dashboard, detail, landing, sonar_screen};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 1000;
pub const MIN_WINDOW_HEIGHT: u32 = 700;

/// Root Iced application state bridging the screens and the config.
pub struct App {
    config: Config,
    roster: Vec<FeedDescriptor>,
    retry_policy: RetryPolicy,
    screen: Screen,
    landing: landing::State,
    dashboard: dashboard::State,
    detail: Option<detail::State>,
    sonar: sonar_screen::State,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("feeds", &self.roster.len())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    let icon = crate::icon::load_window_icon();

    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        icon,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from config and CLI flags.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load(flags.config_dir.as_deref()).unwrap_or_else(|err| {
            eprintln!("Failed to load config: {}", err);
            Config::default()
        });

        let assets_dir: PathBuf = flags
            .assets_dir
            .clone()
            .unwrap_or_else(|| config.assets_dir());

        let roster = match flags
            .roster_path
            .clone()
            .or_else(|| config.general.roster_path.clone())
        {
            Some(path) => feed::load_roster(&path, &assets_dir),
            None => feed::builtin_roster(&assets_dir),
        };

        let retry_policy = RetryPolicy {
            delay: Duration::from_millis(config.retry_delay_ms()),
            max_retries: config.recovery.max_retries,
        };

        let dashboard = dashboard::State::new(&roster, retry_policy);

        let app = App {
            config,
            roster,
            retry_policy,
            screen: Screen::Landing,
            landing: landing::State::new(),
            dashboard,
            detail: None,
            sonar: sonar_screen::State::default(),
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        "Sentry Console".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::subscription(self)
    }
}
