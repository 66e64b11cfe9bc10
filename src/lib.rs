//! A scrollable list that displays an unbounded number of entries using only
//! as many elements as fit its viewport.
//!
//! A [`RecyclingList`] owns the full list of values and a small pool of
//! elements created by its [`ScrollHost`]. As the host scrolls, the pool is
//! moved and rebound to the entries that came into view, so the cost of each
//! frame depends on the viewport's size rather than on the list's length.
//!
//! Elements implement [`Display`] to present a value and [`ListElement`] to be
//! placed and shown by the list. Elements may also expose interaction
//! capabilities from [`triggers`]; the list forwards those events through its
//! [`ListEvents`], translated to indices into the full list.
//!
//! ```rust
//! use recycling_list::widgets::TextDisplay;
//! use recycling_list::{HeadlessHost, RecyclingList};
//!
//! let host = HeadlessHost::new(200., TextDisplay::new);
//! let mut list: RecyclingList<String, _> = RecyclingList::new(host);
//! list.set_list((0..10_000).map(|i| i.to_string()).collect());
//! assert_eq!(list.pool_len(), 7);
//!
//! list.host_mut().scroll_to(123.);
//! list.update();
//! assert_eq!(list.current_start_index(), 3);
//! assert_eq!(list.display_element(3).map(TextDisplay::text).as_deref(), Some("3"));
//! ```
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod display;
pub mod event;
mod headless;
mod host;
mod list;
pub mod triggers;
pub mod viewport;
pub mod widgets;

pub use display::{Display, ListElement};
pub use event::{Event, Subscription};
pub use headless::HeadlessHost;
pub use host::ScrollHost;
pub use list::{EditError, ListConfig, ListEvents, RecyclingList, DEFAULT_ROW_HEIGHT};
pub use triggers::{
    TriggerOnClick, TriggerOnHover, TriggerOnSelect, TriggerOnValueChange, TriggerOnValueEditEnd,
    Triggers,
};

/// A [`RecyclingList`] of strings.
pub type TextList<H> = RecyclingList<String, H>;

/// Installs a global `tracing` subscriber that prints to stdout.
///
/// The default level is `INFO` in debug builds and `ERROR` in release builds,
/// and can be overridden with the `RUST_LOG` environment variable. Does
/// nothing if a global subscriber is already installed.
#[cfg(feature = "tracing-output")]
pub fn initialize_tracing() {
    use tracing::Level;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    #[cfg(debug_assertions)]
    const MAX_LEVEL: Level = Level::INFO;
    #[cfg(not(debug_assertions))]
    const MAX_LEVEL: Level = Level::ERROR;

    let _result = tracing_subscriber::fmt::fmt()
        .with_max_level(MAX_LEVEL)
        .finish()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(MAX_LEVEL).into())
                .from_env_lossy(),
        )
        .try_init();
}
