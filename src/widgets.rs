//! Headless list elements that present text.
//!
//! These elements keep their presented state in memory. They are what a
//! [`HeadlessHost`](crate::HeadlessHost) instantiates in tests and in
//! applications that drive a [`RecyclingList`](crate::RecyclingList) without
//! a renderer.

mod input;
mod label;

pub use input::TextIo;
pub use label::TextDisplay;

#[derive(Debug, Clone, PartialEq)]
struct ElementState {
    text: String,
    active: bool,
    vertical_position: f32,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            text: String::new(),
            active: true,
            vertical_position: 0.,
        }
    }
}
