//! Input events and output notifications for the slider

use iced::keyboard::Key;
use iced::Point;

use crate::value::{Handle, SliderValue};

/// Device a gesture came from (selects which global listeners to bind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// Pointer coordinates of a move event, in page space
#[derive(Debug, Clone, PartialEq)]
pub enum PointerPosition {
    Mouse(Point),
    /// Active touch points; the first one drives the slider
    Touch(Vec<Point>),
}

impl PointerPosition {
    /// The point that drives the slider, if any
    pub fn primary(&self) -> Option<Point> {
        match self {
            PointerPosition::Mouse(point) => Some(*point),
            PointerPosition::Touch(points) => points.first().copied(),
        }
    }
}

impl From<Point> for PointerPosition {
    fn from(point: Point) -> Self {
        PointerPosition::Mouse(point)
    }
}

/// Events delivered to the slider by the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum SliderEvent {
    // ─────────────────────────────────────────────────────────────────────
    // Handle events (from the handle elements)
    // ─────────────────────────────────────────────────────────────────────
    /// Mouse down or touch start on a handle
    HandlePressed { handle: Handle, source: InputSource },

    /// Key pressed while a handle has focus
    KeyPressed { handle: Handle, key: Key },

    // ─────────────────────────────────────────────────────────────────────
    // Global events (from bound listeners)
    // ─────────────────────────────────────────────────────────────────────
    /// Pointer moved anywhere on screen
    PointerMoved(PointerPosition),

    /// Mouse up or touch end anywhere on screen
    PointerReleased,

    // ─────────────────────────────────────────────────────────────────────
    // Track events
    // ─────────────────────────────────────────────────────────────────────
    /// Click on the track element (also delivered after a handle press)
    BarClicked(Point),
}

/// Notifications the slider emits to its owner, in event order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderNotification {
    /// A new value was committed (every move tick, bar click or key step)
    Changed(SliderValue),
    /// A drag session or bar click finished with this value
    SlideEnd(SliderValue),
}

impl SliderNotification {
    pub fn value(&self) -> SliderValue {
        match self {
            SliderNotification::Changed(value) | SliderNotification::SlideEnd(value) => *value,
        }
    }
}
