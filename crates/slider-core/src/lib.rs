//! Value mapping and drag interaction core for sliders
//!
//! This crate turns pointer, touch and keyboard input into clamped,
//! quantized slider values for single-value and two-handle range sliders.
//! Rendering stays with the host UI; the core only tells it where handles
//! go and which value to apply next.
//!
//! ## Architecture
//!
//! - **Geometry** (`geometry`): the track's page position, captured once per
//!   gesture
//! - **Mapping** (`mapper`): pure math from pointer position to committed value
//! - **State machine** (`state`): drag sessions, bar clicks and key steps
//! - **Listeners** (`listeners`): global move/end listeners held by a guard for
//!   the length of a drag
//!
//! The value is owned by the caller (controlled component). The slider
//! returns [`SliderNotification`]s; the owner applies `Changed` values and
//! hands them back through [`Slider::set_props`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut slider = Slider::new(track, host.clone(), SliderProps::new(config, 50.0.into()));
//!
//! for notification in slider.handle_event(SliderEvent::BarClicked(point)) {
//!     match notification {
//!         SliderNotification::Changed(value) => props.value = Some(value),
//!         SliderNotification::SlideEnd(value) => persist(value),
//!     }
//! }
//! slider.set_props(props);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod listeners;
pub mod mapper;
pub mod message;
pub mod state;
pub mod value;

pub use config::{load_config, read_config, save_config, Orientation, SliderConfig, SliderProps};
pub use error::{ConfigError, ConfigResult};
pub use geometry::{capture_geometry, ScrolledTrack, TrackGeometry, TrackSurface};
pub use layout::{HandlePosition, RangeFill, SliderLayout};
pub use listeners::{DetachedHost, ListenerGuard, ListenerHost, ListenerKind};
pub use mapper::{
    percent_to_value, pointer_to_percent, quantize, round_precision, update_value,
    value_to_percent, Commit, VALUE_PRECISION,
};
pub use message::{InputSource, PointerPosition, SliderEvent, SliderNotification};
pub use state::{DragSession, Slider};
pub use value::{Handle, SliderValue};
