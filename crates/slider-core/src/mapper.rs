//! Pointer-to-value mapping
//!
//! Pure functions that turn a pointer position into a committed slider
//! value:
//!
//! ```text
//! pointer ──► percent along axis ──► raw value ──► quantized ──► clamped + rounded
//!         pointer_to_percent    percent_to_value   quantize      update_value
//! ```
//!
//! Nothing here clamps before [`update_value`]; percentages outside
//! `0..=100` and values outside `[min, max]` pass through the earlier stages.

use iced::Point;

use crate::config::{Orientation, SliderConfig};
use crate::geometry::TrackGeometry;
use crate::value::{Handle, SliderValue};

/// Decimal digits kept when committing a value
pub const VALUE_PRECISION: usize = 10;

/// Position of `pointer` along the track axis, in percent
///
/// Vertical tracks have their zero at the bottom edge.
pub fn pointer_to_percent(pointer: Point, geometry: &TrackGeometry, orientation: Orientation) -> f64 {
    let origin_x = f64::from(geometry.origin.x);
    let origin_y = f64::from(geometry.origin.y);

    match orientation {
        Orientation::Horizontal => {
            (f64::from(pointer.x) - origin_x) * 100.0 / f64::from(geometry.width)
        }
        Orientation::Vertical => {
            let height = f64::from(geometry.height);
            ((origin_y + height) - f64::from(pointer.y)) * 100.0 / height
        }
    }
}

/// Domain value at `percent` of the way from `min` to `max`
pub fn percent_to_value(percent: f64, min: f64, max: f64) -> f64 {
    (max - min) * (percent / 100.0) + min
}

/// Percent of the way from `min` to `max` that `value` sits (unclamped)
pub fn value_to_percent(value: f64, min: f64, max: f64) -> f64 {
    (value - min) * 100.0 / (max - min)
}

/// Snap a raw value relative to the previous one
///
/// Without a step the value is floored to an integer. With a step, the
/// value moves from `previous` by whole steps, rounding toward `previous`
/// (ceiling when decreasing, floor when increasing). The lattice is anchored
/// at `previous`, not at zero, so an off-lattice previous value stays
/// off-lattice by the same offset.
pub fn quantize(raw: f64, previous: f64, step: Option<f64>) -> f64 {
    let Some(step) = step else {
        return raw.floor();
    };

    let diff = raw - previous;
    let steps = raw / step - previous / step;

    if diff < 0.0 {
        previous + steps.ceil() * step
    } else if diff > 0.0 {
        previous + steps.floor() * step
    } else {
        raw
    }
}

/// Round to [`VALUE_PRECISION`] decimal digits to drop floating-point drift
pub fn round_precision(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", VALUE_PRECISION, value)
        .parse()
        .unwrap_or(value)
}

/// Outcome of [`update_value`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    /// Full value to report, with only the active slot replaced
    pub value: SliderValue,
    /// Whether `value` differs from the value it was computed from
    pub changed: bool,
}

/// Round, clamp and compose a proposed value for `handle`
///
/// - Single value: clamped to `[min, max]`.
/// - Range start: clamped to `[min, high]`.
/// - Range end: clamped to `[low, max]`.
///
/// The other slot of a range is left untouched, so handles never cross.
pub fn update_value(
    proposed: f64,
    handle: Handle,
    current: &SliderValue,
    config: &SliderConfig,
) -> Commit {
    let mut parsed = round_precision(proposed);

    let value = match current {
        SliderValue::Range([low, high]) => {
            if handle == Handle::End {
                if parsed > config.max {
                    parsed = config.max;
                } else if parsed < *low {
                    parsed = *low;
                }
            } else if parsed < config.min {
                parsed = config.min;
            } else if parsed > *high {
                parsed = *high;
            }
            current.with(handle, parsed)
        }
        SliderValue::Single(_) => {
            if parsed < config.min {
                parsed = config.min;
            } else if parsed > config.max {
                parsed = config.max;
            }
            SliderValue::Single(parsed)
        }
    };

    Commit {
        value,
        changed: value != *current,
    }
}
