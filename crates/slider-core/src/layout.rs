//! Handle and range-fill placement for the rendering layer
//!
//! Positions are percentages along the track axis: the left offset of a
//! horizontal slider, the bottom offset of a vertical one.

use crate::config::{Orientation, SliderConfig, SliderProps};
use crate::mapper::value_to_percent;
use crate::state::Slider;
use crate::value::{Handle, SliderValue};

/// Where one handle sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePosition {
    pub handle: Handle,
    /// Offset along the axis, clamped to `0..=100`
    pub percent: f64,
    /// Domain value under the handle (reported as the accessible current value)
    pub value: f64,
    /// Last pressed or focused handle
    pub active: bool,
}

/// Highlighted part of the track
///
/// Single sliders fill from the track start to the handle; range sliders
/// fill between the two handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFill {
    pub offset: f64,
    pub extent: f64,
}

/// Everything a renderer needs to place the slider's parts
#[derive(Debug, Clone, PartialEq)]
pub struct SliderLayout {
    pub orientation: Orientation,
    pub handles: Vec<HandlePosition>,
    pub fill: RangeFill,
    /// Accessible bounds
    pub min: f64,
    pub max: f64,
    /// Handles should not animate while dragged
    pub dragging: bool,
    pub disabled: bool,
}

impl SliderLayout {
    pub fn compute(props: &SliderProps, active: Handle, dragging: bool) -> Self {
        let config = &props.config;
        let value = props.resolved_value();

        let handles: Vec<HandlePosition> = value
            .handles()
            .iter()
            .map(|&handle| {
                let v = value.get(handle);
                HandlePosition {
                    handle,
                    percent: handle_percent(v, config),
                    value: v,
                    active: handle == active,
                }
            })
            .collect();

        let fill = match value {
            SliderValue::Single(_) => RangeFill {
                offset: 0.0,
                extent: handles[0].percent,
            },
            SliderValue::Range(_) => RangeFill {
                offset: handles[0].percent,
                extent: handles[1].percent - handles[0].percent,
            },
        };

        Self {
            orientation: config.orientation,
            handles,
            fill,
            min: config.min,
            max: config.max,
            dragging,
            disabled: config.disabled,
        }
    }

    /// Position of `handle`, if this slider has it
    pub fn handle(&self, handle: Handle) -> Option<&HandlePosition> {
        self.handles.iter().find(|h| h.handle == handle)
    }
}

/// Percent offset of a value, pinned to the track ends when out of range
fn handle_percent(value: f64, config: &SliderConfig) -> f64 {
    if value < config.min {
        0.0
    } else if value > config.max {
        100.0
    } else {
        value_to_percent(value, config.min, config.max)
    }
}

impl Slider {
    /// Placement of handles and fill for the current props
    pub fn layout(&self) -> SliderLayout {
        SliderLayout::compute(self.props(), self.active_handle(), self.is_dragging())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_layout() {
        let props = SliderProps::new(SliderConfig::new(0.0, 200.0), 50.0.into());
        let layout = SliderLayout::compute(&props, Handle::Single, false);

        assert_eq!(layout.handles.len(), 1);
        assert_eq!(layout.handles[0].percent, 25.0);
        assert!(layout.handles[0].active);
        assert_eq!(layout.fill, RangeFill { offset: 0.0, extent: 25.0 });
    }

    #[test]
    fn test_out_of_range_values_pin_to_ends() {
        let props = SliderProps::new(SliderConfig::new(0.0, 10.0).with_range(true), [-5.0, 50.0].into());
        let layout = SliderLayout::compute(&props, Handle::End, true);

        assert_eq!(layout.handle(Handle::Start).map(|h| h.percent), Some(0.0));
        assert_eq!(layout.handle(Handle::End).map(|h| h.percent), Some(100.0));
        assert_eq!(layout.fill, RangeFill { offset: 0.0, extent: 100.0 });
        assert!(layout.dragging);
    }

    #[test]
    fn test_range_fill_between_handles() {
        let props = SliderProps::new(SliderConfig::default().with_range(true), [20.0, 80.0].into());
        let layout = SliderLayout::compute(&props, Handle::Start, false);

        assert_eq!(layout.fill, RangeFill { offset: 20.0, extent: 60.0 });
        assert_eq!(layout.handle(Handle::End).map(|h| h.value), Some(80.0));
        assert!(layout.handle(Handle::Single).is_none());
    }
}
