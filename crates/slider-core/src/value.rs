//! Slider values and handle identities

/// A draggable handle on the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The only handle of a single-value slider
    Single,
    /// Low end of a range slider (index 0)
    Start,
    /// High end of a range slider (index 1)
    End,
}

impl Handle {
    /// Slot index in a range value (None for [`Handle::Single`])
    pub fn index(self) -> Option<usize> {
        match self {
            Handle::Single => None,
            Handle::Start => Some(0),
            Handle::End => Some(1),
        }
    }

    /// Handle for a range slot index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Handle::Start),
            1 => Some(Handle::End),
            _ => None,
        }
    }

    /// The handle to use by default for a slider of the given mode
    pub fn primary(range: bool) -> Self {
        if range {
            Handle::Start
        } else {
            Handle::Single
        }
    }
}

/// The value a slider displays: one number or an ordered `[low, high]` pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderValue {
    Single(f64),
    Range([f64; 2]),
}

impl SliderValue {
    /// Value under a handle
    ///
    /// A single value answers for every handle; a range answers
    /// [`Handle::Single`] with its low end.
    pub fn get(&self, handle: Handle) -> f64 {
        match (self, handle) {
            (SliderValue::Single(v), _) => *v,
            (SliderValue::Range(pair), Handle::End) => pair[1],
            (SliderValue::Range(pair), _) => pair[0],
        }
    }

    /// Copy of this value with the slot under `handle` replaced
    pub fn with(&self, handle: Handle, v: f64) -> SliderValue {
        match (self, handle) {
            (SliderValue::Single(_), _) => SliderValue::Single(v),
            (SliderValue::Range([_, high]), Handle::Start | Handle::Single) => {
                SliderValue::Range([v, *high])
            }
            (SliderValue::Range([low, _]), Handle::End) => SliderValue::Range([*low, v]),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, SliderValue::Range(_))
    }

    /// Handles this value has, in order
    pub fn handles(&self) -> &'static [Handle] {
        match self {
            SliderValue::Single(_) => &[Handle::Single],
            SliderValue::Range(_) => &[Handle::Start, Handle::End],
        }
    }
}

impl From<f64> for SliderValue {
    fn from(v: f64) -> Self {
        SliderValue::Single(v)
    }
}

impl From<[f64; 2]> for SliderValue {
    fn from(pair: [f64; 2]) -> Self {
        SliderValue::Range(pair)
    }
}

impl std::fmt::Display for SliderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliderValue::Single(v) => write!(f, "{}", v),
            SliderValue::Range([low, high]) => write!(f, "{} - {}", low, high),
        }
    }
}
