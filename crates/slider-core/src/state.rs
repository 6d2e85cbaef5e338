//! Slider interaction state machine
//!
//! ```text
//!            HandlePressed                 PointerReleased
//!   Idle ───────────────────► Dragging ───────────────────► Idle
//!                               │  ▲                         (SlideEnd)
//!                  PointerMoved │  │ (Changed)
//!                               └──┘
//!
//!   BarClicked  : Idle ──► Changed + SlideEnd ──► Idle   (single tick)
//!   KeyPressed  : Idle ──► Changed                      (no session)
//! ```
//!
//! The slider never owns its value. Each render the owner hands over
//! [`SliderProps`]; events produce [`SliderNotification`]s proposing a new
//! value, which the owner applies and passes back through
//! [`Slider::set_props`].

use std::rc::Rc;

use iced::keyboard::{key::Named, Key};
use iced::Point;

use crate::config::SliderProps;
use crate::geometry::{capture_geometry, TrackGeometry, TrackSurface};
use crate::listeners::{DetachedHost, ListenerGuard, ListenerHost};
use crate::mapper::{percent_to_value, pointer_to_percent, quantize, update_value};
use crate::message::{InputSource, PointerPosition, SliderEvent, SliderNotification};
use crate::value::{Handle, SliderValue};

/// State held for one drag gesture
///
/// Dropping the session releases its global listeners.
#[derive(Debug)]
pub struct DragSession {
    handle: Handle,
    geometry: TrackGeometry,
    last_committed: Option<SliderValue>,
    _listeners: ListenerGuard,
}

impl DragSession {
    /// Handle being dragged
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Track geometry captured when the gesture started
    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Last value committed during this gesture
    pub fn last_committed(&self) -> Option<SliderValue> {
        self.last_committed
    }
}

/// Interaction core of a single or range slider
pub struct Slider {
    surface: Box<dyn TrackSurface>,
    host: Rc<dyn ListenerHost>,
    props: SliderProps,
    /// Last handle pressed or focused; survives the gesture for styling
    active_handle: Handle,
    /// Set by a handle press so the click that follows it is not a bar click
    handle_clicked: bool,
    session: Option<DragSession>,
}

impl Slider {
    /// Create a slider over `surface` whose drag listeners live on `host`
    pub fn new(
        surface: impl TrackSurface + 'static,
        host: Rc<dyn ListenerHost>,
        props: SliderProps,
    ) -> Self {
        let active_handle = Handle::primary(props.config.range);
        Self {
            surface: Box::new(surface),
            host,
            props,
            active_handle,
            handle_clicked: false,
            session: None,
        }
    }

    /// Create a slider whose host forwards pointer events without listener
    /// registration
    pub fn detached(surface: impl TrackSurface + 'static, props: SliderProps) -> Self {
        Self::new(surface, Rc::new(DetachedHost), props)
    }

    pub fn props(&self) -> &SliderProps {
        &self.props
    }

    /// Replace the per-render inputs
    ///
    /// Becoming disabled ends any running gesture silently.
    pub fn set_props(&mut self, props: SliderProps) {
        if props.config.disabled && self.session.is_some() {
            log::debug!("Slider: disabled during drag, releasing listeners");
            self.session = None;
        }
        if props.config.range != self.props.config.range {
            self.active_handle = Handle::primary(props.config.range);
        }
        self.props = props;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn active_handle(&self) -> Handle {
        self.active_handle
    }

    /// The value the slider currently displays
    pub fn value(&self) -> SliderValue {
        self.props.resolved_value()
    }

    /// End any running gesture without notifying
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Slider: drag cancelled");
        }
    }

    /// Feed an input event through the state machine
    ///
    /// Returns the notifications it produced, in emission order. A disabled
    /// slider ignores every event.
    pub fn handle_event(&mut self, event: SliderEvent) -> Vec<SliderNotification> {
        if self.props.config.disabled {
            return Vec::new();
        }

        match event {
            SliderEvent::HandlePressed { handle, source } => {
                self.start_drag(handle, source);
                Vec::new()
            }
            SliderEvent::PointerMoved(position) => self.drag(&position),
            SliderEvent::PointerReleased => self.end_drag(),
            SliderEvent::BarClicked(point) => self.bar_click(point),
            SliderEvent::KeyPressed { handle, key } => self.key_press(handle, &key),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    fn start_drag(&mut self, handle: Handle, source: InputSource) {
        let handle = self.normalize(handle);

        // Release a previous gesture before binding, so a repeated kind
        // is not unbound right after being bound again
        self.cancel();

        let geometry = capture_geometry(self.surface.as_ref());
        let listeners = ListenerGuard::acquire(self.host.clone(), source);
        log::debug!(
            "Slider: drag start on {:?} via {:?}, track {:?}",
            handle,
            source,
            geometry
        );

        self.session = Some(DragSession {
            handle,
            geometry,
            last_committed: None,
            _listeners: listeners,
        });
        self.handle_clicked = true;
        self.active_handle = handle;
    }

    fn drag(&mut self, position: &PointerPosition) -> Vec<SliderNotification> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let Some(pointer) = position.primary() else {
            return Vec::new();
        };

        let handle = session.handle;
        let geometry = session.geometry;
        let value = self.set_value(pointer, &geometry, handle);
        log::trace!("Slider: drag {:?} -> {}", pointer, value);

        if let Some(session) = self.session.as_mut() {
            session.last_committed = Some(value);
        }
        vec![SliderNotification::Changed(value)]
    }

    fn end_drag(&mut self) -> Vec<SliderNotification> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };

        let value = session
            .last_committed
            .unwrap_or_else(|| self.props.resolved_value());
        log::debug!("Slider: drag end on {:?} at {}", session.handle, value);

        vec![SliderNotification::SlideEnd(value)]
    }

    fn bar_click(&mut self, point: Point) -> Vec<SliderNotification> {
        if std::mem::take(&mut self.handle_clicked) {
            return Vec::new();
        }

        let geometry = capture_geometry(self.surface.as_ref());
        let handle = self.handle_for_click(point, &geometry);
        self.active_handle = handle;

        let value = self.set_value(point, &geometry, handle);
        log::debug!("Slider: bar click on {:?} at {}", handle, value);

        vec![
            SliderNotification::Changed(value),
            SliderNotification::SlideEnd(value),
        ]
    }

    fn key_press(&mut self, handle: Handle, key: &Key) -> Vec<SliderNotification> {
        let handle = self.normalize(handle);
        self.active_handle = handle;

        let Some(direction) = key_direction(key) else {
            return Vec::new();
        };

        let current = self.props.resolved_value();
        let proposed = current.get(handle) + self.props.config.key_step() * direction;
        let commit = update_value(proposed, handle, &current, &self.props.config);

        vec![SliderNotification::Changed(commit.value)]
    }

    // ─────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────

    /// Map a pointer position to a committed value for `handle`
    ///
    /// A non-finite mapping (degenerate track) counts as no displacement.
    fn set_value(&self, pointer: Point, geometry: &TrackGeometry, handle: Handle) -> SliderValue {
        let config = &self.props.config;
        let current = self.props.resolved_value();
        let previous = current.get(handle);

        let raw = self.raw_value(pointer, geometry);
        let proposed = if raw.is_finite() {
            quantize(raw, previous, config.step)
        } else {
            previous
        };

        update_value(proposed, handle, &current, config).value
    }

    fn raw_value(&self, pointer: Point, geometry: &TrackGeometry) -> f64 {
        let config = &self.props.config;
        let percent = pointer_to_percent(pointer, geometry, config.orientation);
        percent_to_value(percent, config.min, config.max)
    }

    /// Handle a bar click moves: the only one, or the nearer end of a range
    fn handle_for_click(&self, point: Point, geometry: &TrackGeometry) -> Handle {
        let SliderValue::Range([low, high]) = self.props.resolved_value() else {
            return Handle::Single;
        };

        let raw = self.raw_value(point, geometry);
        if !raw.is_finite() || raw < low {
            Handle::Start
        } else if raw > high {
            Handle::End
        } else if raw - low <= high - raw {
            Handle::Start
        } else {
            Handle::End
        }
    }

    /// Map a handle onto the ones the current mode has
    fn normalize(&self, handle: Handle) -> Handle {
        match (self.props.config.range, handle) {
            (false, _) => Handle::Single,
            (true, Handle::Single) => Handle::Start,
            (true, handle) => handle,
        }
    }
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("props", &self.props)
            .field("active_handle", &self.active_handle)
            .field("handle_clicked", &self.handle_clicked)
            .field("session", &self.session)
            .finish()
    }
}

/// +1 for increase keys, -1 for decrease keys
fn key_direction(key: &Key) -> Option<f64> {
    match key {
        Key::Named(Named::ArrowRight | Named::ArrowUp) => Some(1.0),
        Key::Named(Named::ArrowLeft | Named::ArrowDown) => Some(-1.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Orientation, SliderConfig};
    use crate::listeners::testing::RecordingHost;
    use crate::listeners::ListenerKind;
    use iced::{Rectangle, Size};
    use proptest::prelude::*;
    use std::cell::Cell;

    /// Track whose bounds the test can move after a gesture starts
    #[derive(Clone)]
    struct MovableTrack(Rc<Cell<Rectangle>>);

    impl TrackSurface for MovableTrack {
        fn bounds(&self) -> Rectangle {
            self.0.get()
        }
    }

    /// Owner that feeds every committed value back, like a controlled component
    struct Owner {
        slider: Slider,
        host: Rc<RecordingHost>,
        track: Rc<Cell<Rectangle>>,
    }

    impl Owner {
        fn new(config: SliderConfig, value: SliderValue) -> Self {
            Self::with_track(config, value, Rectangle::new(Point::ORIGIN, Size::new(100.0, 100.0)))
        }

        fn with_track(config: SliderConfig, value: SliderValue, bounds: Rectangle) -> Self {
            let host = Rc::new(RecordingHost::default());
            let track = Rc::new(Cell::new(bounds));
            let slider = Slider::new(
                MovableTrack(track.clone()),
                host.clone(),
                SliderProps::new(config, value),
            );
            Self { slider, host, track }
        }

        fn send(&mut self, event: SliderEvent) -> Vec<SliderNotification> {
            let out = self.slider.handle_event(event);
            for notification in &out {
                if let SliderNotification::Changed(value) = notification {
                    let mut props = self.slider.props().clone();
                    props.value = Some(*value);
                    self.slider.set_props(props);
                }
            }
            out
        }

        fn press(&mut self, handle: Handle) -> Vec<SliderNotification> {
            self.send(SliderEvent::HandlePressed {
                handle,
                source: InputSource::Mouse,
            })
        }

        fn move_to(&mut self, x: f32, y: f32) -> Vec<SliderNotification> {
            self.send(SliderEvent::PointerMoved(Point::new(x, y).into()))
        }

        fn key(&mut self, handle: Handle, named: Named) -> Vec<SliderNotification> {
            self.send(SliderEvent::KeyPressed {
                handle,
                key: Key::Named(named),
            })
        }
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn changed(value: impl Into<SliderValue>) -> SliderNotification {
        SliderNotification::Changed(value.into())
    }

    #[test]
    fn test_key_step_increase() {
        let mut owner = Owner::new(SliderConfig::new(0.0, 100.0).with_step(10.0), 50.0.into());
        assert_eq!(owner.key(Handle::Single, Named::ArrowRight), vec![changed(60.0)]);
        assert_eq!(owner.key(Handle::Single, Named::ArrowDown), vec![changed(50.0)]);
    }

    #[test]
    fn test_key_step_clamps_to_max() {
        let mut owner = Owner::new(SliderConfig::new(0.0, 100.0).with_step(10.0), 95.0.into());
        assert_eq!(owner.key(Handle::Single, Named::ArrowUp), vec![changed(100.0)]);
        assert!(!owner.slider.is_dragging());
    }

    #[test]
    fn test_key_without_step_uses_one() {
        let mut owner = Owner::new(SliderConfig::default(), 7.5.into());
        assert_eq!(owner.key(Handle::Single, Named::ArrowLeft), vec![changed(6.5)]);
    }

    #[test]
    fn test_other_keys_only_focus_handle() {
        let mut owner = Owner::new(
            SliderConfig::default().with_range(true),
            [20.0, 80.0].into(),
        );
        assert!(owner.key(Handle::End, Named::Enter).is_empty());
        assert_eq!(owner.slider.active_handle(), Handle::End);
        assert!(owner.host.log.borrow().is_empty());
    }

    #[test]
    fn test_key_step_on_range_end() {
        let mut owner = Owner::new(
            SliderConfig::default().with_range(true).with_step(5.0),
            [20.0, 80.0].into(),
        );
        assert_eq!(owner.key(Handle::End, Named::ArrowLeft), vec![changed([20.0, 75.0])]);
    }

    #[test]
    fn test_range_start_cannot_pass_end() {
        let mut owner = Owner::new(
            SliderConfig::default().with_range(true),
            [20.0, 80.0].into(),
        );
        owner.press(Handle::Start);
        assert_eq!(owner.move_to(90.0, 0.0), vec![changed([80.0, 80.0])]);
    }

    #[test]
    fn test_drag_session_lifecycle() {
        init_logging();
        let mut owner = Owner::new(SliderConfig::default(), 0.0.into());

        assert!(owner.press(Handle::Single).is_empty());
        assert!(owner.slider.is_dragging());
        assert_eq!(owner.host.bound(), vec![ListenerKind::MouseMove, ListenerKind::MouseUp]);

        assert_eq!(owner.move_to(30.4, 0.0), vec![changed(30.0)]);
        assert_eq!(owner.move_to(55.0, 0.0), vec![changed(55.0)]);
        assert_eq!(
            owner.send(SliderEvent::PointerReleased),
            vec![SliderNotification::SlideEnd(55.0.into())]
        );

        assert!(!owner.slider.is_dragging());
        assert!(owner.host.bound().is_empty());
        assert_eq!(owner.host.unbind_count(), 2);

        // No session, no notifications
        assert!(owner.move_to(80.0, 0.0).is_empty());
        assert!(owner.send(SliderEvent::PointerReleased).is_empty());
    }

    #[test]
    fn test_move_notifies_even_without_change() {
        let mut owner = Owner::new(SliderConfig::default(), 40.0.into());
        owner.press(Handle::Single);
        assert_eq!(owner.move_to(40.0, 0.0), vec![changed(40.0)]);
        assert_eq!(owner.move_to(40.0, 0.0), vec![changed(40.0)]);
    }

    #[test]
    fn test_release_without_move_reports_current_value() {
        let mut owner = Owner::new(SliderConfig::default(), 12.0.into());
        owner.press(Handle::Single);
        assert_eq!(
            owner.send(SliderEvent::PointerReleased),
            vec![SliderNotification::SlideEnd(12.0.into())]
        );
    }

    #[test]
    fn test_slide_end_carries_last_commit_without_feedback() {
        // Owner that never applies changes: drag end still reports the commit
        let mut slider = Slider::detached(
            Rectangle::new(Point::ORIGIN, Size::new(100.0, 10.0)),
            SliderProps::new(SliderConfig::default(), 10.0.into()),
        );
        slider.handle_event(SliderEvent::HandlePressed {
            handle: Handle::Single,
            source: InputSource::Mouse,
        });
        slider.handle_event(SliderEvent::PointerMoved(Point::new(70.0, 0.0).into()));
        assert_eq!(
            slider.handle_event(SliderEvent::PointerReleased),
            vec![SliderNotification::SlideEnd(70.0.into())]
        );
    }

    #[test]
    fn test_vertical_drag_maps_from_bottom() {
        let mut owner = Owner::with_track(
            SliderConfig::default().with_orientation(Orientation::Vertical),
            0.0.into(),
            Rectangle::new(Point::new(0.0, 100.0), Size::new(10.0, 200.0)),
        );
        owner.press(Handle::Single);
        assert_eq!(owner.move_to(5.0, 150.0), vec![changed(75.0)]);
    }

    #[test]
    fn test_geometry_captured_once_per_session() {
        let mut owner = Owner::new(SliderConfig::default(), 0.0.into());
        owner.press(Handle::Single);

        // Track moves mid-drag; mapping keeps the captured origin
        owner
            .track
            .set(Rectangle::new(Point::new(50.0, 0.0), Size::new(100.0, 100.0)));
        assert_eq!(owner.move_to(60.0, 0.0), vec![changed(60.0)]);

        owner.send(SliderEvent::PointerReleased);
        owner.send(SliderEvent::BarClicked(Point::new(60.0, 0.0)));

        // Next session sees the new position
        owner.press(Handle::Single);
        assert_eq!(owner.move_to(60.0, 0.0), vec![changed(10.0)]);
    }

    #[test]
    fn test_stepped_drag_uses_previous_lattice() {
        let mut owner = Owner::new(SliderConfig::default().with_step(10.0), 53.0.into());
        owner.press(Handle::Single);
        assert_eq!(owner.move_to(78.0, 0.0), vec![changed(73.0)]);
        assert_eq!(owner.move_to(30.0, 0.0), vec![changed(33.0)]);
    }

    #[test]
    fn test_degenerate_track_keeps_value() {
        let mut owner = Owner::with_track(
            SliderConfig::default(),
            25.0.into(),
            Rectangle::new(Point::ORIGIN, Size::new(0.0, 0.0)),
        );
        owner.press(Handle::Single);
        assert_eq!(owner.move_to(40.0, 0.0), vec![changed(25.0)]);
    }

    #[test]
    fn test_bar_click_is_single_tick() {
        init_logging();
        let mut owner = Owner::new(SliderConfig::default(), 0.0.into());
        let out = owner.send(SliderEvent::BarClicked(Point::new(42.0, 3.0)));
        assert_eq!(
            out,
            vec![changed(42.0), SliderNotification::SlideEnd(42.0.into())]
        );
        assert!(!owner.slider.is_dragging());
        assert!(owner.host.log.borrow().is_empty());
    }

    #[test]
    fn test_click_after_handle_press_is_ignored_once() {
        let mut owner = Owner::new(SliderConfig::default(), 0.0.into());
        owner.press(Handle::Single);
        owner.move_to(20.0, 0.0);
        owner.send(SliderEvent::PointerReleased);

        // The click that completes the handle press
        assert!(owner.send(SliderEvent::BarClicked(Point::new(20.0, 0.0))).is_empty());
        // A later click on the bar works again
        assert_eq!(owner.send(SliderEvent::BarClicked(Point::new(90.0, 0.0))).len(), 2);
    }

    #[test]
    fn test_range_bar_click_moves_nearest_handle() {
        let mut owner = Owner::new(
            SliderConfig::default().with_range(true),
            [20.0, 80.0].into(),
        );

        let out = owner.send(SliderEvent::BarClicked(Point::new(70.0, 0.0)));
        assert_eq!(out[0], changed([20.0, 70.0]));
        assert_eq!(owner.slider.active_handle(), Handle::End);

        let out = owner.send(SliderEvent::BarClicked(Point::new(5.0, 0.0)));
        assert_eq!(out[0], changed([5.0, 70.0]));
        assert_eq!(owner.slider.active_handle(), Handle::Start);
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut owner = Owner::new(SliderConfig::default().with_disabled(true), 50.0.into());
        assert!(owner.press(Handle::Single).is_empty());
        assert!(owner.move_to(10.0, 0.0).is_empty());
        assert!(owner.key(Handle::Single, Named::ArrowUp).is_empty());
        assert!(owner.send(SliderEvent::BarClicked(Point::new(10.0, 0.0))).is_empty());
        assert!(!owner.slider.is_dragging());
        assert!(owner.host.log.borrow().is_empty());
    }

    #[test]
    fn test_disabling_mid_drag_releases_listeners() {
        let mut owner = Owner::new(SliderConfig::default(), 50.0.into());
        owner.press(Handle::Single);

        let mut props = owner.slider.props().clone();
        props.config.disabled = true;
        owner.slider.set_props(props);

        assert!(!owner.slider.is_dragging());
        assert!(owner.host.bound().is_empty());
        assert!(owner.send(SliderEvent::PointerReleased).is_empty());
    }

    #[test]
    fn test_drop_mid_drag_releases_listeners() {
        let host = Rc::new(RecordingHost::default());
        let mut slider = Slider::new(
            Rectangle::new(Point::ORIGIN, Size::new(100.0, 10.0)),
            host.clone(),
            SliderProps::default(),
        );
        slider.handle_event(SliderEvent::HandlePressed {
            handle: Handle::Single,
            source: InputSource::Touch,
        });
        assert_eq!(host.bound().len(), 2);

        drop(slider);
        assert!(host.bound().is_empty());
    }

    #[test]
    fn test_overlapping_press_does_not_leak() {
        let mut owner = Owner::new(SliderConfig::default(), 50.0.into());
        owner.press(Handle::Single);
        owner.press(Handle::Single);
        assert_eq!(owner.host.bound(), vec![ListenerKind::MouseMove, ListenerKind::MouseUp]);

        owner.send(SliderEvent::PointerReleased);
        assert!(owner.host.bound().is_empty());
    }

    #[test]
    fn test_touch_uses_first_point() {
        let mut owner = Owner::new(SliderConfig::default(), 0.0.into());
        owner.send(SliderEvent::HandlePressed {
            handle: Handle::Single,
            source: InputSource::Touch,
        });
        assert_eq!(owner.host.bound(), vec![ListenerKind::TouchMove, ListenerKind::TouchEnd]);

        let touches = PointerPosition::Touch(vec![Point::new(35.0, 0.0), Point::new(90.0, 0.0)]);
        assert_eq!(owner.send(SliderEvent::PointerMoved(touches)), vec![changed(35.0)]);
        assert!(owner
            .send(SliderEvent::PointerMoved(PointerPosition::Touch(Vec::new())))
            .is_empty());
    }

    #[test]
    fn test_single_mode_normalizes_handle() {
        let mut owner = Owner::new(SliderConfig::default(), 0.0.into());
        owner.press(Handle::End);
        assert_eq!(owner.slider.session().map(DragSession::handle), Some(Handle::Single));
    }

    proptest! {
        #[test]
        fn prop_key_steps_stay_in_bounds(start in 0u32..=100, step in 1u32..30, presses in 1usize..30, up in any::<bool>()) {
            let config = SliderConfig::new(0.0, 100.0).with_step(f64::from(step));
            let mut owner = Owner::new(config, f64::from(start).into());
            for _ in 0..presses {
                let key = if up { Named::ArrowUp } else { Named::ArrowDown };
                owner.key(Handle::Single, key);
                let value = owner.slider.value().get(Handle::Single);
                prop_assert!((0.0..=100.0).contains(&value));
            }
        }
    }
}
