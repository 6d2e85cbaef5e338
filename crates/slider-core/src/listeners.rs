//! Global move/end listeners for drag sessions
//!
//! While a handle is dragged, pointer moves and the final release must be
//! caught anywhere on screen, not only over the slider. The host exposes its
//! root input surface through [`ListenerHost`]; a [`ListenerGuard`] binds the
//! pair of listeners a gesture needs and unbinds them when dropped.

use std::rc::Rc;

use crate::message::InputSource;

/// Process-wide listener slots on the host's root input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    MouseMove,
    MouseUp,
    TouchMove,
    TouchEnd,
}

impl ListenerKind {
    /// Move and end listeners used by a gesture from `source`
    pub fn pair_for(source: InputSource) -> [ListenerKind; 2] {
        match source {
            InputSource::Mouse => [ListenerKind::MouseMove, ListenerKind::MouseUp],
            InputSource::Touch => [ListenerKind::TouchMove, ListenerKind::TouchEnd],
        }
    }
}

/// Root input surface that routes global pointer events back to the slider
///
/// Bound listeners should forward moves as
/// [`SliderEvent::PointerMoved`](crate::SliderEvent::PointerMoved) and
/// releases as [`SliderEvent::PointerReleased`](crate::SliderEvent::PointerReleased).
pub trait ListenerHost {
    fn bind(&self, kind: ListenerKind);
    fn unbind(&self, kind: ListenerKind);
}

/// Host that ignores binding requests, for sliders driven directly
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl ListenerHost for DetachedHost {
    fn bind(&self, _kind: ListenerKind) {}
    fn unbind(&self, _kind: ListenerKind) {}
}

/// Bound global listeners, released exactly once on drop
pub struct ListenerGuard {
    host: Rc<dyn ListenerHost>,
    kinds: [ListenerKind; 2],
}

impl ListenerGuard {
    /// Bind the move/end pair for `source`
    pub fn acquire(host: Rc<dyn ListenerHost>, source: InputSource) -> Self {
        let kinds = ListenerKind::pair_for(source);
        for kind in kinds {
            host.bind(kind);
        }
        Self { host, kinds }
    }

    /// Kinds this guard holds
    pub fn kinds(&self) -> &[ListenerKind] {
        &self.kinds
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        for kind in self.kinds {
            self.host.unbind(kind);
        }
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("kinds", &self.kinds)
            .finish()
    }
}

/// Host that records every bind/unbind, for tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub log: RefCell<Vec<(bool, ListenerKind)>>,
    }

    impl RecordingHost {
        /// Listeners currently bound (binds minus unbinds)
        pub fn bound(&self) -> Vec<ListenerKind> {
            let mut bound = Vec::new();
            for (is_bind, kind) in self.log.borrow().iter() {
                if *is_bind {
                    bound.push(*kind);
                } else if let Some(pos) = bound.iter().position(|k| k == kind) {
                    bound.remove(pos);
                } else {
                    panic!("unbind of {:?} without matching bind", kind);
                }
            }
            bound
        }

        pub fn unbind_count(&self) -> usize {
            self.log.borrow().iter().filter(|(b, _)| !b).count()
        }
    }

    impl ListenerHost for RecordingHost {
        fn bind(&self, kind: ListenerKind) {
            self.log.borrow_mut().push((true, kind));
        }

        fn unbind(&self, kind: ListenerKind) {
            self.log.borrow_mut().push((false, kind));
        }
    }
}
