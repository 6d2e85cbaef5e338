//! Track geometry capture
//!
//! The track's position is read once when a drag session (or bar click)
//! starts and reused for every move of that gesture, so scrolling or
//! resizing mid-drag does not shift the mapping.

use iced::{Point, Rectangle, Vector};

/// Source of the track's on-screen geometry
///
/// Implemented by the rendering layer for the element the handles slide on.
pub trait TrackSurface {
    /// Bounding box of the track relative to the viewport
    fn bounds(&self) -> Rectangle;

    /// Current page scroll offset
    fn scroll_offset(&self) -> Vector {
        Vector::ZERO
    }
}

/// A track with fixed bounds that never scrolls
impl TrackSurface for Rectangle {
    fn bounds(&self) -> Rectangle {
        *self
    }
}

/// Fixed bounds plus a fixed scroll offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrolledTrack {
    pub bounds: Rectangle,
    pub scroll: Vector,
}

impl TrackSurface for ScrolledTrack {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn scroll_offset(&self) -> Vector {
        self.scroll
    }
}

/// Track position in page coordinates, captured at gesture start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    /// Top-left corner including the scroll offset
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl TrackGeometry {
    pub fn new(origin_x: f32, origin_y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(origin_x, origin_y),
            width,
            height,
        }
    }

    /// True when either extent is zero (mapping yields non-finite values)
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Read the surface's bounds and scroll offset into page coordinates
pub fn capture_geometry(surface: &dyn TrackSurface) -> TrackGeometry {
    let bounds = surface.bounds();
    let scroll = surface.scroll_offset();
    let geometry = TrackGeometry::new(
        bounds.x + scroll.x,
        bounds.y + scroll.y,
        bounds.width,
        bounds.height,
    );

    if geometry.is_degenerate() {
        log::debug!("capture_geometry: degenerate track {:?}", geometry);
    }

    geometry
}
