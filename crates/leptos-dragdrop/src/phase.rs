//! Drag Phase State Machine
//!
//! Idle -> Pending (pressed, not moved enough) -> Dragging -> Dropped -> Idle.
//! Releasing while Pending is a click and goes straight back to Idle.

use crate::collision::DropTarget;
use crate::geometry::{Point, Rect};

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Mouse is down on a card but has not moved past the threshold
    Pending {
        id: String,
        origin: Point,
        /// Card rect at press time; sizes the ghost
        source: Rect,
    },
    Dragging {
        id: String,
        pointer: Point,
        /// Pointer position relative to the card's top-left corner
        grab_offset: Point,
        source: Rect,
    },
    /// Released over `target` (None = invalid drop), waiting to settle
    Dropped {
        id: String,
        target: Option<DropTarget>,
    },
}

/// Result of releasing the mouse
#[derive(Clone, Debug, PartialEq)]
pub enum Release {
    /// Never left Pending
    Click(String),
    Drop { id: String, target: DropTarget },
    /// Dragged but released over nothing usable
    Cancelled(String),
    /// Mouse up with no gesture in progress
    Ignored,
}

impl DragPhase {
    pub fn press(id: impl Into<String>, origin: Point, source: Rect) -> Self {
        DragPhase::Pending { id: id.into(), origin, source }
    }

    /// Id of the card that is actually being dragged
    pub fn dragging_id(&self) -> Option<&str> {
        match self {
            DragPhase::Dragging { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging { .. })
    }

    /// Feed a pointer move. Returns true when this move started the drag.
    pub fn motion(&mut self, pointer: Point) -> bool {
        match self {
            DragPhase::Pending { id, origin, source } => {
                let dx = (pointer.x - origin.x).abs();
                let dy = (pointer.y - origin.y).abs();
                if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                    let grab_offset = Point::new(origin.x - source.left, origin.y - source.top);
                    *self = DragPhase::Dragging {
                        id: std::mem::take(id),
                        pointer,
                        grab_offset,
                        source: *source,
                    };
                    return true;
                }
                false
            }
            DragPhase::Dragging { pointer: current, .. } => {
                *current = pointer;
                false
            }
            _ => false,
        }
    }

    /// Where the ghost should be drawn right now
    pub fn ghost_rect(&self) -> Option<Rect> {
        match self {
            DragPhase::Dragging { pointer, grab_offset, source, .. } => Some(
                source.moved_to(Point::new(pointer.x - grab_offset.x, pointer.y - grab_offset.y)),
            ),
            _ => None,
        }
    }

    /// Mouse released with `target` under the pointer
    pub fn release(&mut self, target: Option<DropTarget>) -> Release {
        match std::mem::take(self) {
            DragPhase::Pending { id, .. } => Release::Click(id),
            DragPhase::Dragging { id, .. } => {
                let target = target.filter(|t| !matches!(t, DropTarget::Card(tid) if *tid == id));
                *self = DragPhase::Dropped { id: id.clone(), target: target.clone() };
                match target {
                    Some(target) => Release::Drop { id, target },
                    None => Release::Cancelled(id),
                }
            }
            other => {
                *self = other;
                Release::Ignored
            }
        }
    }

    /// Dropped -> Idle
    pub fn settle(&mut self) {
        if matches!(self, DragPhase::Dropped { .. }) {
            *self = DragPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed() -> DragPhase {
        DragPhase::press("t1", Point::new(50.0, 50.0), Rect::new(40.0, 30.0, 180.0, 60.0))
    }

    #[test]
    fn test_small_motion_stays_pending() {
        let mut phase = pressed();
        assert!(!phase.motion(Point::new(54.0, 46.0)));
        assert!(!phase.is_dragging());
        assert_eq!(phase.release(None), Release::Click("t1".into()));
        assert_eq!(phase, DragPhase::Idle);
    }

    #[test]
    fn test_threshold_starts_drag_and_ghost_follows() {
        let mut phase = pressed();
        assert!(phase.motion(Point::new(60.0, 50.0)));
        assert_eq!(phase.dragging_id(), Some("t1"));

        phase.motion(Point::new(110.0, 150.0));
        let ghost = phase.ghost_rect().unwrap();
        // Grab offset (10, 20) is preserved
        assert_eq!((ghost.left, ghost.top), (100.0, 130.0));
        assert_eq!((ghost.width, ghost.height), (180.0, 60.0));
    }

    #[test]
    fn test_valid_drop_then_settle() {
        let mut phase = pressed();
        phase.motion(Point::new(80.0, 80.0));
        let release = phase.release(Some(DropTarget::Lane("b".into())));
        assert_eq!(release, Release::Drop { id: "t1".into(), target: DropTarget::Lane("b".into()) });
        assert!(matches!(phase, DragPhase::Dropped { .. }));
        phase.settle();
        assert_eq!(phase, DragPhase::Idle);
    }

    #[test]
    fn test_drop_on_self_is_cancelled() {
        let mut phase = pressed();
        phase.motion(Point::new(80.0, 80.0));
        let release = phase.release(Some(DropTarget::Card("t1".into())));
        assert_eq!(release, Release::Cancelled("t1".into()));
    }

    #[test]
    fn test_release_when_idle_is_ignored() {
        let mut phase = DragPhase::Idle;
        assert_eq!(phase.release(None), Release::Ignored);
        assert_eq!(phase, DragPhase::Idle);
    }
}
