//! Collision Detection
//!
//! Decides what a dragged card is over.
//! Two tiers: droppables containing the pointer first (ranked by mean
//! distance from the pointer to their corners), then the droppable whose
//! center is closest to the ghost's center.

use crate::geometry::{Point, Rect};

/// Drop target types
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Drop on a card (insert at its index)
    Card(String),
    /// Drop on a lane body (append)
    Lane(String),
}

impl DropTarget {
    pub fn id(&self) -> &str {
        match self {
            DropTarget::Card(id) | DropTarget::Lane(id) => id,
        }
    }
}

/// A measured drop target
#[derive(Clone, Debug, PartialEq)]
pub struct Droppable {
    pub target: DropTarget,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(target: DropTarget, rect: Rect) -> Self {
        Self { target, rect }
    }
}

/// Everything the detector needs for one pointer sample
#[derive(Clone, Copy, Debug)]
pub struct CollisionInput<'a> {
    pub pointer: Point,
    /// Rectangle of the drag ghost at its current position
    pub ghost: Rect,
    /// Board area; pointer outside it means no target
    pub bounds: Option<Rect>,
    /// Id of the card being dragged, never a candidate
    pub dragging_id: &'a str,
}

fn mean_corner_distance(rect: &Rect, pointer: Point) -> f64 {
    let corners = rect.corners();
    corners.iter().map(|c| c.distance_to(pointer)).sum::<f64>() / corners.len() as f64
}

fn is_candidate(d: &Droppable, dragging_id: &str) -> bool {
    !matches!(&d.target, DropTarget::Card(id) if id == dragging_id)
}

/// Droppables containing the pointer, best match first
pub fn pointer_within<'a>(
    pointer: Point,
    droppables: &'a [Droppable],
    dragging_id: &str,
) -> Vec<&'a Droppable> {
    let mut hits: Vec<(&Droppable, f64)> = droppables
        .iter()
        .filter(|d| is_candidate(d, dragging_id) && d.rect.contains(pointer))
        .map(|d| (d, mean_corner_distance(&d.rect, pointer)))
        .collect();
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits.into_iter().map(|(d, _)| d).collect()
}

/// Droppable whose center is nearest to the ghost's center
pub fn closest_center<'a>(
    ghost: Rect,
    droppables: &'a [Droppable],
    dragging_id: &str,
) -> Option<&'a Droppable> {
    let center = ghost.center();
    droppables
        .iter()
        .filter(|d| is_candidate(d, dragging_id))
        .map(|d| (d, d.rect.center().distance_to(center)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(d, _)| d)
}

/// Resolve the current drop target
pub fn detect_collision(input: CollisionInput<'_>, droppables: &[Droppable]) -> Option<DropTarget> {
    if let Some(bounds) = input.bounds {
        if !bounds.contains(input.pointer) {
            return None;
        }
    }

    if let Some(hit) = pointer_within(input.pointer, droppables, input.dragging_id).first() {
        return Some(hit.target.clone());
    }

    closest_center(input.ghost, droppables, input.dragging_id).map(|d| d.target.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(id: &str, left: f64) -> Droppable {
        Droppable::new(DropTarget::Lane(id.into()), Rect::new(left, 0.0, 200.0, 600.0))
    }

    fn card(id: &str, left: f64, top: f64) -> Droppable {
        Droppable::new(DropTarget::Card(id.into()), Rect::new(left + 10.0, top, 180.0, 60.0))
    }

    fn input(pointer: Point, dragging_id: &str) -> CollisionInput<'_> {
        CollisionInput {
            pointer,
            ghost: Rect::new(pointer.x - 90.0, pointer.y - 30.0, 180.0, 60.0),
            bounds: Some(Rect::new(0.0, 0.0, 1000.0, 800.0)),
            dragging_id,
        }
    }

    #[test]
    fn test_card_beats_its_lane() {
        let droppables = vec![lane("a", 0.0), card("t1", 0.0, 50.0), lane("b", 220.0)];
        let target = detect_collision(input(Point::new(100.0, 80.0), "x"), &droppables);
        assert_eq!(target, Some(DropTarget::Card("t1".into())));
    }

    #[test]
    fn test_empty_lane_under_pointer() {
        let droppables = vec![lane("a", 0.0), card("t1", 0.0, 50.0), lane("b", 220.0)];
        let target = detect_collision(input(Point::new(300.0, 300.0), "t1"), &droppables);
        assert_eq!(target, Some(DropTarget::Lane("b".into())));
    }

    #[test]
    fn test_dragged_card_is_skipped() {
        let droppables = vec![lane("a", 0.0), card("t1", 0.0, 50.0)];
        let target = detect_collision(input(Point::new(100.0, 80.0), "t1"), &droppables);
        assert_eq!(target, Some(DropTarget::Lane("a".into())));
    }

    #[test]
    fn test_falls_back_to_closest_center() {
        // Gap between lanes, nothing under the pointer
        let droppables = vec![lane("a", 0.0), lane("b", 260.0)];
        let target = detect_collision(input(Point::new(250.0, 300.0), "t1"), &droppables);
        assert_eq!(target, Some(DropTarget::Lane("b".into())));
    }

    #[test]
    fn test_outside_bounds_is_none() {
        let droppables = vec![lane("a", 0.0)];
        let target = detect_collision(input(Point::new(1200.0, 300.0), "t1"), &droppables);
        assert_eq!(target, None);
    }

    #[test]
    fn test_no_droppables_is_none() {
        assert_eq!(detect_collision(input(Point::new(10.0, 10.0), "t1"), &[]), None);
    }
}
