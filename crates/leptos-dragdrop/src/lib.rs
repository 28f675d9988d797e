//! Leptos DragDrop Utilities
//!
//! Pointer-driven drag-and-drop for Kanban boards using mouse events.
//! Uses a movement threshold to distinguish click from drag, measures
//! droppables from the DOM once per drag and resolves the target with
//! two-tier collision detection.
//!
//! Markup contract:
//! - draggable cards get `on:mousedown=make_on_mousedown(dnd, id)`
//! - droppables carry `data-droppable="card|lane"` and `data-droppable-id`
//! - the board container carries `data-dnd-bounds`

mod collision;
mod geometry;
mod phase;

pub use collision::{
    closest_center, detect_collision, pointer_within, CollisionInput, DropTarget, Droppable,
};
pub use geometry::{Point, Rect};
pub use phase::{DragPhase, Release, DRAG_THRESHOLD_PX};

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// How long the post-drop click suppression lasts
const JUST_ENDED_MS: i32 = 100;

/// Droppable rects measured when a drag starts
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub droppables: Vec<Droppable>,
    pub bounds: Option<Rect>,
}

impl Layout {
    /// Target for the current pointer, `None` when no card is being dragged
    pub fn target_for(&self, phase: &DragPhase, pointer: Point) -> Option<Option<DropTarget>> {
        let input = CollisionInput {
            pointer,
            ghost: phase.ghost_rect()?,
            bounds: self.bounds,
            dragging_id: phase.dragging_id()?,
        };
        Some(detect_collision(input, &self.droppables))
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub phase: RwSignal<DragPhase>,
    /// Target under the pointer while dragging
    pub drop_target: RwSignal<Option<DropTarget>>,
    /// True for a moment after a drop so the trailing click can be ignored
    pub drag_just_ended: RwSignal<bool>,
    /// Layout of the current drag, `None` between drags
    pub layout: StoredValue<Option<Layout>>,
}

impl DndSignals {
    /// Id of the card being dragged (tracked)
    pub fn dragging_id(&self) -> Option<String> {
        self.phase.with(|p| p.dragging_id().map(str::to_string))
    }

    pub fn is_dragging(&self) -> bool {
        self.phase.with(DragPhase::is_dragging)
    }

    fn is_dragging_untracked(&self) -> bool {
        self.phase.with_untracked(DragPhase::is_dragging)
    }

    /// Ghost rectangle (tracked)
    pub fn ghost_rect(&self) -> Option<Rect> {
        self.phase.with(DragPhase::ghost_rect)
    }

    pub fn is_target(&self, target: &DropTarget) -> bool {
        self.drop_target.with(|t| t.as_ref() == Some(target))
    }
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        phase: RwSignal::new(DragPhase::Idle),
        drop_target: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        layout: StoredValue::new(None),
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.phase.update(DragPhase::settle);
    dnd.drop_target.set(None);
    dnd.layout.set_value(None);
    dnd.drag_just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            JUST_ENDED_MS,
        );
        cb.forget();
    }
}

fn pointer_of(ev: &web_sys::MouseEvent) -> Point {
    Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

fn is_form_control(target: &web_sys::EventTarget) -> bool {
    target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
}

/// Create mousedown handler for draggable cards.
/// Records a pending drag with the press point and the card's rect.
pub fn make_on_mousedown(
    dnd: DndSignals,
    card_id: String,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if ev.target().map(|t| is_form_control(&t)).unwrap_or(false) {
            return;
        }
        let source = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .map(|el| Rect::from(el.get_bounding_client_rect()))
            .unwrap_or_default();
        dnd.phase.set(DragPhase::press(card_id.clone(), pointer_of(&ev), source));
    }
}

/// Measure every `[data-droppable]` element currently in the document
pub fn measure_droppables() -> Vec<Droppable> {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = doc.query_selector_all("[data-droppable]") else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
            continue;
        };
        let (Some(kind), Some(id)) = (el.get_attribute("data-droppable"), el.get_attribute("data-droppable-id")) else {
            continue;
        };
        let target = match kind.as_str() {
            "card" => DropTarget::Card(id),
            "lane" => DropTarget::Lane(id),
            _ => continue,
        };
        out.push(Droppable::new(target, Rect::from(el.get_bounding_client_rect())));
    }
    out
}

/// Measure the droppables and the board bounds
pub fn measure_layout() -> Layout {
    Layout {
        droppables: measure_droppables(),
        bounds: measure_bounds(),
    }
}

fn measure_bounds() -> Option<Rect> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector("[data-dnd-bounds]").ok().flatten())
        .map(|el| Rect::from(el.get_bounding_client_rect()))
}

fn on_global_mousemove(dnd: DndSignals, ev: web_sys::MouseEvent) {
    let pointer = pointer_of(&ev);
    let idle = dnd.phase.with_untracked(|p| matches!(p, DragPhase::Idle | DragPhase::Dropped { .. }));
    if idle {
        return;
    }

    let mut started = false;
    dnd.phase.update(|p| started = p.motion(pointer));
    if started {
        log::debug!("[DND] drag started: {:?}", dnd.phase.with_untracked(|p| p.dragging_id().map(str::to_string)));
    }
    if !dnd.is_dragging_untracked() {
        return;
    }
    if started || dnd.layout.with_value(Option::is_none) {
        dnd.layout.set_value(Some(measure_layout()));
    }

    let resolved = dnd
        .phase
        .with_untracked(|p| dnd.layout.with_value(|layout| layout.as_ref()?.target_for(p, pointer)));

    if let Some(target) = resolved {
        if dnd.drop_target.with_untracked(|t| *t != target) {
            dnd.drop_target.set(target);
        }
    }
}

/// Bind document-level mousemove/mouseup handlers for the lifetime of the
/// calling component. `on_drop` receives the dragged card id and the target.
pub fn bind_global_handlers<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(String, DropTarget) + 'static,
{
    let move_handle = window_event_listener(ev::mousemove, move |ev| on_global_mousemove(dnd, ev));

    let up_handle = window_event_listener(ev::mouseup, move |_ev| {
        let target = dnd.drop_target.get_untracked();
        let mut release = Release::Ignored;
        dnd.phase.update(|p| release = p.release(target));

        match release {
            Release::Drop { id, target } => {
                end_drag(&dnd);
                on_drop(id, target);
            }
            Release::Cancelled(id) => {
                log::debug!("[DND] drop of {} outside any target", id);
                end_drag(&dnd);
            }
            // Click event will fire naturally on the element
            Release::Click(_) | Release::Ignored => {}
        }
    });

    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
    });
}
