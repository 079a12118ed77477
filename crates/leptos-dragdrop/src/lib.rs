//! Leptos DragDrop Utilities
//!
//! Mouse-driven drag-and-drop for a flat Leptos list.
//! Rows start a pending drag on mousedown; the drag begins once the pointer
//! moves past a small threshold, so plain clicks still reach the row.
//! Drops land on slots between rows: slot `k` means "before row `k`",
//! slot `len` means "after the last row".

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Identifier of a draggable row
pub type ItemId = i64;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set, so the trailing click can be ignored
const DRAG_END_GRACE: Duration = Duration::from_millis(100);

/// Mousedown recorded but pointer not moved far enough yet
#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingDrag {
    id: ItemId,
    start_x: i32,
    start_y: i32,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Row currently being dragged
    pub dragging_id: RwSignal<Option<ItemId>>,
    /// Slot the pointer is hovering
    pub drop_slot: RwSignal<Option<usize>>,
    /// Set briefly after a drop
    pub drag_just_ended: RwSignal<bool>,
    pending: RwSignal<Option<PendingDrag>>,
}

impl DndSignals {
    pub fn is_dragging(&self) -> bool {
        self.dragging_id.get().is_some()
    }

    pub fn is_dragging_item(&self, id: ItemId) -> bool {
        self.dragging_id.get() == Some(id)
    }

    pub fn is_active_slot(&self, slot: usize) -> bool {
        self.drop_slot.get() == Some(slot)
    }
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        dragging_id: RwSignal::new(None),
        drop_slot: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        pending: RwSignal::new(None),
    }
}

/// True once the pointer moved far enough from where the press started
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id.set(None);
    dnd.drop_slot.set(None);
    dnd.pending.set(None);
    dnd.drag_just_ended.set(true);

    let clear = dnd.drag_just_ended;
    set_timeout(move || clear.set(false), DRAG_END_GRACE);
}

/// Create mousedown handler for a draggable row.
/// Presses on inputs and buttons never start a drag.
pub fn make_on_mousedown(dnd: DndSignals, id: ItemId) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending.set(Some(PendingDrag {
            id,
            start_x: ev.client_x(),
            start_y: ev.client_y(),
        }));
    }
}

/// Create mouseenter handler for a drop slot
pub fn make_on_slot_mouseenter(dnd: DndSignals, slot: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.drop_slot.set(Some(slot));
        }
    }
}

/// Create mouseleave handler for a drop slot
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.drop_slot.set(None);
        }
    }
}

/// Bind window-level mousemove/mouseup handlers for the owning component.
///
/// `on_drop(dragged_id, slot)` runs only when a real drag ends over a slot.
/// Listeners are removed when the owner is cleaned up.
pub fn bind_global_handlers<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(ItemId, usize) + 'static,
{
    let move_handle = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending.get_untracked() else { return };
        if dnd.dragging_id.get_untracked().is_some() {
            return;
        }
        if exceeds_threshold((pending.start_x, pending.start_y), (ev.client_x(), ev.client_y())) {
            dnd.dragging_id.set(Some(pending.id));
        }
    });

    let up_handle = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_id.get_untracked();
        let slot = dnd.drop_slot.get_untracked();
        dnd.pending.set(None);

        match (dragging, slot) {
            (Some(dragged), Some(slot)) => {
                end_drag(&dnd);
                on_drop(dragged, slot);
            }
            (Some(_), None) => end_drag(&dnd),
            // Plain click: let the click event fire normally
            (None, _) => {}
        }
    });

    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
    });
}
