//! Leptos DragDrop Utilities
//!
//! Column-based drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//! A finished gesture is reported as a [`DragEnd`] with a source slot and
//! an optional destination slot.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// A position inside a column: column number and insertion index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DropSlot {
    pub column: usize,
    pub index: usize,
}

impl DropSlot {
    pub fn new(column: usize, index: usize) -> Self {
        Self { column, index }
    }
}

/// A card picked up by the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSource {
    pub item_id: u32,
    pub slot: DropSlot,
}

/// Result of a finished drag gesture
///
/// `destination` is `None` when the card was released outside every slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragEnd {
    pub item_id: u32,
    pub source: DropSlot,
    pub destination: Option<DropSlot>,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<DragSource>>,
    pub dragging_write: WriteSignal<Option<DragSource>>,
    pub drop_target_read: ReadSignal<Option<DropSlot>>,
    pub drop_target_write: WriteSignal<Option<DropSlot>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending card (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<DragSource>>,
    pub pending_write: WriteSignal<Option<DragSource>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// True once the pointer moved far enough from `start` to count as a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// Build the drag-end report for a released pointer.
///
/// Returns `None` when nothing was being dragged (a plain click).
pub fn finish_gesture(dragging: Option<DragSource>, target: Option<DropSlot>) -> Option<DragEnd> {
    dragging.map(|source| DragEnd {
        item_id: source.item_id,
        source: source.slot,
        destination: target,
    })
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<DragSource>);
    let (drop_target_read, drop_target_write) = signal(None::<DropSlot>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<DragSource>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_read,
        start_write,
    }
}

/// Whether the click that follows a mouseup must be swallowed.
///
/// Only a release that ends an actual drag does; a plain click passes.
pub fn suppresses_click(dragging: Option<DragSource>) -> bool {
    dragging.is_some()
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals, suppress_click: bool) {
    dnd.dragging_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_write.set(None);
    if !suppress_click {
        return;
    }
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            let _ = clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), 100);
    }
}

/// A listener attached outside the view tree
pub trait Detach {
    fn detach(&self);
}

/// Listeners detached when dropped, i.e. when the owning view is disposed
pub struct Attached<T: Detach>(Vec<T>);

impl<T: Detach> Attached<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, listener: T) {
        self.0.push(listener);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Detach> Default for Attached<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Detach> Drop for Attached<T> {
    fn drop(&mut self) {
        for listener in &self.0 {
            listener.detach();
        }
    }
}

type MouseClosure = wasm_bindgen::closure::Closure<dyn FnMut(web_sys::MouseEvent)>;

/// Mouse listener on `document`
struct DocumentListener {
    event: &'static str,
    closure: MouseClosure,
}

impl DocumentListener {
    fn attach(event: &'static str, closure: MouseClosure) -> Self {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            let _ = doc.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
        Self { event, closure }
    }
}

impl Detach for DocumentListener {
    fn detach(&self) {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            let _ = doc.remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        }
    }
}

/// Create mousedown handler for draggable cards
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32, slot: DropSlot) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_write.set(Some(DragSource { item_id, slot }));
            dnd.start_write.set((ev.client_x(), ev.client_y()));
        }
    }
}

/// Document mousemove listener - starts drag if moved enough
fn global_mousemove(dnd: DndSignals) -> DocumentListener {
    let on_mousemove = MouseClosure::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_read.try_get_untracked() else { return };
        let Some(dragging) = dnd.dragging_read.try_get_untracked() else { return };

        if pending.is_some() && dragging.is_none() {
            let start = dnd.start_read.get_untracked();
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_write.set(pending);
            }
        }
    });
    DocumentListener::attach("mousemove", on_mousemove)
}

/// Create mouseenter handler for a slot (a gap between cards or a card itself)
pub fn make_on_slot_mouseenter(dnd: DndSignals, slot: DropSlot) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(slot));
        }
    }
}

/// Create mouseleave handler for a column: leaving it clears the target
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind document mouseup/mousemove handlers reporting finished gestures.
///
/// The listeners belong to the current reactive owner and are removed from
/// the document when it is disposed.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drag_end: F)
where
    F: Fn(DragEnd) + Clone + 'static,
{
    let on_mouseup = MouseClosure::new(move |_ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_read.try_get_untracked() else { return };
        let drop_target = dnd.drop_target_read.get_untracked();

        end_drag(&dnd, suppresses_click(dragging));

        // Click without movement never reports
        if let Some(report) = finish_gesture(dragging, drop_target) {
            on_drag_end(report);
        }
    });

    let mut listeners = Attached::new();
    listeners.push(DocumentListener::attach("mouseup", on_mouseup));
    listeners.push(global_mousemove(dnd));
    // Dropped with the owner's arena slot
    let _listeners = StoredValue::new_local(listeners);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn small_movement_stays_a_click() {
        assert!(!exceeds_threshold((10, 10), (13, 15)));
        assert!(!exceeds_threshold((10, 10), (10, 10)));
    }

    #[test]
    fn movement_past_threshold_starts_drag() {
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }

    #[test]
    fn release_without_drag_reports_nothing() {
        assert_eq!(finish_gesture(None, Some(DropSlot::new(1, 0))), None);
    }

    #[test]
    fn release_outside_slots_has_no_destination() {
        let source = DragSource { item_id: 7, slot: DropSlot::new(0, 2) };
        let report = finish_gesture(Some(source), None).unwrap();
        assert_eq!(report.item_id, 7);
        assert_eq!(report.source, DropSlot::new(0, 2));
        assert_eq!(report.destination, None);
    }

    #[test]
    fn plain_click_is_not_suppressed() {
        assert!(!suppresses_click(None));
        let source = DragSource { item_id: 1, slot: DropSlot::new(0, 0) };
        assert!(suppresses_click(Some(source)));
    }

    struct Counted(Rc<Cell<usize>>);

    impl Detach for Counted {
        fn detach(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn attached_listeners_detach_on_drop() {
        let detached = Rc::new(Cell::new(0));
        let mut listeners = Attached::new();
        listeners.push(Counted(detached.clone()));
        listeners.push(Counted(detached.clone()));
        assert_eq!(listeners.len(), 2);
        assert_eq!(detached.get(), 0);

        drop(listeners);
        assert_eq!(detached.get(), 2);
    }

    #[test]
    fn release_on_slot_carries_destination() {
        let source = DragSource { item_id: 3, slot: DropSlot::new(0, 0) };
        let report = finish_gesture(Some(source), Some(DropSlot::new(2, 1))).unwrap();
        assert_eq!(report.destination, Some(DropSlot::new(2, 1)));
    }
}
