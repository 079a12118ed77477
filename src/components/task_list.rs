//! Task List Component
//!
//! Displays the filtered, priority-sorted tasks with drag-and-drop
//! reordering. Uses leptos-dragdrop with explicit drop slots between rows.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

use leptos_dragdrop::*;

use crate::components::{DeleteConfirmDialog, FilterBar, TaskRow};
use crate::context::use_app_context;
use crate::filter::sort_by_priority;
use crate::reorder::{ReorderCoordinator, ReorderOutcome};
use crate::store::BoardStateStoreFields;

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;

    let dnd = create_dnd_signals();

    bind_global_handlers(dnd, move |dragged_id, slot| {
        let all = board.tasks().get_untracked();
        let sorted = sort_by_priority(&all);
        let visible = board.filters().get_untracked().apply(&all);
        debug!(dragged_id, slot, "drop");

        let tasks = ctx.tasks();
        spawn_local(async move {
            board.reordering().set(true);
            let result = ReorderCoordinator::new(&*tasks)
                .drop_on_slot(&sorted, &visible, dragged_id, slot)
                .await;
            match result {
                // Nothing moved: the alert and the cached list stay as they are
                Ok(ReorderOutcome::Unchanged) => ctx.sync_busy(),
                result => {
                    ctx.finish_action("reorder tasks", result);
                }
            }
        });
    });

    let visible = Memo::new(move |_| {
        let filters = board.filters().get();
        board.tasks().with(|tasks| filters.apply(tasks))
    });
    let is_empty = move || board.tasks().with(Vec::is_empty);

    view! {
        <Show
            when=move || !is_empty()
            fallback=|| view! { <p class="empty-state">"No tasks yet. Add your first task!"</p> }
        >
            <FilterBar />

            {move || board.action_error().get().map(|message| view! {
                <div class="action-error" role="alert">
                    <span>{message}</span>
                    <button class="dismiss-btn" on:click=move |_| ctx.dismiss_error()>"×"</button>
                </div>
            })}

            <Show
                when=move || visible.with(|v| !v.is_empty())
                fallback=|| view! { <p class="no-match">"No tasks match the selected filters."</p> }
            >
                <ul class=move || if board.reordering().get() { "task-list reordering" } else { "task-list" }>
                    <For
                        each=move || visible.get().into_iter().enumerate()
                        key=|(index, task)| {
                            (
                                *index,
                                task.id,
                                task.title.clone(),
                                task.completed,
                                task.priority,
                                task.date,
                            )
                        }
                        children=move |(index, task)| {
                            let id = task.id;

                            let on_mousedown = make_on_mousedown(dnd, id);
                            let row_class = move || {
                                if dnd.is_dragging_item(id) { "task-row-wrapper dragging" } else { "task-row-wrapper" }
                            };

                            view! {
                                <DropSlot dnd=dnd position=index />
                                <li class=row_class on:mousedown=on_mousedown>
                                    <TaskRow task=task />
                                </li>
                            }
                        }
                    />
                    <DropSlot dnd=dnd position=Signal::derive(move || visible.with(Vec::len)) />
                </ul>
            </Show>

            <p class="task-count">
                {move || {
                    let shown = visible.with(Vec::len);
                    let total = board.tasks().with(Vec::len);
                    format!("Showing {} of {} tasks", shown, total)
                }}
            </p>
        </Show>

        <DeleteConfirmDialog />
    }
}

/// Drop slot - a horizontal separator for dropping rows
#[component]
fn DropSlot(dnd: DndSignals, #[prop(into)] position: Signal<usize>) -> impl IntoView {
    let on_mouseenter = move |ev: web_sys::MouseEvent| {
        make_on_slot_mouseenter(dnd, position.get_untracked())(ev);
    };
    let on_mouseleave = make_on_mouseleave(dnd);

    let slot_class = move || {
        let mut c = String::from("drop-slot");
        if !dnd.is_dragging() { c.push_str(" hidden"); }
        if dnd.is_active_slot(position.get()) { c.push_str(" active"); }
        c
    };

    view! {
        <li class=slot_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave />
    }
}
