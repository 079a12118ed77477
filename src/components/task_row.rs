//! Task Row Component
//!
//! A single task: completion checkbox, title (or inline editor), date and
//! the edit/delete affordances.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{Task, DATE_FORMAT};
use crate::store::{store_is_busy, store_toggle_locked, store_update_editing, BoardStateStoreFields};

#[component]
pub fn TaskRow(task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;

    let id = task.id;
    let completed = task.completed;
    let title = task.title.clone();
    let date = task.date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default();
    let task = StoredValue::new(task);

    let is_editing = move || board.editing().with(|s| s.is_editing(id));
    let pending = move || board.pending().get();
    // Any write in flight, reorder batches included
    let busy = move || store_is_busy(&board);

    let toggle = move |_| {
        let tasks = ctx.tasks();
        let current = task.get_value();
        spawn_local(async move {
            ctx.begin_mutation();
            let result = tasks.toggle(&current).await;
            ctx.finish_action("update task", result);
        });
    };

    let save = move || {
        let all = board.tasks().get_untracked();
        if board.editing().with_untracked(|s| s.is_stale(&all)) {
            store_update_editing(&board, |s| s.cancel());
            ctx.action_failed("Could not update task: it no longer exists".to_string());
            return;
        }
        let busy = untrack(|| store_is_busy(&board));
        let Some(updated) = board.editing().with_untracked(|s| s.save_request(&all, busy)) else {
            return;
        };

        let tasks = ctx.tasks();
        spawn_local(async move {
            ctx.begin_mutation();
            let result = tasks.update(updated).await;
            // A failed save keeps the editor open with the draft
            if ctx.finish_action("update task", result) {
                store_update_editing(&board, |s| s.complete(id));
            }
        });
    };

    let cancel = move || store_update_editing(&board, |s| s.cancel());

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            save();
        }
        "Escape" => cancel(),
        _ => {}
    };

    view! {
        <div class=if completed { "task-row completed" } else { "task-row" }>
            <span class="drag-handle" title="Drag to reorder">"⋮⋮"</span>

            <input
                type="checkbox"
                checked=completed
                disabled=move || store_toggle_locked(&board, id)
                on:change=toggle
            />

            <Show
                when=is_editing
                fallback=move || view! {
                    <span class="task-title">{title.clone()}</span>
                    <span class="task-date">{date.clone()}</span>
                    <button
                        class="edit-btn"
                        disabled=busy
                        on:click=move |_| store_update_editing(&board, |s| s.begin_edit(&task.get_value()))
                    >
                        "Edit"
                    </button>
                    <button
                        class="delete-btn"
                        disabled=busy
                        on:click=move |_| store_update_editing(&board, |s| s.begin_delete(id))
                    >
                        "Delete"
                    </button>
                }
            >
                <input
                    type="text"
                    class="task-edit-input"
                    name="Edit task"
                    aria-label="Edit task"
                    disabled=pending
                    prop:value=move || board.editing().with(|s| s.draft().unwrap_or_default().to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        store_update_editing(&board, |s| s.set_draft(&value));
                    }
                    on:keydown=on_keydown
                />
                <button
                    class="save-btn"
                    disabled=move || !board.editing().with(|s| s.can_save(busy()))
                    on:click=move |_| save()
                >
                    "Save"
                </button>
                <button class="cancel-btn" on:click=move |_| cancel()>"Cancel"</button>
            </Show>
        </div>
    }
}
