//! Delete Confirm Dialog Component
//!
//! Modal confirmation for the task pending delete, if any.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{store_is_busy, store_update_editing, BoardStateStoreFields};

/// Shown while the editing session is in its deleting state.
///
/// Cancel closes without a request. Confirm stays disabled while any write
/// is in flight; a failed delete leaves the dialog open.
#[component]
pub fn DeleteConfirmDialog() -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;

    let deleting = move || board.editing().with(|s| s.deleting_id());
    let pending = move || board.pending().get();
    let busy = move || store_is_busy(&board);

    let confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let busy = untrack(|| store_is_busy(&board));
        let request = board.editing().with_untracked(|s| s.delete_request(busy));
        let Some(id) = request else { return };

        let tasks = ctx.tasks();
        spawn_local(async move {
            ctx.begin_mutation();
            let result = tasks.delete(id).await;
            if ctx.finish_action("delete task", result) {
                store_update_editing(&board, |s| s.complete(id));
            }
        });
    };

    let cancel = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        store_update_editing(&board, |s| s.cancel());
    };

    view! {
        <Show when=move || deleting().is_some()>
            <div class="dialog-backdrop">
                <div class="dialog" role="dialog" aria-modal="true">
                    <h2 class="dialog-title">"Confirm Delete"</h2>
                    <p>"Are you sure you want to delete this task?"</p>
                    <div class="dialog-actions">
                        <button class="cancel-btn" on:click=cancel>"Cancel"</button>
                        <button class="confirm-btn danger" disabled=busy on:click=confirm>
                            {move || if pending() { "Deleting..." } else { "Delete" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
