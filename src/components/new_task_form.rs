//! New Task Form Component
//!
//! Title and date inputs for appending a task to the list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::forms::{today, NewTaskInput};
use crate::store::BoardStateStoreFields;
use crate::task_store::next_priority;

#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;

    let input = RwSignal::new(NewTaskInput::new(today()));
    let (error, set_error) = signal::<Option<String>>(None);

    let can_submit = move || input.with(|i| i.can_submit(board.pending().get()));

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !can_submit() {
            return;
        }
        let priority = next_priority(&board.tasks().get_untracked());
        let new_task = match input.with_untracked(|i| i.to_new_task(priority)) {
            Ok(task) => task,
            Err(err) => {
                set_error.set(Some(format!("Error adding task: {}", err)));
                return;
            }
        };

        let tasks = ctx.tasks();
        spawn_local(async move {
            ctx.begin_mutation();
            let result = tasks.create(new_task).await;
            ctx.sync_busy();
            match result {
                Ok(_) => {
                    set_error.set(None);
                    input.update(NewTaskInput::reset_title);
                    ctx.reload();
                }
                Err(err) if err.is_unauthorized() => ctx.session_expired(),
                Err(err) => set_error.set(Some(format!("Error adding task: {}", err.user_message()))),
            }
        });
    };

    view! {
        <form class="new-task-form" on:submit=create_task>
            <div class="new-task-row">
                <input
                    type="text"
                    name="title"
                    placeholder="Task title"
                    prop:value=move || input.with(|i| i.title.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        input.update(|i| i.title = value);
                    }
                />
                <input
                    type="date"
                    name="date"
                    prop:value=move || input.with(|i| i.date.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        input.update(|i| i.date = value);
                    }
                />
                <button type="submit" disabled=move || !can_submit()>
                    {move || if board.pending().get() { "Adding..." } else { "Add Task" }}
                </button>
            </div>
            {move || error.get().map(|message| view! {
                <p class="form-error" role="alert">{message}</p>
            })}
        </form>
    }
}
