//! To-Do Frontend App
//!
//! Authentication gate in front of the task page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use rolling_logger::LogBuffer;

use crate::components::{AppHeader, LogPanel, LoginPage, NewTaskForm, SignupPage, TaskList};
use crate::config::AppConfig;
use crate::context::{use_app_context, AppContext};
use crate::models::CurrentUser;
use crate::session::{AuthScreen, SessionState};
use crate::store::{BoardState, BoardStateStoreFields};

#[component]
pub fn App(config: AppConfig, logs: Option<LogBuffer>) -> impl IntoView {
    let show_log_panel = config.show_log_panel;
    let board = Store::new(BoardState::default());
    let ctx = AppContext::new(config, board);

    // Provide context to all children
    provide_context(ctx);
    ctx.restore_session();

    let screen = RwSignal::new(AuthScreen::Login);

    view! {
        <div class="app-layout">
            {move || match ctx.session.get() {
                SessionState::Checking => view! {
                    <p class="loading">"Loading..."</p>
                }.into_any(),
                SessionState::SignedOut => match screen.get() {
                    AuthScreen::Login => view! { <LoginPage screen=screen /> }.into_any(),
                    AuthScreen::Signup => view! { <SignupPage screen=screen /> }.into_any(),
                },
                SessionState::SignedIn(user) => view! { <TaskPage user=user /> }.into_any(),
            }}

            {logs.filter(|_| show_log_panel).map(|buffer| view! { <LogPanel buffer=buffer /> })}
        </div>
    }
}

#[component]
fn TaskPage(user: CurrentUser) -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;

    // Load tasks on mount and whenever a reload is triggered
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            ctx.load_tasks().await;
        });
    });

    // The list below is only rebuilt when this pair actually changes
    let status = Memo::new(move |_| (board.loading().get(), board.load_error().get()));

    view! {
        <AppHeader user=user />

        <main class="main-content">
            <h1>"Your Tasks"</h1>

            <NewTaskForm />

            {move || {
                let (loading, load_error) = status.get();
                if loading {
                    view! { <p class="loading">"Loading tasks..."</p> }.into_any()
                } else if let Some(message) = load_error {
                    view! {
                        <div class="load-error" role="alert">
                            <p>"Error loading tasks: " {message}</p>
                            <button on:click=move |_| ctx.refresh()>"Retry"</button>
                        </div>
                    }.into_any()
                } else {
                    view! { <TaskList /> }.into_any()
                }
            }}
        </main>
    }
}
