//! Header Component
//!
//! App title plus the avatar menu with the signed-in user's name and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::CurrentUser;
use crate::session;

#[component]
pub fn AppHeader(user: CurrentUser) -> impl IntoView {
    let ctx = use_app_context();
    let (menu_open, set_menu_open) = signal(false);
    let (logging_out, set_logging_out) = signal(false);

    let initial = user.initial().to_string();
    let welcome = format!("Welcome, {}", user.display_name());

    let logout = move |_| {
        set_menu_open.set(false);
        set_logging_out.set(true);
        let client = ctx.client();
        let tasks = ctx.tasks();
        spawn_local(async move {
            session::sign_out(&client, &*tasks).await;
            set_logging_out.set(false);
            ctx.signed_out();
        });
    };

    view! {
        <header class="app-header">
            <span class="app-title">"To-Do App"</span>
            <div class="user-menu">
                <button
                    class="avatar"
                    title="Account"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {initial}
                </button>
                <Show when=move || menu_open.get()>
                    <div class="menu-dropdown">
                        <p class="menu-welcome">{welcome.clone()}</p>
                        <button class="menu-item" disabled=logging_out on:click=logout>
                            "Logout"
                        </button>
                    </div>
                </Show>
            </div>
        </header>
    }
}
