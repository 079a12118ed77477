//! Login Page Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::forms::LoginInput;
use crate::session::{self, AuthScreen};

#[component]
pub fn LoginPage(screen: RwSignal<AuthScreen>) -> impl IntoView {
    let ctx = use_app_context();

    let input = RwSignal::new(LoginInput::default());
    let (show_password, set_show_password) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = input.get_untracked();
        let client = ctx.client();
        set_submitting.set(true);
        spawn_local(async move {
            let result = session::sign_in(&client, &form).await;
            set_submitting.set(false);
            match result {
                Ok(user) => {
                    set_error.set(None);
                    ctx.signed_in(user);
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Log In"</h1>
                {move || error.get().map(|message| view! {
                    <div class="alert error" role="alert">{message}</div>
                })}
                <label>
                    "Email"
                    <input
                        type="email"
                        name="email"
                        autocomplete="email"
                        prop:value=move || input.with(|i| i.email.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            input.update(|i| i.email = value);
                        }
                    />
                </label>
                <label>
                    "Password"
                    <span class="password-field">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            name="password"
                            autocomplete="current-password"
                            prop:value=move || input.with(|i| i.password.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                input.update(|i| i.password = value);
                            }
                        />
                        <button
                            type="button"
                            class="visibility-btn"
                            on:click=move |_| set_show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Hide" } else { "Show" }}
                        </button>
                    </span>
                </label>
                <button type="submit" disabled=submitting>
                    {move || if submitting.get() { "Logging in..." } else { "Log In" }}
                </button>
                <p class="auth-switch">
                    "Don't have an account? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        screen.set(AuthScreen::Signup);
                    }>"Sign up"</a>
                </p>
            </form>
        </div>
    }
}
