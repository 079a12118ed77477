//! Signup Page Component
//!
//! On success shows a banner, then switches to the login screen after the
//! configured delay.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::forms::SignupInput;
use crate::session::{self, AuthScreen};

#[component]
fn PasswordInput(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    let (visible, set_visible) = signal(false);

    view! {
        <label>
            {label}
            <span class="password-field">
                <input
                    type=move || if visible.get() { "text" } else { "password" }
                    name=name
                    autocomplete="new-password"
                    prop:value=value
                    on:input=move |ev| on_input.run(event_target_value(&ev))
                />
                <button
                    type="button"
                    class="visibility-btn"
                    on:click=move |_| set_visible.update(|v| *v = !*v)
                >
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
            </span>
        </label>
    }
}

#[component]
pub fn SignupPage(screen: RwSignal<AuthScreen>) -> impl IntoView {
    let ctx = use_app_context();
    let redirect_ms = ctx.config().signup_redirect_ms;

    let input = RwSignal::new(SignupInput::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (success, set_success) = signal::<Option<&'static str>>(None);
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
            let result = session::sign_up(&client, &form).await;
            set_submitting.set(false);
            match result {
                Ok(banner) => {
                    set_error.set(None);
                    set_success.set(Some(banner));
                    TimeoutFuture::new(redirect_ms).await;
                    screen.set(AuthScreen::Login);
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    // One text input bound to one `SignupInput` field
    let text_field = move |label: &'static str,
                           name: &'static str,
                           kind: &'static str,
                           get: fn(&SignupInput) -> String,
                           set: fn(&mut SignupInput, String)| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    name=name
                    prop:value=move || input.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        input.update(|i| set(i, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Sign Up"</h1>
                {move || error.get().map(|message| view! {
                    <div class="alert error" role="alert">{message}</div>
                })}
                {move || success.get().map(|message| view! {
                    <div class="alert success" role="status">{message}</div>
                })}
                {text_field("First name", "firstName", "text", |i| i.first_name.clone(), |i, v| i.first_name = v)}
                {text_field("Last name", "lastName", "text", |i| i.last_name.clone(), |i, v| i.last_name = v)}
                {text_field("Email", "email", "email", |i| i.email.clone(), |i, v| i.email = v)}
                {text_field("Date of birth", "dateOfBirth", "date", |i| i.date_of_birth.clone(), |i, v| i.date_of_birth = v)}
                <PasswordInput
                    label="Password"
                    name="password"
                    value=Signal::derive(move || input.with(|i| i.password.clone()))
                    on_input=Callback::new(move |value: String| input.update(|i| i.password = value))
                />
                <PasswordInput
                    label="Confirm password"
                    name="confirmPassword"
                    value=Signal::derive(move || input.with(|i| i.confirm_password.clone()))
                    on_input=Callback::new(move |value: String| input.update(|i| i.confirm_password = value))
                />
                <button type="submit" disabled=move || submitting.get() || success.get().is_some()>
                    {move || if submitting.get() { "Signing up..." } else { "Sign Up" }}
                </button>
                <p class="auth-switch">
                    "Already have an account? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        screen.set(AuthScreen::Login);
                    }>"Log in"</a>
                </p>
            </form>
        </div>
    }
}
