//! Log Panel Component
//!
//! Recent lines from the rolling logger, rendered under the app when
//! `show_log_panel` is configured.

use leptos::prelude::*;
use rolling_logger::LogBuffer;

#[component]
pub fn LogPanel(buffer: LogBuffer) -> impl IntoView {
    let (version, set_version) = signal(0u32);
    let (open, set_open) = signal(false);
    let buffer = StoredValue::new(buffer);

    let lines = move || {
        let _ = version.get();
        buffer.with_value(|b| b.recent())
    };

    view! {
        <section class="log-panel">
            <div class="log-panel-bar">
                <button on:click=move |_| set_open.update(|o| *o = !*o)>
                    {move || if open.get() { "Hide log" } else { "Show log" }}
                </button>
                <Show when=move || open.get()>
                    <button on:click=move |_| set_version.update(|v| *v += 1)>"Refresh"</button>
                    <button on:click=move |_| {
                        buffer.with_value(LogBuffer::clear);
                        set_version.update(|v| *v += 1);
                    }>"Clear"</button>
                </Show>
            </div>
            <Show when=move || open.get()>
                <pre class="log-lines">
                    {move || lines().into_iter().map(|line| format!("{}\n", line)).collect::<String>()}
                </pre>
            </Show>
        </section>
    }
}
