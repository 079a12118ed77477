//! To-Do Frontend Entry Point

mod app;
mod cache;
mod commands;
mod components;
mod config;
mod context;
mod editing;
mod error;
mod filter;
mod forms;
mod models;
mod reorder;
mod session;
mod store;
mod task_store;

#[cfg(test)]
mod test_support;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use rolling_logger::LoggerConfig;
use tracing::{info, warn, Level};
use wasm_bindgen::JsValue;

/// Forward log lines to the browser console
fn console_sink(level: Level, line: &str) {
    let value = JsValue::from_str(line);
    if level == Level::ERROR {
        web_sys::console::error_1(&value);
    } else if level == Level::WARN {
        web_sys::console::warn_1(&value);
    } else if level == Level::INFO {
        web_sys::console::info_1(&value);
    } else {
        web_sys::console::debug_1(&value);
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = AppConfig::load();
    let logs = match rolling_logger::init(LoggerConfig {
        level: config.level(),
        capacity: config.log_capacity,
        sink: Some(console_sink),
    }) {
        Ok(buffer) => Some(buffer),
        Err(err) => {
            web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
            None
        }
    };

    if let Some(err) = config_error {
        warn!(%err, "using default configuration");
    }
    info!(api_base = %config.api_base, "starting");

    mount_to_body(move || view! { <App config=config logs=logs /> });
}
