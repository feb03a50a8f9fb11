#![allow(warnings)]
//! Task List Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod controller;
mod error;
mod models;
mod storage;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let loaded = AppConfig::from_page();
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    if console_logger::init(config.log_level()).is_err() {
        web_sys::console::warn_1(&"[APP] logger already installed".into());
    }
    if let Err(e) = &loaded {
        log::warn!("[APP] using default config: {}", e);
    }

    mount_to_body(move || view! { <App config=config /> });
}
