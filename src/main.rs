//! Freelance Board Frontend Entry Point

mod actions;
mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod error;
mod markdown;
mod models;
mod session;
mod store;
mod sync;
mod toast;
mod validation;

use std::sync::Arc;

use app::App;
use leptos::prelude::*;

use api::ApiClient;
use config::AppConfig;
use session::{LocalTokenStore, MemoryTokenStore, TokenStore};

fn token_store(config: &AppConfig) -> Arc<dyn TokenStore> {
    if LocalTokenStore::is_available() {
        Arc::new(LocalTokenStore::new(config.token_storage_key.clone()))
    } else {
        log::warn!("[APP] local storage unavailable, session will not survive a reload");
        Arc::new(MemoryTokenStore::default())
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default().resolved(), Some(e)),
    };
    if rolling_logger::init_logger(config.log_level, rolling_logger::DEFAULT_CAPACITY).is_err() {
        log::warn!("[APP] logger already installed");
    }
    if let Some(e) = config_error {
        log::error!("[APP] {}; using defaults", e);
    }
    log::info!("[APP] starting, api at {}", config.api_base_url);

    let api = ApiClient::new(config.api_base_url.clone(), token_store(&config));
    mount_to_body(move || view! { <App config=config.clone() api=api.clone() /> });
}
