pub mod adapter;
pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod format;
pub mod forms;
pub mod keypad;
pub mod layout;
pub mod presenter;
pub mod session;
pub mod tabs;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use adapter::{MathEngine, SymbolicAdapter};
pub use app::{App, Event};
pub use config::Settings;
pub use dom::{Dom, Element, MemoryDom};
pub use error::{AppError, AppResult, FormatError};
pub use tabs::Panel;

use engine::Engine;
use log::{error, info};

/// Initialize env_logger once (`RUST_LOG`, default `warn`)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logger() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("warn");
        let _ = env_logger::Builder::from_env(env).try_init();
    });
}

/// Engine availability check run at startup: `det([[1]])` must be `1`
pub fn check_engine(engine: &Engine) -> bool {
    info!("matrix evaluation: {}", engine.settings().matrix_eval);
    let ok = engine.self_test();
    if !ok {
        error!("symbolic engine failed its self-test; complex math will fail");
    }
    ok
}

#[cfg(test)]
mod tests;
