//! Configuration loaded from `.cachette.toml`.

pub mod settings;

pub use settings::Settings;
