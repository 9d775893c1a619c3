pub mod canvas;
pub mod config;
pub mod error;
pub mod generate;
pub mod glyph;
pub mod icon;
pub mod logger;
pub mod manifest;
pub mod models;

pub use error::IconError;
pub use generate::{generate_icons, ICON_SIZES};
pub use icon::{render, render_icon, render_with};
pub use models::Config;
