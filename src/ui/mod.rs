//! UI layer: theming, view models, display fitting, and rendering.

pub mod components;
pub mod display_fit;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Theme, ThemeColors};
pub use viewmodel::{FooterInfo, KeyStyle, KeyView, ReadoutView, UIViewModel};
