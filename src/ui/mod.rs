//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw` - Main draw functions and dialogs
//! - `theme.rs` - Light and dark palettes
//! - `layout.rs` - Month grid geometry
//! - `day_card.rs` - Day cell widget
//! - `clock_view.rs` - Digital and analog clock widgets
//! - `backdrop.rs` - Animated full-screen backgrounds

pub mod backdrop;
pub mod clock_view;
pub mod day_card;
mod draw;
pub mod layout;
pub mod theme;

// Re-export main draw function
pub use draw::draw;
