//! Page components for the application.
//!
//! Page layout (hero, tour carousels, category grids) is presentational;
//! pages only need to leave room for the chat widget.

pub mod home;

pub use home::HomePage;
