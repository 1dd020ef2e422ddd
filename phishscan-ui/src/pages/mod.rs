//! Pages
//!
//! Top-level page components for each route.

pub mod landing;
pub mod home;
pub mod scanner;
pub mod history;
pub mod settings;

pub use landing::Landing;
pub use home::Home;
pub use scanner::Scanner;
pub use history::History;
pub use settings::Settings;
