//! UI Components
//!
//! Reusable Leptos components for the scanner app.

pub mod nav;
pub mod chart;
pub mod loading;
pub mod particles;
pub mod toast;
pub mod verdict;

pub use nav::{Nav, ThemeToggle};
pub use chart::{BarChart, DoughnutChart, LineChart};
pub use loading::{InlineLoading, LoadingScreen};
pub use particles::{ParticleBackground, ParticleScene};
pub use toast::Toast;
pub use verdict::VerdictPanel;
