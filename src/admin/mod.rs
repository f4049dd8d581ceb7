//! Admin Enhancers
//!
//! Back-office augmentation: the dashboard enhancer, the theme enhancer and
//! the shared keyboard shortcut table.

pub mod dashboard;
pub mod filters;
pub mod shortcuts;
pub mod theme;

use crate::config::PageConfig;
use crate::events::EventRegistry;

/// Admin pages live under the configured admin home
pub fn is_admin_path(path: &str, admin_home: &str) -> bool {
    !admin_home.is_empty() && path.starts_with(admin_home)
}

pub fn install(registry: &mut EventRegistry, config: &PageConfig) {
    dashboard::install(registry, &config.timings);
    theme::install(registry, &config.timings);
    shortcuts::install(config.admin_home.clone());
}
