//! Landing page chrome — navigation, hero quotes, theme toggle, feedback.

pub mod nav;
pub mod quotes;
pub mod routes;
pub mod theme;

pub use nav::{FeedbackReceipt, NavItem, nav_items, submit_feedback};
pub use quotes::{EDUCATIONAL_QUOTES, Quote, QuoteRotator};
pub use routes::{SiteRouteState, site_routes};
pub use theme::Theme;
