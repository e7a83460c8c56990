mod event;
mod title;
pub mod ui;

pub use event::{spawn_auto_refresh, Event, EventHandler};
pub use title::{dashboard_title, TerminalTitleManager};
