//! Terminal User Interface for post review.
//!
//! Shows every platform's post from one generation run and lets a reviewer
//! edit, regenerate, approve, or reject each one. Built with ratatui for
//! terminal rendering; all decisions go through
//! [`ReviewSession`](postwright_generation::ReviewSession).

mod app;
mod events;
mod runner;
mod ui;

pub use app::{App, AppMode, EditBuffer, EditField};
pub use events::{Event, EventHandler};
pub use runner::{handle_key, run_review_tui};
