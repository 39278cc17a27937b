//! The operator's home dashboard.
//!
//! This module contains:
//! - The `DutyStatus` flag and the endpoint that sets it
//! - The home page handler with the route panel, map preview and analytics cards

mod duty;
mod handlers;
mod view;

pub use duty::DutyStatus;
pub use handlers::{DutyForm, DutyState, HomeState, get_home_page, set_duty_status};
