//! Interactive selection stages.
//!
//! - [`dates`] - pick one or more inclusive date ranges
//! - [`users`] - pick the users to keep (or all of them)
//!
//! Each stage splits into a pure answer parser (`parse_*_choice`) and a
//! dialogue (`select_*`) that renders prompts through a
//! [`Console`](crate::console::Console).

pub mod dates;
pub mod users;

pub use dates::{DateMenu, select_date_ranges};
pub use users::{distinct_users, select_users};
