//! Feature slices for the admin screen.

pub mod admin;
pub mod relations;
