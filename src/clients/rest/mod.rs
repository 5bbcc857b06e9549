//! REST entry point for the GitHub API.
//!
//! - [`RestClient`]: Fetches typed resources and collections through a [`Transport`](crate::clients::Transport)
//! - [`RestError`]: Error type for raw fetches
//!
//! # Path Normalization
//!
//! Relative paths have leading slashes stripped: `/users/octocat` becomes
//! `users/octocat`. A path that is empty afterwards is rejected with
//! [`RestError::InvalidPath`]. Absolute URLs are passed through unchanged.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
