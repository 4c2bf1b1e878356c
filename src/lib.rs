pub mod app;
pub mod auth;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod pages;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;
