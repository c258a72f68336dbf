mod cache;
mod configuration;
mod entry;
mod error;
mod hooks;
mod key;
mod life;
mod memo;
mod response;
mod revalidation;
mod tags;
mod weight;

/// Cache implementations.
pub mod implementation;

/// Cache middleware utilities.
pub mod middleware;

#[allow(unused_imports)]
pub use {
    cache::*, configuration::*, entry::*, error::*, hooks::*, key::*, life::*, memo::*, response::*,
    revalidation::*, tags::*, weight::*,
};
