// https://stackoverflow.com/a/61417700
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod configuration;
mod layer;
mod logging;
mod service;

/// Cache.
pub mod cache;

/// Demo app.
pub mod app;

pub use {configuration::*, layer::*, logging::*, service::*};
