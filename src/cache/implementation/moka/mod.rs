mod builder;
mod cache;
mod expiry;
mod index;
mod weigher;

#[allow(unused_imports)]
pub use {builder::*, cache::*, expiry::*, index::*, weigher::*};
