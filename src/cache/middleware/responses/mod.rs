mod cached;
mod upstream;

#[allow(unused_imports)]
pub use {cached::*, upstream::*};
