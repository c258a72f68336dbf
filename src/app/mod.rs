mod data;
mod error;
mod pages;
mod routes;
mod state;

#[allow(unused_imports)]
pub use {data::*, error::*, pages::*, routes::*, state::*};
