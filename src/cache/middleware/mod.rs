mod configuration;
mod headers;
mod hooks;
mod request;
mod responses;

#[allow(unused_imports)]
pub use {configuration::*, headers::*, hooks::*, request::*, responses::*};
