mod cocktail;
mod examples;
mod home;
mod layout;

#[allow(unused_imports)]
pub use {cocktail::*, examples::*, home::*, layout::*};
