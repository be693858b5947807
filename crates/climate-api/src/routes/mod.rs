pub mod home;
pub mod measurements;

pub use home::*;
pub use measurements::*;
