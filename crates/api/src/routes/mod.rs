pub mod climate;
pub mod error;
pub mod home;

pub use climate::*;
pub use error::ErrorBody;
pub use home::*;
