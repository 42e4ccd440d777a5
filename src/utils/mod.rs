pub mod error;

pub use error::{CardError, ErrorClass};
