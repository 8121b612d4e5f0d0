#![forbid(unsafe_code)]

pub mod catalogue;
pub mod error;
pub mod model;
pub mod quiz;

pub use catalogue::{Catalogue, CategoryFilter};
pub use error::Error;
