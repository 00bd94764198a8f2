pub mod calendar;
pub mod error;
pub mod id;
pub mod model;
pub mod serialize;
