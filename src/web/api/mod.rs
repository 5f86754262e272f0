pub mod error;
pub mod hours;
pub mod iss;
