//! Client-side aggregation for the app screens
//!
//! Pure functions over fetched records, plus loaders on [`crate::ZenMotion`]
//! that fetch the logged-in user's records and aggregate them.

mod budget;
mod daily;
mod day;
mod goals;
mod loader;
mod report;
mod timer;
mod weekly;

pub use budget::*;
pub use daily::*;
pub use day::*;
pub use goals::*;
pub use loader::*;
pub use report::*;
pub use timer::*;
pub use weekly::*;
