pub mod cache;
pub mod config;
pub mod errors;
pub mod index;
pub mod query;
pub mod report;
mod runner;
pub mod scan;
pub mod seq;

use crate::errors::IndexError;

pub fn run() -> Result<(), IndexError> {
    runner::run()
}
