pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub use pipeline::Pipeline;
#[cfg(test)]
mod test_suite;
pub mod transform;
mod validation;
