//! Enhancement backends.

pub mod dotenv;
mod hf;

pub use hf::HfEnhancer;
