pub mod seed;

pub use seed::{SeedResource, with_global_rng};
