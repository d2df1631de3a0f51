pub mod global;
pub mod resource;

pub use global::with_global_rng;
pub use resource::SeedResource;
