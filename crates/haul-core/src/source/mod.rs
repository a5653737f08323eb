//! Source resolution: turning a declared package into a concrete,
//! fully versioned fetch target.

mod resolver;
mod spec;

pub use resolver::{resolve, safe_name};
pub use spec::ResolvedSpec;
