// ============================================================================
// Order Domain
// ============================================================================
//
// - Value objects (Order row, defaults)
// - Commands (typed create and partial-update bodies)
// - Coercion of loosely typed JSON scalars
// - Errors (client input failures)
//
// ============================================================================

pub mod value_objects;
pub mod coerce;
pub mod commands;
pub mod errors;

pub use value_objects::*;
pub use commands::*;
pub use errors::*;
