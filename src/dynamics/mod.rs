//! Simulation dynamics: force generators, integration and contact resolution.

pub mod forces;
pub mod integrator;
pub mod resolver;

pub use forces::{DragForce, ForceGenerator, ForceRegistry, GravityForce, SpringForce};
pub use integrator::Integrator;
pub use resolver::{ContactResolver, ResolverStats};
