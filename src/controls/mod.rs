//! Camera interaction.

pub mod orbit;

pub use orbit::OrbitRig;
