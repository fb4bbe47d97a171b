pub mod plane;
pub mod sphere;

pub use plane::{PlaneOptions, create_plane};
pub use sphere::{SphereOptions, create_sphere};
