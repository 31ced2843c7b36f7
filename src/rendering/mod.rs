pub mod picking;
pub mod sphere;

pub use picking::PickingPass;
pub use sphere::SphereRenderer;
