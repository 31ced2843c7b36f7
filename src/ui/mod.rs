pub mod camera;
pub mod hud;

pub use camera::CameraController;
pub use hud::Hud;
