pub mod camera_controller;
pub mod view_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use view_camera::Camera;
