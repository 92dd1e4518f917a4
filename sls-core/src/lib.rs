pub mod camera;
pub mod error;
pub mod projector;

pub use camera::{
    Camera, CameraModel, CameraPose, DecodedCamera, DistortionModel, PinholeCamera, Ray,
};
pub use error::{CameraError, DistortionError, ReconstructionError, Result, SlsError};
pub use projector::Projector;
