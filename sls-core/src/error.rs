use thiserror::Error;

/// Common errors across the structured-light reconstruction pipeline
#[derive(Error, Debug)]
pub enum SlsError {
    #[error("Reconstruction error: {0}")]
    Reconstruction(#[from] ReconstructionError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Distortion error: {0}")]
    Distortion(#[from] DistortionError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconstructionError {
    #[error("At least two cameras are required, {registered} registered")]
    NotEnoughCameras { registered: usize },

    #[error("At most {max} cameras can be registered")]
    TooManyCameras { max: usize },

    #[error(
        "Camera {camera} pixel {pixel} decoded to projector pixel {index}, outside 0..{count}"
    )]
    ProjectorPixelOutOfRange {
        camera: usize,
        pixel: usize,
        index: usize,
        count: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Correspondence map is {actual:?}, expected {expected:?} (height, width)")]
    CorrespondenceShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Color image is {actual:?}, expected {expected:?} (height, width, channels)")]
    ColorShape {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    #[error("Invalid intrinsics: {0}")]
    InvalidIntrinsics(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistortionError {
    #[error("Undistortion hit a singular Jacobian")]
    SingularJacobian,

    #[error("Undistortion did not converge")]
    NonConvergent,
}

pub type Result<T> = std::result::Result<T, SlsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruction_error_display() {
        let err = ReconstructionError::NotEnoughCameras { registered: 1 };
        assert_eq!(err.to_string(), "At least two cameras are required, 1 registered");

        let err = ReconstructionError::TooManyCameras { max: 2 };
        assert_eq!(err.to_string(), "At most 2 cameras can be registered");

        let err = ReconstructionError::ProjectorPixelOutOfRange {
            camera: 1,
            pixel: 7,
            index: 12,
            count: 6,
        };
        assert_eq!(
            err.to_string(),
            "Camera 1 pixel 7 decoded to projector pixel 12, outside 0..6"
        );
    }

    #[test]
    fn test_camera_error_display() {
        let err = CameraError::CorrespondenceShape {
            expected: (480, 640),
            actual: (480, 320),
        };
        assert_eq!(
            err.to_string(),
            "Correspondence map is (480, 320), expected (480, 640) (height, width)"
        );

        let err = CameraError::InvalidIntrinsics("fx must be non-zero".to_string());
        assert_eq!(err.to_string(), "Invalid intrinsics: fx must be non-zero");
    }

    #[test]
    fn test_distortion_error_display() {
        assert_eq!(
            DistortionError::NonConvergent.to_string(),
            "Undistortion did not converge"
        );
        assert_eq!(
            DistortionError::SingularJacobian.to_string(),
            "Undistortion hit a singular Jacobian"
        );
    }

    #[test]
    fn test_sls_error_from_reconstruction_error() {
        let err: SlsError = ReconstructionError::NotEnoughCameras { registered: 0 }.into();
        assert!(matches!(err, SlsError::Reconstruction(_)));
    }

    #[test]
    fn test_sls_error_from_camera_error() {
        let err: SlsError = CameraError::InvalidIntrinsics("fy".to_string()).into();
        assert!(matches!(err, SlsError::Camera(_)));
    }

    #[test]
    fn test_sls_error_from_distortion_error() {
        let err: SlsError = DistortionError::SingularJacobian.into();
        assert!(matches!(err, SlsError::Distortion(_)));
    }

    #[test]
    fn test_sls_error_invalid_input() {
        let err = SlsError::InvalidInput("projector width is zero".to_string());
        assert_eq!(err.to_string(), "Invalid input: projector width is zero");
    }
}
