/// An error type for the geometry module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The correspondences do not define a unique projective map.
    #[error("Invalid correspondence: {0}")]
    InvalidCorrespondence(String),

    /// The homography cannot be inverted.
    #[error("Homography is singular (det = {0:e})")]
    SingularHomography(f64),
}
