pub(crate) mod homography;
pub(crate) mod matrix;
pub(crate) mod transformation;
