//! Ready-made upstream contexts.

pub(crate) mod image_layer;
pub(crate) mod solid;
