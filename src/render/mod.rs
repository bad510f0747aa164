//! Rendering: descriptions, upstream contexts, region projection, resampling, and the
//! strip pipeline.

pub(crate) mod context;
pub(crate) mod desc;
pub(crate) mod pipeline;
pub(crate) mod progress;
pub(crate) mod region;
pub(crate) mod resample;

/// Limits applied while rendering a warp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Largest side, in pixels, of the source tile requested from the upstream context.
    pub max_tile_side: u32,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            max_tile_side: 8192,
        }
    }
}
