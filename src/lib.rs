//! quadwarp maps the content of an axis-aligned source rectangle onto an arbitrary
//! destination quadrilateral with a planar homography, then resamples it into a raster.
//!
//! - Build a [`Warp`] from [`WarpParams`] (source rectangle, four destination corners, clip,
//!   horizon).
//! - Give it an upstream [`Context`] (anything that can report colors and render a window of
//!   itself, e.g. [`ImageLayer`] or [`SolidColor`]).
//! - Call [`Warp::render`] for one window, or [`render_tiled`] to split the work into strips.
//!
//! Pixels are premultiplied [`Rgba`] end-to-end; [`Rgba8Surface`] converts at the boundary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod host;
pub(crate) mod layer;
pub(crate) mod raster;
pub(crate) mod render;
pub(crate) mod transform;

pub use crate::foundation::core::{Affine, LayerId, Point, Rect, Rgba, Vec2};
pub use crate::foundation::error::{WarpError, WarpResult};
pub use crate::foundation::rect::RectExt;

pub use crate::host::image_layer::ImageLayer;
pub use crate::host::solid::SolidColor;
pub use crate::layer::params::{PARAM_NAMES, ParamValue, WarpParams};
pub use crate::layer::warp::{Warp, WarpedContext};
pub use crate::raster::rgba8::Rgba8Surface;
pub use crate::raster::surface::Surface;
pub use crate::raster::{Interpolation, Quality, Raster, RasterMut};
pub use crate::render::RenderOpts;
pub use crate::render::context::{Context, render_by_color_at};
pub use crate::render::desc::RenderDesc;
pub use crate::render::pipeline::{RenderThreading, TileStats, render_tiled};
pub use crate::render::progress::{NoProgress, ProgressCallback, ProgressStage};
pub use crate::render::region::{DEGENERATE_NUDGE, ProjectedRegion, project_region, source_desc};
pub use crate::transform::homography::{Homography, Quad, build_matrix};
pub use crate::transform::matrix::Matrix3;
pub use crate::transform::transformation::Transformation;
