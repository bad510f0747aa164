use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::foundation::error::{WarpError, WarpResult};
use crate::layer::warp::Warp;
use crate::raster::surface::Surface;
use crate::raster::{Quality, RasterMut};
use crate::render::context::Context;
use crate::render::desc::RenderDesc;
use crate::render::progress::{NoProgress, ProgressCallback};

/// How [`render_tiled`] splits and schedules a frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render strips on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Height of each horizontal strip; `0` is treated as `1`.
    pub rows_per_strip: u32,
    /// Pool size; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            rows_per_strip: 64,
            threads: None,
        }
    }
}

/// Counters reported by [`render_tiled`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileStats {
    /// Strips the frame was split into.
    pub strips: u32,
    /// Destination rows rendered.
    pub rows: u32,
}

/// Render `warp` over `ctx` in horizontal strips.
///
/// Each strip is an independent [`Warp::render`] of the matching slice of `desc`, so the
/// source region requested upstream shrinks with the strip. Progress counts finished rows;
/// a `false` from `progress` stops the remaining strips and clears `dest`.
#[tracing::instrument(
    skip_all,
    fields(w = desc.w, h = desc.h, parallel = threading.parallel)
)]
pub fn render_tiled<C>(
    warp: &Warp,
    ctx: &C,
    dest: &mut Surface,
    quality: Quality,
    desc: &RenderDesc,
    threading: &RenderThreading,
    progress: &mut (dyn ProgressCallback + Send),
) -> WarpResult<TileStats>
where
    C: Context + Sync + ?Sized,
{
    desc.validate()?;
    dest.reset(desc.w, desc.h);

    let strips = strip_ranges(desc.h, threading.rows_per_strip);
    let total = u64::from(desc.h);
    let stats = TileStats {
        strips: strips.len() as u32,
        rows: desc.h,
    };

    let rendered = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        let cancelled = AtomicBool::new(false);
        let reporter = Mutex::new((0u64, progress));
        pool.install(|| {
            strips
                .par_iter()
                .map(|&(y0, y1)| -> WarpResult<Surface> {
                    let mut watch = |_: u64, _: u64| !cancelled.load(Ordering::Relaxed);
                    let mut strip = Surface::default();
                    warp.render(ctx, &mut strip, quality, &desc.rows(y0, y1), &mut watch)?;

                    let mut guard = reporter.lock().map_err(|_| {
                        WarpError::Other(anyhow::anyhow!("progress reporter poisoned"))
                    })?;
                    let (done, cb) = &mut *guard;
                    *done += u64::from(y1 - y0);
                    if !cb.amount_complete(*done, total) {
                        cancelled.store(true, Ordering::Relaxed);
                        return Err(WarpError::Cancelled);
                    }
                    Ok(strip)
                })
                .collect::<Vec<_>>()
        })
    } else {
        let mut out = Vec::with_capacity(strips.len());
        let mut done = 0u64;
        for &(y0, y1) in &strips {
            let mut strip = Surface::default();
            let strip_desc = desc.rows(y0, y1);
            if let Err(e) = warp.render(ctx, &mut strip, quality, &strip_desc, &mut NoProgress) {
                out.push(Err(e));
                break;
            }
            done += u64::from(y1 - y0);
            if !progress.amount_complete(done, total) {
                out.push(Err(WarpError::Cancelled));
                break;
            }
            out.push(Ok(strip));
        }
        out
    };

    for (&(y0, _), strip) in strips.iter().zip(rendered) {
        let strip = match strip {
            Ok(s) => s,
            Err(e) => {
                dest.clear();
                return Err(e);
            }
        };
        let w = desc.w as usize;
        let start = y0 as usize * w;
        let len = strip.pixels().len();
        dest.pixels_mut()[start..start + len].copy_from_slice(strip.pixels());
    }

    Ok(stats)
}

fn strip_ranges(h: u32, rows_per_strip: u32) -> Vec<(u32, u32)> {
    let step = rows_per_strip.max(1);
    let mut out = Vec::with_capacity(h.div_ceil(step) as usize);
    let mut y = 0;
    while y < h {
        let end = y.saturating_add(step).min(h);
        out.push((y, end));
        y = end;
    }
    out
}

fn build_thread_pool(threads: Option<usize>) -> WarpResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WarpError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WarpError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
