use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{WarpError, WarpResult};
use crate::transform::homography::Quad;

/// Control points and switches of a warp.
///
/// Missing JSON fields take the defaults below; unknown fields are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarpParams {
    /// Top-left corner of the source rectangle. Default `(-2, 2)`.
    pub src_tl: Point,
    /// Bottom-right corner of the source rectangle. Default `(2, -2)`.
    pub src_br: Point,
    /// Where the source top-left lands. Default `(-1.8, 2.1)`.
    pub dest_tl: Point,
    /// Where the source top-right lands. Default `(1.8, 2.1)`.
    pub dest_tr: Point,
    /// Where the source bottom-left lands. Default `(-2.2, -2)`.
    pub dest_bl: Point,
    /// Where the source bottom-right lands. Default `(2.2, -2)`.
    pub dest_br: Point,
    /// Restrict output to the source rectangle and the destination quad's bounds.
    pub clip: bool,
    /// Depth beyond which content is culled. Default `4`.
    pub horizon: f64,
}

impl Default for WarpParams {
    fn default() -> Self {
        Self {
            src_tl: Point::new(-2.0, 2.0),
            src_br: Point::new(2.0, -2.0),
            dest_tl: Point::new(-1.8, 2.1),
            dest_tr: Point::new(1.8, 2.1),
            dest_bl: Point::new(-2.2, -2.0),
            dest_br: Point::new(2.2, -2.0),
            clip: true,
            horizon: 4.0,
        }
    }
}

impl WarpParams {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> WarpResult<Self> {
        let params: Self = serde_json::from_str(s).map_err(|e| WarpError::serde(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> WarpResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open warp params '{}'", path.display()))?;
        let params: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| WarpError::serde(format!("'{}': {e}", path.display())))?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> WarpResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WarpError::serde(e.to_string()))
    }

    /// Reject non-finite control points and a NaN horizon.
    ///
    /// Degenerate but finite geometry (collapsed quads, zero-size source) is accepted.
    pub fn validate(&self) -> WarpResult<()> {
        for (name, p) in self.points() {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(WarpError::validation(format!(
                    "param '{name}' must be finite, got ({}, {})",
                    p.x, p.y
                )));
            }
        }
        if self.horizon.is_nan() {
            return Err(WarpError::validation("param 'horizon' must not be NaN"));
        }
        Ok(())
    }

    /// The destination quad.
    pub fn dest_quad(&self) -> Quad {
        Quad {
            tl: self.dest_tl,
            tr: self.dest_tr,
            bl: self.dest_bl,
            br: self.dest_br,
        }
    }

    /// Normalized source rectangle.
    pub fn src_rect(&self) -> Rect {
        Rect::from_points(self.src_tl, self.src_br)
    }

    fn points(&self) -> [(&'static str, Point); 6] {
        [
            ("src_tl", self.src_tl),
            ("src_br", self.src_br),
            ("dest_tl", self.dest_tl),
            ("dest_tr", self.dest_tr),
            ("dest_bl", self.dest_bl),
            ("dest_br", self.dest_br),
        ]
    }
}

/// A dynamically typed parameter value, for access by name.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamValue {
    /// A control point.
    Point(Point),
    /// A switch such as `clip`.
    Bool(bool),
    /// A scalar such as `horizon`.
    Real(f64),
}

impl ParamValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Bool(_) => "bool",
            Self::Real(_) => "real",
        }
    }
}

/// Names accepted by [`crate::Warp::set_param`] and [`crate::Warp::param`].
pub const PARAM_NAMES: [&str; 8] = [
    "src_tl", "src_br", "dest_tl", "dest_tr", "dest_br", "dest_bl", "clip", "horizon",
];

impl WarpParams {
    /// Read a parameter by name.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        Some(match name {
            "src_tl" => ParamValue::Point(self.src_tl),
            "src_br" => ParamValue::Point(self.src_br),
            "dest_tl" => ParamValue::Point(self.dest_tl),
            "dest_tr" => ParamValue::Point(self.dest_tr),
            "dest_bl" => ParamValue::Point(self.dest_bl),
            "dest_br" => ParamValue::Point(self.dest_br),
            "clip" => ParamValue::Bool(self.clip),
            "horizon" => ParamValue::Real(self.horizon),
            _ => return None,
        })
    }

    /// Write a parameter by name, checking its type and finiteness.
    ///
    /// Returns `true` when a control point changed, i.e. the matrix must be rebuilt.
    pub fn set(&mut self, name: &str, value: ParamValue) -> WarpResult<bool> {
        let mismatch = || {
            WarpError::validation(format!(
                "param '{name}' does not accept a {} value",
                value.type_name()
            ))
        };
        match (name, value) {
            ("clip", ParamValue::Bool(b)) => {
                self.clip = b;
                Ok(false)
            }
            ("horizon", ParamValue::Real(r)) => {
                if r.is_nan() {
                    return Err(WarpError::validation("param 'horizon' must not be NaN"));
                }
                self.horizon = r;
                Ok(false)
            }
            (_, ParamValue::Point(p)) => {
                let slot = match name {
                    "src_tl" => &mut self.src_tl,
                    "src_br" => &mut self.src_br,
                    "dest_tl" => &mut self.dest_tl,
                    "dest_tr" => &mut self.dest_tr,
                    "dest_bl" => &mut self.dest_bl,
                    "dest_br" => &mut self.dest_br,
                    _ if PARAM_NAMES.contains(&name) => return Err(mismatch()),
                    _ => return Err(unknown(name)),
                };
                if !(p.x.is_finite() && p.y.is_finite()) {
                    return Err(WarpError::validation(format!(
                        "param '{name}' must be finite, got ({}, {})",
                        p.x, p.y
                    )));
                }
                *slot = p;
                Ok(true)
            }
            _ if PARAM_NAMES.contains(&name) => Err(mismatch()),
            _ => Err(unknown(name)),
        }
    }
}

fn unknown(name: &str) -> WarpError {
    WarpError::validation(format!("unknown param '{name}'"))
}

#[cfg(test)]
#[path = "../../tests/unit/layer/params.rs"]
mod tests;
