//! # Span Loads
//!
//! Loads are attached to exactly one span and positioned in that span's local
//! coordinate (distance from the span's left node). Loads are positive
//! downward and superpose linearly.
//!
//! ## JSON Form
//!
//! ```json
//! { "kind": "uniform", "span": 0, "magnitude": 25000.0 }
//! { "kind": "point", "span": 1, "magnitude": 100000.0, "position": 12.5 }
//! { "kind": "partial_uniform", "span": 2, "magnitude": 5000.0, "start": 2.0, "end": 8.0 }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use beam_core::loads::{Load, LoadCategory};
//!
//! let dead = Load::uniform(0, 25_000.0);
//! let truck = Load::point(1, 100_000.0, 12.5).with_category(LoadCategory::Vehicle);
//!
//! assert_eq!(dead.total(20.0), 500_000.0);
//! assert_eq!(truck.span(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Load category, used to break the applied load down in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadCategory {
    /// Self-weight and permanent loads
    #[default]
    Dead,
    /// Distributed traffic/occupancy load
    Live,
    /// Concentrated vehicle or equipment load
    Vehicle,
}

impl LoadCategory {
    /// All categories in report order
    pub const ALL: [LoadCategory; 3] = [LoadCategory::Dead, LoadCategory::Live, LoadCategory::Vehicle];

    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCategory::Dead => "Dead",
            LoadCategory::Live => "Live",
            LoadCategory::Vehicle => "Vehicle",
        }
    }
}

impl std::fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A load applied to a single span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Load {
    /// Uniform load over the whole span (N/m)
    #[serde(alias = "uniform_distributed", alias = "uniformDistributed")]
    Uniform {
        /// Span index (0-based)
        span: usize,
        /// Intensity w (N/m), positive downward
        magnitude: f64,
        #[serde(default)]
        category: LoadCategory,
    },

    /// Concentrated load (N)
    #[serde(alias = "pointLoad", alias = "point_load")]
    Point {
        /// Span index (0-based)
        span: usize,
        /// Force P (N), positive downward
        magnitude: f64,
        /// Distance from the span's left node (m)
        position: f64,
        #[serde(default)]
        category: LoadCategory,
    },

    /// Uniform load over part of a span (N/m)
    #[serde(alias = "partialUniform")]
    PartialUniform {
        /// Span index (0-based)
        span: usize,
        /// Intensity w (N/m), positive downward
        magnitude: f64,
        /// Start distance from the span's left node (m)
        start: f64,
        /// End distance from the span's left node (m)
        end: f64,
        #[serde(default)]
        category: LoadCategory,
    },
}

impl Load {
    /// Create a full-span uniform dead load
    pub fn uniform(span: usize, magnitude: f64) -> Self {
        Load::Uniform {
            span,
            magnitude,
            category: LoadCategory::Dead,
        }
    }

    /// Create a point dead load
    pub fn point(span: usize, magnitude: f64, position: f64) -> Self {
        Load::Point {
            span,
            magnitude,
            position,
            category: LoadCategory::Dead,
        }
    }

    /// Create a partial uniform dead load
    pub fn partial_uniform(span: usize, magnitude: f64, start: f64, end: f64) -> Self {
        Load::PartialUniform {
            span,
            magnitude,
            start,
            end,
            category: LoadCategory::Dead,
        }
    }

    /// Set the load category
    pub fn with_category(mut self, new_category: LoadCategory) -> Self {
        match &mut self {
            Load::Uniform { category, .. }
            | Load::Point { category, .. }
            | Load::PartialUniform { category, .. } => *category = new_category,
        }
        self
    }

    /// Index of the span this load acts on
    pub fn span(&self) -> usize {
        match self {
            Load::Uniform { span, .. } | Load::Point { span, .. } | Load::PartialUniform { span, .. } => *span,
        }
    }

    /// Load magnitude (N/m for distributed, N for point)
    pub fn magnitude(&self) -> f64 {
        match self {
            Load::Uniform { magnitude, .. }
            | Load::Point { magnitude, .. }
            | Load::PartialUniform { magnitude, .. } => *magnitude,
        }
    }

    /// Load category
    pub fn category(&self) -> LoadCategory {
        match self {
            Load::Uniform { category, .. }
            | Load::Point { category, .. }
            | Load::PartialUniform { category, .. } => *category,
        }
    }

    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::Uniform { .. } => "Uniform",
            Load::Point { .. } => "Point",
            Load::PartialUniform { .. } => "Partial Uniform",
        }
    }

    /// Resultant vertical force (N) for a span of the given length
    pub fn total(&self, span_length: f64) -> f64 {
        match self {
            Load::Uniform { magnitude, .. } => magnitude * span_length,
            Load::Point { magnitude, .. } => *magnitude,
            Load::PartialUniform {
                magnitude, start, end, ..
            } => magnitude * (end - start),
        }
    }

    /// Local form of the load, stripped of span index and category
    pub fn to_span_load(&self, span_length: f64) -> SpanLoad {
        match self {
            Load::Uniform { magnitude, .. } => SpanLoad::Distributed {
                w: *magnitude,
                start: 0.0,
                end: span_length,
            },
            Load::Point {
                magnitude, position, ..
            } => SpanLoad::Concentrated {
                p: *magnitude,
                a: *position,
            },
            Load::PartialUniform {
                magnitude, start, end, ..
            } => SpanLoad::Distributed {
                w: *magnitude,
                start: *start,
                end: *end,
            },
        }
    }
}

/// A load in span-local form, as consumed by the beam equations
///
/// A full-span uniform load is a `Distributed` load from `0` to `L`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpanLoad {
    /// Point load `p` at `a` from the left end
    Concentrated { p: f64, a: f64 },
    /// Uniform intensity `w` between `start` and `end`
    Distributed { w: f64, start: f64, end: f64 },
}

impl SpanLoad {
    /// Resultant force
    pub fn resultant(&self) -> f64 {
        match *self {
            SpanLoad::Concentrated { p, .. } => p,
            SpanLoad::Distributed { w, start, end } => w * (end - start),
        }
    }

    /// The same load seen from the right end of a span of length `l`
    pub fn mirrored(&self, l: f64) -> SpanLoad {
        match *self {
            SpanLoad::Concentrated { p, a } => SpanLoad::Concentrated { p, a: l - a },
            SpanLoad::Distributed { w, start, end } => SpanLoad::Distributed {
                w,
                start: l - end,
                end: l - start,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_accessors() {
        let load = Load::partial_uniform(2, 5000.0, 2.0, 8.0).with_category(LoadCategory::Live);
        assert_eq!(load.span(), 2);
        assert_eq!(load.magnitude(), 5000.0);
        assert_eq!(load.category(), LoadCategory::Live);
        assert_eq!(load.total(10.0), 30_000.0);
    }

    #[test]
    fn test_uniform_becomes_full_span_distributed() {
        let local = Load::uniform(0, 10.0).to_span_load(6.0);
        assert_eq!(
            local,
            SpanLoad::Distributed {
                w: 10.0,
                start: 0.0,
                end: 6.0
            }
        );
        assert_eq!(local.resultant(), 60.0);
    }

    #[test]
    fn test_mirrored() {
        let p = SpanLoad::Concentrated { p: 1.0, a: 3.0 };
        assert_eq!(p.mirrored(10.0), SpanLoad::Concentrated { p: 1.0, a: 7.0 });

        let w = SpanLoad::Distributed {
            w: 2.0,
            start: 1.0,
            end: 4.0,
        };
        assert_eq!(
            w.mirrored(10.0),
            SpanLoad::Distributed {
                w: 2.0,
                start: 6.0,
                end: 9.0
            }
        );
    }

    #[test]
    fn test_json_shape() {
        let json = r#"[
            {"kind": "uniform", "span": 0, "magnitude": 25000.0},
            {"kind": "point", "span": 1, "magnitude": 100000.0, "position": 12.5, "category": "vehicle"},
            {"kind": "partial_uniform", "span": 2, "magnitude": 10.0, "start": 1.0, "end": 3.0}
        ]"#;
        let loads: Vec<Load> = serde_json::from_str(json).unwrap();
        assert_eq!(loads[0], Load::uniform(0, 25000.0));
        assert_eq!(loads[1].category(), LoadCategory::Vehicle);
        assert_eq!(loads[2].total(10.0), 20.0);

        let out = serde_json::to_string(&loads[1]).unwrap();
        assert!(out.contains("\"kind\":\"point\""));
    }
}
