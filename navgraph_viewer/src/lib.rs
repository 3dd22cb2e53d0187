//! Pickable, per-floor projection of a navigation graph. `graph_view` turns a
//! directed waypoint/lane graph into capsules, circles, arrow glyphs and text
//! labels grouped by floor, resolves world points back to graph elements and
//! tracks the highlighted selection. `draw` holds the primitive set and the
//! targets they are issued to, `fit` maps world bounds onto a viewport, and
//! `raster` turns a floor into pixels for headless export.

pub mod cli;
pub mod draw;
pub mod fit;
pub mod graph_view;
pub mod raster;

pub use draw::{DrawCommand, DrawList, DrawTarget, Primitive};
pub use fit::{Bounds, Fit, ViewTransform};
pub use graph_view::{ElementType, FloorBucket, GraphView, Pick};
