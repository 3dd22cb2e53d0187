use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use glam::{UVec2, Vec2};
use serde::Deserialize;

use crate::draw::Color;
use crate::graph_view::DEFAULT_TEXT_SIZE;
use crate::raster::DEFAULT_BACKGROUND;

const DEFAULT_LANE_WIDTH: f32 = 1.0;
const DEFAULT_MARGIN: f32 = 0.02;
const DEFAULT_FRAME_SIZE: UVec2 = UVec2::new(1250, 1028);
const MAX_FRAME_DIMENSION: u32 = 16_384;

#[derive(Parser, Debug)]
#[command(about = "Inspect a multi-floor navigation graph without opening a window", version)]
pub struct Args {
    /// Navigation graph JSON (waypoints with map labels, directed lanes)
    #[arg(long)]
    pub graph: PathBuf,

    /// Optional view preset JSON (lane width, text size, frame size, margin)
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// TTF font used for waypoint labels; labels are measured with fixed
    /// metrics and left out of exported frames when omitted
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Floor to activate instead of the first floor that has a lane
    #[arg(long)]
    pub map: Option<String>,

    /// Lane width in world units (overrides the preset)
    #[arg(long)]
    pub lane_width: Option<f32>,

    /// Label character size (overrides the preset)
    #[arg(long)]
    pub text_size: Option<u32>,

    /// World point "x,y" to pick on the active floor; each hit is selected
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub pick: Vec<Vec2>,

    /// Print the floor labels found in the graph
    #[arg(long)]
    pub list_maps: bool,

    /// When set, rasterise the active floor and write it to disk (PNG)
    #[arg(long)]
    pub dump_frame: Option<PathBuf>,

    /// When set, write the active floor's draw commands as JSON
    #[arg(long)]
    pub dump_draw_list: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ViewPreset {
    #[serde(default)]
    pub lane_width: Option<f32>,
    #[serde(default)]
    pub text_size: Option<u32>,
    #[serde(default)]
    pub margin: Option<f32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub background: Option<[u8; 4]>,
}

/// Preset values with command line overrides applied and defaults filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub lane_width: f32,
    pub text_size: u32,
    pub margin: f32,
    pub frame_size: UVec2,
    pub background: Color,
}

impl ViewSettings {
    pub fn resolve(args: &Args, preset: &ViewPreset) -> Result<Self> {
        let lane_width = args
            .lane_width
            .or(preset.lane_width)
            .unwrap_or(DEFAULT_LANE_WIDTH);
        ensure!(
            lane_width.is_finite() && lane_width > 0.0,
            "lane width must be positive (got {lane_width})"
        );

        let text_size = args
            .text_size
            .or(preset.text_size)
            .unwrap_or(DEFAULT_TEXT_SIZE);
        ensure!(text_size > 0, "text size must be positive");

        let margin = preset.margin.unwrap_or(DEFAULT_MARGIN);
        ensure!(
            (0.0..0.5).contains(&margin),
            "margin must be in [0, 0.5) (got {margin})"
        );

        let frame_size = UVec2::new(
            preset.width.unwrap_or(DEFAULT_FRAME_SIZE.x),
            preset.height.unwrap_or(DEFAULT_FRAME_SIZE.y),
        );
        ensure!(
            frame_size.x > 0 && frame_size.y > 0,
            "frame size must be non-zero (got {}x{})",
            frame_size.x,
            frame_size.y
        );
        ensure!(
            frame_size.x <= MAX_FRAME_DIMENSION && frame_size.y <= MAX_FRAME_DIMENSION,
            "frame size {}x{} exceeds {MAX_FRAME_DIMENSION} pixels per side",
            frame_size.x,
            frame_size.y
        );

        Ok(Self {
            lane_width,
            text_size,
            margin,
            frame_size,
            background: preset
                .background
                .map(Color::from_array)
                .unwrap_or(DEFAULT_BACKGROUND),
        })
    }
}

pub fn load_view_preset(path: &Path) -> Result<ViewPreset> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading view preset {}", path.display()))?;
    let preset: ViewPreset = serde_json::from_str(&data)
        .with_context(|| format!("parsing view preset {}", path.display()))?;
    Ok(preset)
}

pub fn parse_point(raw: &str) -> Result<Vec2, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {raw:?}"))?;
    let x: f32 = x
        .trim()
        .parse()
        .map_err(|err| format!("invalid x coordinate {x:?}: {err}"))?;
    let y: f32 = y
        .trim()
        .parse()
        .map_err(|err| format!("invalid y coordinate {y:?}: {err}"))?;
    Ok(Vec2::new(x, y))
}
