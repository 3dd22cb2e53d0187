use crate::draw::Color;

/// Colors applied to one graph element class. The default and highlight
/// palettes mirror each other so selection can swap one for the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementPalette {
    pub lane_entry: Color,
    pub lane_exit: Color,
    pub waypoint: Color,
}

pub const DEFAULT_PALETTE: ElementPalette = ElementPalette {
    lane_entry: Color::WHITE,
    lane_exit: Color::rgb(85, 85, 85),
    waypoint: Color::BLUE,
};

pub const HIGHLIGHT_PALETTE: ElementPalette = ElementPalette {
    lane_entry: Color::CYAN,
    lane_exit: Color::YELLOW,
    waypoint: Color::MAGENTA,
};

pub const WAYPOINT_LABEL_COLOR: Color = Color::rgb(192, 192, 192);
pub const CONNECTOR_LABEL_COLOR: Color = Color::rgb(144, 238, 144);
pub const ARROW_COLOR: Color = Color::RED;
