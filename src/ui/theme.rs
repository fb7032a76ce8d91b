//! Theme constants for the GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(214, 172, 90);
pub const GRID_LINE: Color32 = Color32::from_rgb(45, 33, 22);
pub const STAR_POINT: Color32 = Color32::from_rgb(45, 33, 22);

// Stone colors
pub const BLACK_STONE: Color32 = Color32::from_rgb(25, 25, 25);
pub const BLACK_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 70);
pub const WHITE_STONE: Color32 = Color32::from_rgb(243, 243, 243);
pub const WHITE_STONE_SHADOW: Color32 = Color32::from_rgb(175, 175, 175);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(215, 60, 50);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(60, 200, 70);

// Panel colors
pub const PANEL_BG: Color32 = Color32::from_rgb(44, 46, 50);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(228, 228, 228);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(158, 158, 158);
pub const STATUS_THINKING: Color32 = Color32::from_rgb(250, 200, 60);
pub const STATUS_OK: Color32 = Color32::from_rgb(110, 200, 110);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(255, 140, 110);

// Sizes
pub const BOARD_MARGIN: f32 = 34.0;
pub const STONE_RADIUS_RATIO: f32 = 0.44;
pub const STAR_POINT_RADIUS: f32 = 3.5;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.5;

pub fn hover_preview(is_black: bool) -> Color32 {
    if is_black {
        Color32::from_rgba_unmultiplied(25, 25, 25, 90)
    } else {
        Color32::from_rgba_unmultiplied(243, 243, 243, 90)
    }
}

/// Star point positions for the 15x15 grid
pub const STAR_POINTS: [(u8, u8); 5] = [(3, 3), (3, 11), (7, 7), (11, 3), (11, 11)];
