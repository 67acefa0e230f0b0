use common::snake::CellRole;
use eframe::egui;

pub const SNAKE_HEAD: egui::Color32 = egui::Color32::from_rgb(0x38, 0x8e, 0x3c);
pub const SNAKE_BODY: egui::Color32 = egui::Color32::from_rgb(0x81, 0xc7, 0x84);
pub const SNAKE_STROKE: egui::Color32 = egui::Color32::from_rgb(0x2e, 0x7d, 0x32);
pub const FOOD: egui::Color32 = egui::Color32::from_rgb(0xd3, 0x2f, 0x2f);
pub const FOOD_STROKE: egui::Color32 = egui::Color32::from_rgb(0xc6, 0x28, 0x28);

const BOARD_LIGHT: egui::Color32 = egui::Color32::from_rgb(0xf5, 0xf5, 0xf5);
const BOARD_DARK: egui::Color32 = egui::Color32::from_rgb(0x21, 0x21, 0x21);

/// Fill and outline for a cell.
pub fn cell_colors(role: CellRole) -> (egui::Color32, egui::Color32) {
    match role {
        CellRole::Head => (SNAKE_HEAD, SNAKE_STROKE),
        CellRole::Body => (SNAKE_BODY, SNAKE_STROKE),
        CellRole::Food => (FOOD, FOOD_STROKE),
    }
}

pub fn board_background(dark_mode: bool) -> egui::Color32 {
    if dark_mode { BOARD_DARK } else { BOARD_LIGHT }
}
