//! Board rendering and click handling

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Pos, Stone, BOARD_SIZE};

use super::theme::*;

/// Renders the grid and stones and maps pointer input back to
/// intersections. Row 1 is drawn at the bottom, matching the coordinate
/// notation.
pub struct BoardView {
    cell_size: f32,
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Draw the board. When `interactive` is set, hovering previews the
    /// next stone and a click on an empty intersection is returned.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        current: Stone,
        last_move: Option<Pos>,
        winning_line: Option<[Pos; 5]>,
        interactive: bool,
    ) -> Option<Pos> {
        let available = ui.available_size();
        let board_size = available.x.min(available.y) - 10.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);
        self.draw_stones(&painter, board);

        if let Some(pos) = last_move {
            painter.circle_filled(
                self.board_to_screen(pos),
                LAST_MOVE_MARKER_RADIUS,
                LAST_MOVE_MARKER,
            );
        }

        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, &line);
        }

        let mut clicked = None;
        if interactive {
            if let Some(pointer) = response.hover_pos() {
                if let Some(pos) = self.screen_to_board(pointer) {
                    if board.is_empty(pos) {
                        self.draw_hover_preview(&painter, pos, current);
                        if response.clicked() {
                            clicked = Some(pos);
                        }
                    }
                }
            }
        }
        clicked
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = (BOARD_SIZE as f32 - 1.0) * self.cell_size;

        for i in 0..BOARD_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    fn draw_star_points(&self, painter: &Painter) {
        for (row, col) in STAR_POINTS {
            let center = self.board_to_screen(Pos::new(row, col));
            painter.circle_filled(center, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Column letters A..O along the bottom, row numbers 1..15 up the left.
    fn draw_coordinates(&self, painter: &Painter) {
        let font = FontId::proportional(11.0);

        for col in 0..BOARD_SIZE {
            let letter = (b'A' + col as u8) as char;
            let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;
            let pos = Pos2::new(x, self.board_rect.max.y - 10.0);
            painter.text(pos, Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
        }

        for row in 0..BOARD_SIZE {
            let screen = self.board_to_screen(Pos::new(row as u8, 0));
            let pos = Pos2::new(self.board_rect.min.x + 11.0, screen.y);
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                format!("{}", row + 1),
                font.clone(),
                GRID_LINE,
            );
        }
    }

    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for pos in board.occupied() {
            self.draw_stone(painter, pos, board.get(pos));
        }
    }

    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow = Vec2::new(1.5, 1.5);

        match stone {
            Stone::Black => {
                painter.circle_filled(
                    center + shadow,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, BLACK_STONE);
                painter.circle_filled(
                    center + Vec2::new(-radius * 0.3, -radius * 0.3),
                    radius * 0.2,
                    BLACK_STONE_HIGHLIGHT,
                );
            }
            Stone::White => {
                painter.circle_filled(
                    center + shadow,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_STONE_SHADOW),
                );
            }
            Stone::Empty => {}
        }
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos; 5]) {
        let stroke = Stroke::new(3.5, WIN_HIGHLIGHT);
        for i in 0..4 {
            painter.line_segment(
                [self.board_to_screen(line[i]), self.board_to_screen(line[i + 1])],
                stroke,
            );
        }
        for &pos in line {
            let radius = self.cell_size * STONE_RADIUS_RATIO + 2.5;
            painter.circle_stroke(self.board_to_screen(pos), radius, stroke);
        }
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, current: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        painter.circle_filled(center, radius, hover_preview(current == Stone::Black));
    }

    fn screen_to_board(&self, screen: Pos2) -> Option<Pos> {
        let relative = screen - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size).floor();
        let flipped = ((relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size).floor();
        let row = BOARD_SIZE as f32 - 1.0 - flipped;

        let (row, col) = (row as i32, col as i32);
        if Pos::is_valid(row, col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + f32::from(pos.col) * self.cell_size;
        let y = self.board_rect.min.y
            + BOARD_MARGIN
            + (BOARD_SIZE as f32 - 1.0 - f32::from(pos.row)) * self.cell_size;
        Pos2::new(x, y)
    }
}
