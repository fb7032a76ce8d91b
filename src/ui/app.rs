//! Main application: play screen and replay browser

use std::path::{Path, PathBuf};

use eframe::egui;
use egui::{
    CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel,
};

use crate::board::{format_point, GameState, Stone};
use crate::record::{self, GameRecord, SAVED_GAMES_DIR};

use super::board_view::BoardView;
use super::session::{GameMode, GameSession};
use super::theme::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Play,
    Replay,
}

/// Main Gomoku application
pub struct GomokuApp {
    screen: Screen,
    session: GameSession,
    board_view: BoardView,
    replay: ReplayBrowser,
    depth_setting: u32,
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let depth = crate::search::DEFAULT_DEPTH;
        Self {
            screen: Screen::Play,
            session: GameSession::new(GameMode::default(), depth),
            board_view: BoardView::default(),
            replay: ReplayBrowser::default(),
            depth_setting: depth,
        }
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New game vs engine (play Black)").clicked() {
                        self.session.reset(GameMode::HumanVsEngine {
                            human: Stone::Black,
                        });
                        self.screen = Screen::Play;
                        ui.close_menu();
                    }
                    if ui.button("New game vs engine (play White)").clicked() {
                        self.session.reset(GameMode::HumanVsEngine {
                            human: Stone::White,
                        });
                        self.screen = Screen::Play;
                        ui.close_menu();
                    }
                    if ui.button("New hotseat game").clicked() {
                        self.session.reset(GameMode::HumanVsHuman);
                        self.screen = Screen::Play;
                        ui.close_menu();
                    }
                });

                ui.separator();
                if ui
                    .selectable_label(self.screen == Screen::Play, "Play")
                    .clicked()
                {
                    self.screen = Screen::Play;
                }
                if ui
                    .selectable_label(self.screen == Screen::Replay, "Replay")
                    .clicked()
                {
                    self.screen = Screen::Replay;
                    self.replay.refresh();
                }
            });
        });
    }

    fn render_play_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("play_panel")
            .min_width(230.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                ui.label(RichText::new("GOMOKU").size(16.0).strong().color(TEXT_PRIMARY));
                ui.add_space(8.0);

                // Turn / result banner
                if let Some(winner) = self.session.state.winner() {
                    ui.label(
                        RichText::new(format!("{winner} wins!"))
                            .size(14.0)
                            .strong()
                            .color(WIN_HIGHLIGHT),
                    );
                } else if self.session.state.is_draw() {
                    ui.label(RichText::new("Draw").size(14.0).strong().color(TEXT_PRIMARY));
                } else {
                    let turn = self.session.state.current();
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{turn} to move"))
                                .size(13.0)
                                .color(TEXT_PRIMARY),
                        );
                        if self.session.is_ai_thinking() {
                            ui.spinner();
                            if let Some(elapsed) = self.session.thinking_elapsed() {
                                ui.label(
                                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                                        .color(STATUS_THINKING),
                                );
                            }
                        }
                    });
                }

                ui.label(
                    RichText::new(format!("move #{}", self.session.state.moves().len()))
                        .size(11.0)
                        .color(TEXT_SECONDARY),
                );
                ui.add_space(8.0);
                ui.separator();

                // Engine settings
                ui.add_space(4.0);
                ui.label(RichText::new("Engine depth").size(12.0).color(TEXT_PRIMARY));
                ui.add(egui::Slider::new(&mut self.depth_setting, 1..=8));
                self.session.set_depth(self.depth_setting);

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Undo").clicked() {
                        self.session.undo();
                    }
                    if ui.button("Save game").clicked() {
                        match self.session.save() {
                            Ok(path) => {
                                self.session.message =
                                    Some(format!("Saved {}", path.display()));
                            }
                            Err(e) => self.session.message = Some(e),
                        }
                    }
                });

                if let Some(msg) = &self.session.message {
                    ui.add_space(6.0);
                    ui.label(RichText::new(msg.as_str()).size(11.0).color(ERROR_TEXT));
                }

                // Last search statistics
                if let Some(outcome) = &self.session.last_search {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(4.0);
                    ui.label(RichText::new("LAST SEARCH").size(11.0).color(TEXT_SECONDARY));

                    Frame::new()
                        .fill(PANEL_BG)
                        .corner_radius(CornerRadius::same(4))
                        .show(ui, |ui| {
                            egui::Grid::new("search_stats")
                                .num_columns(2)
                                .spacing([12.0, 2.0])
                                .show(ui, |ui| {
                                    ui.label(RichText::new("Move").color(TEXT_SECONDARY));
                                    ui.label(
                                        RichText::new(format_point(outcome.best_move))
                                            .color(TEXT_PRIMARY),
                                    );
                                    ui.end_row();

                                    ui.label(RichText::new("Score").color(TEXT_SECONDARY));
                                    ui.label(
                                        RichText::new(format!("{}", outcome.score))
                                            .color(STATUS_OK),
                                    );
                                    ui.end_row();

                                    ui.label(RichText::new("Depth").color(TEXT_SECONDARY));
                                    ui.label(
                                        RichText::new(format!("{}", outcome.depth))
                                            .color(TEXT_PRIMARY),
                                    );
                                    ui.end_row();

                                    ui.label(RichText::new("Nodes").color(TEXT_SECONDARY));
                                    ui.label(
                                        RichText::new(format!("{}", outcome.nodes))
                                            .color(TEXT_PRIMARY),
                                    );
                                    ui.end_row();

                                    if let Some(t) = self.session.last_search_time {
                                        ui.label(RichText::new("Time").color(TEXT_SECONDARY));
                                        ui.label(
                                            RichText::new(format!("{} ms", t.as_millis()))
                                                .color(TEXT_PRIMARY),
                                        );
                                        ui.end_row();
                                    }
                                });
                        });
                }
            });
    }

    fn render_play_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let interactive = !self.session.state.is_over()
                && self.session.is_human_turn()
                && !self.session.is_ai_thinking();

            let clicked = self.board_view.show(
                ui,
                self.session.state.board(),
                self.session.state.current(),
                self.session.state.moves().last().map(|m| m.pos),
                self.session.winning_line(),
                interactive,
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.session.try_place(pos) {
                    self.session.message = Some(msg);
                }
            }
        });
    }

    fn render_replay_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("replay_panel")
            .min_width(260.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("SAVED GAMES").size(13.0).color(TEXT_PRIMARY));
                    if ui.small_button("Refresh").clicked() {
                        self.replay.refresh();
                    }
                });
                ui.add_space(6.0);

                let files = self.replay.files.clone();
                ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                    for path in &files {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        let selected = self.replay.selected.as_deref() == Some(path.as_path());
                        if ui.selectable_label(selected, name).clicked() {
                            self.replay.open(path.clone());
                        }
                    }
                    if files.is_empty() {
                        ui.label(
                            RichText::new("nothing saved yet").size(11.0).color(TEXT_SECONDARY),
                        );
                    }
                });

                if let Some(err) = &self.replay.error {
                    ui.add_space(6.0);
                    ui.label(RichText::new(err.as_str()).size(11.0).color(ERROR_TEXT));
                }

                let summary = self.replay.record.as_ref().map(|r| {
                    (
                        format!("{} vs {}", r.black, r.white),
                        r.result.clone(),
                        r.date.clone(),
                        r.moves.len() as isize,
                    )
                });
                if let Some((title, result, date, total)) = summary {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.label(RichText::new(title).size(12.0).color(TEXT_PRIMARY));
                    ui.label(RichText::new(result).size(11.0).color(TEXT_SECONDARY));
                    ui.label(RichText::new(date).size(10.0).color(TEXT_SECONDARY));

                    ui.add_space(6.0);
                    let shown = self.replay.index + 1;
                    ui.horizontal(|ui| {
                        if ui.button("|<").clicked() {
                            self.replay.seek(-1);
                        }
                        if ui.button("<").clicked() {
                            self.replay.seek(self.replay.index - 1);
                        }
                        ui.label(
                            RichText::new(format!("{shown}/{total}")).color(TEXT_PRIMARY),
                        );
                        if ui.button(">").clicked() {
                            self.replay.seek(self.replay.index + 1);
                        }
                        if ui.button(">|").clicked() {
                            self.replay.seek(total - 1);
                        }
                    });
                }
            });
    }

    fn render_replay_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let last = self.replay.shown.moves().last().map(|m| m.pos);
            self.board_view.show(
                ui,
                self.replay.shown.board(),
                self.replay.shown.current(),
                last,
                None,
                false,
            );
        });
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.render_menu_bar(ctx);

        match self.screen {
            Screen::Play => {
                self.session.poll_ai();
                self.session.start_ai_if_needed();

                self.render_play_side_panel(ctx);
                self.render_play_board(ctx);

                if self.session.is_ai_thinking() {
                    ctx.request_repaint();
                }
            }
            Screen::Replay => {
                self.render_replay_side_panel(ctx);
                self.render_replay_board(ctx);
            }
        }
    }
}

/// Saved-game list and the record currently open for stepping through.
struct ReplayBrowser {
    files: Vec<PathBuf>,
    selected: Option<PathBuf>,
    record: Option<GameRecord>,
    /// Index of the last shown move; -1 is the empty board
    index: isize,
    shown: GameState,
    error: Option<String>,
}

impl Default for ReplayBrowser {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            selected: None,
            record: None,
            index: -1,
            shown: GameState::new(),
            error: None,
        }
    }
}

impl ReplayBrowser {
    fn refresh(&mut self) {
        self.files = record::list_saved_games(Path::new(SAVED_GAMES_DIR));
    }

    fn open(&mut self, path: PathBuf) {
        match record::load_game(&path) {
            Ok(record) => {
                self.index = record.moves.len() as isize - 1;
                self.shown = record.replay_to_move(self.index);
                self.record = Some(record);
                self.selected = Some(path);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    fn seek(&mut self, index: isize) {
        let Some(record) = &self.record else {
            return;
        };
        let max = record.moves.len() as isize - 1;
        self.index = index.clamp(-1, max);
        self.shown = record.replay_to_move(self.index);
    }
}
