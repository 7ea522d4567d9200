//! UI rendering for the flight scene: play field, HUD and overlays.

use super::backdrop::{Backdrop, Tree, TreeKind};
use super::game_common::{
    framed_layout, progress_bar, render_info_panel_frame, render_modal, render_status_bar,
};
use crate::core::constants::{
    BIRD_WIDTH, BIRD_X, GROUND_HEIGHT, PIPE_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::core::session::{Session, SessionState};
use crate::core::tier::SpeedTier;
use crate::core::types::CollisionCause;
use crate::utils::persistence::ScoreStore;
use rand::Rng;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const GROUND_TOP: f64 = SCREEN_HEIGHT - GROUND_HEIGHT;

/// Colours for the current time of day.
struct Theme {
    sky: Color,
    skyline: Color,
    sun: Color,
    cloud: Color,
    star: Color,
    leaves: Color,
    border: Color,
}

impl Theme {
    fn for_night(night: bool) -> Self {
        if night {
            Self {
                sky: Color::Rgb(20, 20, 70),
                skyline: Color::Rgb(10, 10, 30),
                sun: Color::Rgb(240, 240, 220),
                cloud: Color::Rgb(40, 40, 90),
                star: Color::White,
                leaves: Color::Rgb(20, 80, 30),
                border: Color::Blue,
            }
        } else {
            Self {
                sky: Color::Rgb(70, 180, 255),
                skyline: Color::Rgb(150, 200, 255),
                sun: Color::Rgb(255, 230, 50),
                cloud: Color::Rgb(245, 248, 255),
                star: Color::White,
                leaves: Color::Rgb(40, 180, 60),
                border: Color::Cyan,
            }
        }
    }
}

const GRASS: Color = Color::Rgb(60, 180, 40);
const DIRT: Color = Color::Rgb(210, 180, 140);
const DIRT_SPECK: Color = Color::Rgb(160, 120, 80);
const TRUNK: Color = Color::Rgb(100, 60, 20);

fn pipe_color(tier: SpeedTier) -> Color {
    match tier {
        SpeedTier::One => Color::Rgb(80, 200, 60),
        SpeedTier::Two => Color::Rgb(240, 160, 40),
        SpeedTier::Three => Color::Rgb(220, 60, 60),
    }
}

fn bird_color(tier: SpeedTier) -> Color {
    match tier {
        SpeedTier::One => Color::Yellow,
        SpeedTier::Two => Color::Rgb(255, 200, 50),
        SpeedTier::Three => Color::Rgb(255, 100, 50),
    }
}

/// Render the whole flight screen for the current session state.
pub fn render_flight<R: Rng, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<R, S>,
    backdrop: &Backdrop,
) {
    let theme = Theme::for_night(session.toggles().night_mode);
    let layout = framed_layout(frame, area, " Skyward ", theme.border, 8);

    render_play_area(frame, layout.field, session, backdrop, &theme);
    render_status_bar_content(frame, layout.status_bar, session);
    render_info_panel(frame, layout.info_panel, session);

    match session.state() {
        SessionState::Menu => render_menu(frame, layout.field, session),
        SessionState::Paused => render_pause(frame, layout.field, session),
        SessionState::GameOver => render_game_over(frame, layout.field, session),
        SessionState::Playing => {}
    }
}

#[derive(Clone, Copy)]
struct Cell {
    symbol: char,
    style: Style,
}

/// Character grid the world is rasterised into before it becomes a Paragraph.
struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    fn new(width: usize, height: usize, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    fn x_scale(&self) -> f64 {
        self.width as f64 / SCREEN_WIDTH
    }

    fn y_scale(&self) -> f64 {
        self.height as f64 / SCREEN_HEIGHT
    }

    /// World x at the centre of a column.
    fn world_x(&self, col: usize) -> f64 {
        (col as f64 + 0.5) / self.x_scale()
    }

    fn row_of(&self, world_y: f64) -> i64 {
        (world_y * self.y_scale()).floor() as i64
    }

    fn col_of(&self, world_x: f64) -> i64 {
        (world_x * self.x_scale()).floor() as i64
    }

    /// Cells whose centre falls in `[start, end)` along one axis.
    fn span(start: f64, end: f64, scale: f64, limit: usize) -> std::ops::Range<usize> {
        let first = (start * scale - 0.5).ceil().max(0.0) as usize;
        let last = ((end * scale - 0.5).ceil().max(0.0) as usize).min(limit);
        first.min(last)..last
    }

    fn set(&mut self, col: i64, row: i64, cell: Cell) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = cell;
        }
    }

    /// Paint every cell whose centre lies inside the world rectangle.
    fn fill(&mut self, left: f64, top: f64, right: f64, bottom: f64, cell: Cell) {
        let cols = Self::span(left, right, self.x_scale(), self.width);
        let rows = Self::span(top, bottom, self.y_scale(), self.height);
        for row in rows {
            for col in cols.clone() {
                self.cells[row * self.width + col] = cell;
            }
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|cell| Span::styled(cell.symbol.to_string(), cell.style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

/// Render the main play area with scenery, pipes, ground and bird.
fn render_play_area<R: Rng, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<R, S>,
    backdrop: &Backdrop,
    theme: &Theme,
) {
    let width = area.width as usize;
    let height = area.height as usize;

    if width == 0 || height == 0 {
        return;
    }

    let sky = Style::default().bg(theme.sky);
    let mut grid = Grid::new(width, height, Cell { symbol: ' ', style: sky });

    paint_scenery(&mut grid, backdrop, theme);

    // Pipes
    let engine = session.engine();
    let gap = engine.handicap().gap_size() as f64;
    let pipe = Cell {
        symbol: '█',
        style: Style::default().fg(pipe_color(engine.tier())).bg(theme.sky),
    };
    for p in engine.pipes() {
        let gap_top = p.gap_top as f64;
        grid.fill(p.x, 0.0, p.x + PIPE_WIDTH, gap_top, pipe);
        grid.fill(p.x, gap_top + gap, p.x + PIPE_WIDTH, GROUND_TOP, pipe);
    }

    paint_ground(&mut grid, backdrop.ground_offset);

    if matches!(
        session.state(),
        SessionState::Playing | SessionState::Paused
    ) {
        paint_bird(&mut grid, session, backdrop, theme);
    }

    frame.render_widget(Paragraph::new(grid.into_lines()), area);
}

fn paint_scenery(grid: &mut Grid, backdrop: &Backdrop, theme: &Theme) {
    // Sun by day, moon by night
    let orb = Cell {
        symbol: ' ',
        style: Style::default().bg(theme.sun),
    };
    grid.fill(SCREEN_WIDTH - 150.0, 50.0, SCREEN_WIDTH - 70.0, 130.0, orb);

    if backdrop.night {
        for star in &backdrop.stars {
            let symbol = if star.brightness > 0.8 { '*' } else { '·' };
            let cell = Cell {
                symbol,
                style: Style::default().fg(theme.star).bg(theme.sky),
            };
            grid.set(grid.col_of(star.x), grid.row_of(star.y), cell);
        }
    } else {
        let cloud = Cell {
            symbol: ' ',
            style: Style::default().bg(theme.cloud),
        };
        for c in &backdrop.clouds {
            grid.fill(c.x, c.y, c.x + c.width, c.y + c.height, cloud);
        }
    }

    // Far skyline silhouette
    let skyline = Cell {
        symbol: ' ',
        style: Style::default().bg(theme.skyline),
    };
    let mut x = 0.0;
    while x < SCREEN_WIDTH {
        let i = x as i64;
        let building = 50.0 + (i % 70) as f64 + (i % 40) as f64;
        grid.fill(x, GROUND_TOP - building, x + 60.0, GROUND_TOP, skyline);
        x += 60.0;
    }

    for tree in &backdrop.trees {
        paint_tree(grid, tree, tree.screen_x(backdrop.tree_offset), theme);
    }
}

/// Trunk plus a canopy built from blocks, standing on the ground line.
fn paint_tree(grid: &mut Grid, tree: &Tree, x: f64, theme: &Theme) {
    let (w, h, g) = (tree.width, tree.height, GROUND_TOP);
    let trunk = Cell {
        symbol: ' ',
        style: Style::default().bg(TRUNK),
    };
    grid.fill(x + w / 2.0 - 4.0, g - h, x + w / 2.0 + 4.0, g, trunk);

    let leaves = Cell {
        symbol: ' ',
        style: Style::default().bg(theme.leaves),
    };
    match tree.kind {
        TreeKind::Pine => {
            grid.fill(x + w / 3.0, g - h - 20.0, x + 2.0 * w / 3.0, g - h, leaves);
            grid.fill(x, g - h, x + w, g - h / 2.0, leaves);
            grid.fill(x - 5.0, g - h / 2.0, x + w + 5.0, g - h / 3.0, leaves);
        }
        TreeKind::Round => {
            grid.fill(x - 5.0, g - h - 15.0, x + w + 5.0, g - h - 5.0, leaves);
            grid.fill(x - 10.0, g - h - 5.0, x + w + 10.0, g - h + w / 2.0, leaves);
        }
        TreeKind::Bushy => {
            grid.fill(x, g - h - 10.0, x + w, g - h - 10.0 + w, leaves);
            grid.fill(x - 8.0, g - h, x + w - 8.0, g - h + w, leaves);
            grid.fill(x + 8.0, g - h - 5.0, x + w + 8.0, g - h - 5.0 + w, leaves);
        }
    }
}

fn paint_ground(grid: &mut Grid, offset: f64) {
    let first_row = grid.row_of(GROUND_TOP).clamp(0, grid.height as i64) as usize;
    for row in first_row..grid.height {
        for col in 0..grid.width {
            let cell = if row == first_row {
                Cell {
                    symbol: '▀',
                    style: Style::default().fg(GRASS).bg(DIRT),
                }
            } else {
                let textured = ((grid.world_x(col) + offset) / 20.0) as i64 % 3 == 0;
                Cell {
                    symbol: if textured { '·' } else { ' ' },
                    style: Style::default().fg(DIRT_SPECK).bg(DIRT),
                }
            };
            grid.cells[row * grid.width + col] = cell;
        }
    }
}

fn paint_bird<R: Rng, S: ScoreStore>(
    grid: &mut Grid,
    session: &Session<R, S>,
    backdrop: &Backdrop,
    theme: &Theme,
) {
    let bird = session.engine().bird();
    let row = grid.row_of(bird.y);
    let cols = Grid::span(
        BIRD_X - BIRD_WIDTH / 2.0,
        BIRD_X + BIRD_WIDTH / 2.0,
        grid.x_scale(),
        grid.width,
    );
    let cols: Vec<usize> = if cols.is_empty() {
        vec![grid.col_of(BIRD_X).max(0) as usize]
    } else {
        cols.collect()
    };

    let wing = match backdrop.wing_frame() {
        1 => '^',
        2 => 'v',
        _ => '~',
    };
    // Beak tilts with the flight path
    let beak = if bird.velocity < -4.0 {
        '↗'
    } else if bird.velocity > 6.0 {
        '↘'
    } else {
        '>'
    };

    let style = Style::default()
        .fg(bird_color(session.tier()))
        .bg(theme.sky)
        .add_modifier(Modifier::BOLD);
    let last = cols.len() - 1;
    for (i, col) in cols.iter().enumerate() {
        let symbol = match i {
            _ if last == 0 => beak,
            0 => wing,
            _ if i == last => beak,
            _ => 'o',
        };
        grid.set(*col as i64, row, Cell { symbol, style });
    }
}

/// Render the status bar at the bottom.
fn render_status_bar_content<R: Rng, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<R, S>,
) {
    match session.state() {
        SessionState::Menu => render_status_bar(
            frame,
            area,
            "Press Space to fly!",
            Color::Yellow,
            &[
                ("[Space]", "Play"),
                ("[H]", "Hard"),
                ("[N]", "Night"),
                ("[S]", "Sound"),
                ("[Q]", "Quit"),
            ],
        ),
        SessionState::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", session.score()),
            Color::Green,
            &[("[Space/Up]", "Flap"), ("[P]", "Pause")],
        ),
        SessionState::Paused => render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[P]", "Resume"), ("[Q]", "Quit")],
        ),
        SessionState::GameOver => render_status_bar(
            frame,
            area,
            &format!("Crashed with {} points", session.score()),
            Color::Red,
            &[("[R]", "Retry"), ("[M]", "Menu"), ("[Q]", "Quit")],
        ),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "On"
    } else {
        "Off"
    }
}

/// Render the info panel on the right.
fn render_info_panel<R: Rng, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<R, S>,
) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let tier = session.tier();
    let toggles = session.toggles();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(session.score().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Best:  ", label),
            Span::styled(
                session.best_score().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Tier:  ", label),
            Span::styled(
                tier.level().to_string(),
                Style::default().fg(pipe_color(tier)),
            ),
        ]),
    ];

    // Progress toward the next tier
    let next = SpeedTier::THRESHOLDS
        .iter()
        .copied()
        .find(|&t| t > session.score());
    match next {
        Some(threshold) => {
            let start = SpeedTier::THRESHOLDS
                .iter()
                .copied()
                .filter(|&t| t <= session.score())
                .max()
                .unwrap_or(0);
            let fraction =
                (session.score() - start) as f64 / (threshold - start).max(1) as f64;
            lines.push(Line::from(Span::styled(
                format!(" Next at {}", threshold),
                label,
            )));
            lines.push(progress_bar(
                fraction,
                (inner.width as usize).saturating_sub(2),
                pipe_color(tier),
            ));
        }
        None => lines.push(Line::from(Span::styled(" Top speed!", label))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Mode:  ", label),
        if toggles.hard_mode {
            Span::styled("Hard", Style::default().fg(Color::Red))
        } else {
            Span::styled("Normal", Style::default().fg(Color::Green))
        },
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Sky:   ", label),
        Span::raw(if toggles.night_mode { "Night" } else { "Day" }),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Sound: ", label),
        Span::raw(on_off(toggles.sound_enabled)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_menu<R: Rng, S: ScoreStore>(frame: &mut Frame, area: Rect, session: &Session<R, S>) {
    let toggles = session.toggles();
    let toggle_line = |key: &str, name: &str, flag: bool, color: Color| {
        Line::from(vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(Color::White)),
            Span::styled(format!("{}: ", name), Style::default().fg(Color::DarkGray)),
            Span::styled(
                on_off(flag).to_uppercase(),
                Style::default().fg(if flag { color } else { Color::DarkGray }),
            ),
        ])
    };

    let body = vec![
        Line::from(Span::styled(
            format!("Best: {}", session.best_score()),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        toggle_line("H", "Hard", toggles.hard_mode, Color::Red),
        toggle_line("N", "Night", toggles.night_mode, Color::Blue),
        toggle_line("S", "Sound", toggles.sound_enabled, Color::Yellow),
        Line::from(""),
        Line::from(Span::styled(
            "[Space] Play",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
    ];

    render_modal(frame, area, "S K Y W A R D", Color::Rgb(255, 120, 0), body);
}

fn render_pause<R: Rng, S: ScoreStore>(frame: &mut Frame, area: Rect, session: &Session<R, S>) {
    let body = vec![
        Line::from(format!("Score: {}", session.score())),
        Line::from(""),
        Line::from(Span::styled(
            "[P] Resume",
            Style::default().fg(Color::Yellow),
        )),
    ];
    render_modal(frame, area, "PAUSED", Color::Yellow, body);
}

/// One-line explanation of how the flight ended.
pub fn crash_message(cause: Option<CollisionCause>) -> &'static str {
    match cause {
        Some(CollisionCause::Pipe) => "You clipped a pipe.",
        Some(CollisionCause::Ground) => "You hit the ground.",
        Some(CollisionCause::Ceiling) => "You flew off the top.",
        None => "You crashed.",
    }
}

fn render_game_over<R: Rng, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<R, S>,
) {
    let mut body = vec![
        Line::from(Span::styled(
            crash_message(session.last_collision()),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Score  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.score().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best   ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.best_score().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    if session.is_new_best() {
        body.push(Line::from(Span::styled(
            "New best!",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
    }

    body.push(Line::from(""));
    body.push(Line::from(vec![
        Span::styled("[R] Retry", Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled("[M] Menu", Style::default().fg(Color::Cyan)),
    ]));

    render_modal(frame, area, "GAME OVER", Color::Red, body);
}
