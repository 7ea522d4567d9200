pub mod backdrop;
pub mod flight_scene;
pub mod game_common;

use crate::core::session::Session;
use crate::utils::persistence::ScoreStore;
use backdrop::Backdrop;
use rand::Rng;
use ratatui::Frame;

/// Draw one frame of the game.
pub fn draw<R: Rng, S: ScoreStore>(
    frame: &mut Frame,
    session: &Session<R, S>,
    backdrop: &Backdrop,
) {
    let area = frame.size();
    flight_scene::render_flight(frame, area, session, backdrop);
}
