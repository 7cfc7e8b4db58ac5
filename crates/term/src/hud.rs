//! HUD state: score display and banners, fed by game notifications.

use log::debug;

use crate::core::GameObserver;

/// What the side panel and overlays should show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudState {
    pub score: u32,
    pub pause_banner: bool,
    pub game_over_banner: bool,
    pub restart_banner: bool,
}

impl GameObserver for HudState {
    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn pause_changed(&mut self, paused: bool) {
        self.pause_banner = paused;
    }

    fn game_over(&mut self) {
        debug!("showing game over banner at score {}", self.score);
        self.game_over_banner = true;
        self.restart_banner = true;
        self.pause_banner = false;
    }

    fn restarted(&mut self) {
        self.game_over_banner = false;
        self.restart_banner = false;
        self.pause_banner = false;
    }
}
