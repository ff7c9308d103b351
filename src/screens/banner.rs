// RoundWatch — Scrolling Banner

use crate::config::SCREEN_WIDTH;
use crate::display::{BannerScene, Scene, GLYPH_WIDTH};
use crate::gesture::GestureRecognizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    text: &'static str,
    x: i32,
}

impl Banner {
    pub fn new(text: &'static str) -> Self {
        Self { text, x: 0 }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    fn width(&self) -> i32 {
        self.text.chars().count() as i32 * GLYPH_WIDTH
    }

    /// Returns `true` when the user asked to leave.
    pub fn update(&mut self, recognizer: &mut GestureRecognizer) -> bool {
        self.x -= 1;
        // Re-enter from the right edge once fully off-screen.
        if self.x < -self.width() {
            self.x = SCREEN_WIDTH as i32;
        }
        super::exit_requested(recognizer)
    }

    pub fn scene(&self) -> Scene {
        Scene::Banner(BannerScene { text: self.text, x: self.x })
    }
}
