// RoundWatch — Ball Game
//
// A ball rolls across a table driven by momentum. Leaving the table puts it
// back in the centre and zeroes planar momentum.

use embedded_graphics::prelude::Point;

use crate::display::{BallScene, Scene};
use crate::gesture::GestureRecognizer;

pub const CENTER: Point = Point::new(120, 120);
const EDGE_MIN: i32 = 22;
const EDGE_MAX: i32 = 215;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    position: Point,
}

impl Ball {
    pub fn new() -> Self {
        Self { position: CENTER }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns `true` when the user asked to leave.
    pub fn update(&mut self, recognizer: &mut GestureRecognizer) -> bool {
        let m = recognizer.momentum().value();
        self.position += Point::new(m.x, m.y);

        let on_table = |v: i32| (EDGE_MIN..=EDGE_MAX).contains(&v);
        if !on_table(self.position.x) || !on_table(self.position.y) {
            log::debug!("ball fell off at {:?}", self.position);
            self.position = CENTER;
            recognizer.momentum_mut().reset_planar();
        }

        super::exit_requested(recognizer)
    }

    pub fn scene(&self) -> Scene {
        Scene::Ball(BallScene { ball: self.position })
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}
