// RoundWatch — Screens
//
// The menu and the three apps it opens. Screens consume gesture events from
// the recognizer and describe themselves as a `Scene`; they never draw.

pub mod ball;
pub mod banner;
pub mod dashboard;
pub mod menu;

use crate::battery::BatteryStatus;
use crate::display::Scene;
use crate::events::Combination;
use crate::gesture::GestureRecognizer;

use self::ball::Ball;
use self::banner::Banner;
use self::dashboard::Dashboard;
use self::menu::{Choice, Menu};

pub const BANNER_TEXT: &str = "Easily Amused";

/// Apps leave on LRL and leave any other combination untouched. An ignored
/// combination is overwritten by the LRL that ends the app, so it never
/// reaches the menu.
fn exit_requested(recognizer: &mut GestureRecognizer) -> bool {
    if recognizer.combination() == Combination::Lrl {
        recognizer.take_combination();
        true
    } else {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Active {
    Menu,
    Dashboard(Dashboard),
    Ball(Ball),
    Banner(Banner),
    Off,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Screens {
    menu: Menu,
    active: Active,
}

impl Screens {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(),
            active: Active::Menu,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn is_off(&self) -> bool {
        matches!(self.active, Active::Off)
    }

    pub fn name(&self) -> &'static str {
        match self.active {
            Active::Menu => "menu",
            Active::Dashboard(_) => "dashboard",
            Active::Ball(_) => "ball",
            Active::Banner(_) => "banner",
            Active::Off => "off",
        }
    }

    /// Advance the active screen by one frame.
    pub fn update(&mut self, recognizer: &mut GestureRecognizer) {
        if matches!(self.active, Active::Menu) {
            if let Some(choice) = self.menu.update(recognizer) {
                self.open(choice);
            }
            return;
        }

        let exit = match &mut self.active {
            Active::Menu | Active::Off => false,
            Active::Dashboard(dash) => dash.update(recognizer),
            Active::Ball(ball) => ball.update(recognizer),
            Active::Banner(banner) => banner.update(recognizer),
        };
        if exit {
            log::info!("leaving {} → menu", self.name());
            self.active = Active::Menu;
        }
    }

    fn open(&mut self, choice: Choice) {
        self.active = match choice {
            Choice::Banner => Active::Banner(Banner::new(BANNER_TEXT)),
            Choice::Dashboard => Active::Dashboard(Dashboard::new()),
            Choice::Ball => Active::Ball(Ball::new()),
            Choice::Off => Active::Off,
        };
        log::info!("menu → {}", self.name());
    }

    pub fn scene(&self, recognizer: &GestureRecognizer, battery: &BatteryStatus, imu_revision: u8) -> Scene {
        match &self.active {
            Active::Menu => self.menu.scene(),
            Active::Dashboard(dash) => dash.scene(recognizer, battery, imu_revision),
            Active::Ball(ball) => ball.scene(),
            Active::Banner(banner) => banner.scene(),
            Active::Off => Scene::Off,
        }
    }
}

impl Default for Screens {
    fn default() -> Self {
        Self::new()
    }
}
