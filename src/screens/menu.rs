// RoundWatch — Main Menu
//
// UDU moves the selector up, DUD moves it down (both wrap), RLR opens the
// selected entry. Every combination read here is consumed.

use crate::display::{MenuScene, Scene};
use crate::events::Combination;
use crate::gesture::GestureRecognizer;

pub const CHOICES: [&str; 4] = ["Banner", "Dashboard", "Ball game", "Off"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Banner,
    Dashboard,
    Ball,
    Off,
}

impl Choice {
    fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Banner,
            1 => Self::Dashboard,
            2 => Self::Ball,
            _ => Self::Off,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Returns the entry to open, if the user confirmed one.
    pub fn update(&mut self, recognizer: &mut GestureRecognizer) -> Option<Choice> {
        match recognizer.take_combination() {
            Combination::Udu => self.step(-1),
            Combination::Dud => self.step(1),
            Combination::Rlr => return Some(Choice::from_index(self.selected)),
            Combination::Lrl | Combination::None => {}
        }
        None
    }

    fn step(&mut self, delta: isize) {
        let len = CHOICES.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
        log::debug!("menu selection: {}", CHOICES[self.selected]);
    }

    pub fn scene(&self) -> Scene {
        Scene::Menu(MenuScene {
            choices: &CHOICES,
            selected: self.selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DudPattern, GestureConfig};
    use crate::screens::testing::{perform, recognizer, recognizer_with};

    #[test]
    fn selection_wraps_both_ways() {
        let mut menu = Menu::new();
        menu.step(-1);
        assert_eq!(menu.selected(), 3);
        menu.step(1);
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn confirm_opens_selected_entry() {
        let mut menu = Menu::new();
        let mut r = recognizer();
        let mut t = 0;
        perform(&mut r, Combination::Dud, &mut t);
        assert_eq!(menu.update(&mut r), None);
        assert_eq!(menu.selected(), 1);

        perform(&mut r, Combination::Rlr, &mut t);
        assert_eq!(menu.update(&mut r), Some(Choice::Dashboard));
        assert!(r.combination().is_none());
    }

    #[test]
    fn lrl_is_consumed_without_effect() {
        let mut menu = Menu::new();
        let mut r = recognizer();
        let mut t = 0;
        perform(&mut r, Combination::Lrl, &mut t);
        assert_eq!(menu.update(&mut r), None);
        assert_eq!(menu.selected(), 0);
        assert!(r.combination().is_none());
    }

    #[test]
    fn udu_moves_up_with_mirrored_dud() {
        let config = GestureConfig {
            dud_pattern: DudPattern::DownUpDown,
            ..GestureConfig::default()
        };
        let mut r = recognizer_with(config);
        let mut menu = Menu::new();
        let mut t = 0;
        assert_eq!(perform(&mut r, Combination::Udu, &mut t), Combination::Udu);
        menu.update(&mut r);
        assert_eq!(menu.selected(), 3);
    }

    #[test]
    fn scene_lists_all_choices() {
        let menu = Menu::new();
        match menu.scene() {
            Scene::Menu(scene) => {
                assert_eq!(scene.choices.len(), 4);
                assert_eq!(scene.selected, 0);
            }
            other => panic!("unexpected scene {:?}", other),
        }
    }
}
