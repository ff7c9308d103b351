// RoundWatch — Scenes & Rendering
//
// Screens describe what to show as a typed `Scene`; `render` turns a scene
// into pixels on any embedded-graphics target. The firmware renders into a
// `FrameBuffer` and the panel driver flushes it over SPI.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Polyline, Rectangle},
    text::{Baseline, Text},
};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::events::{Axes, CalibratedReading, Command, TiltState};

/// Width of one glyph in the UI font.
pub const GLYPH_WIDTH: i32 = 6;

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

pub mod palette {
    use embedded_graphics::pixelcolor::Rgb888;

    pub const BLACK: Rgb888 = Rgb888::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb888 = Rgb888::new(0xFF, 0xFF, 0xFF);
    pub const RED: Rgb888 = Rgb888::new(0xFF, 0x00, 0x00);
    pub const GREEN: Rgb888 = Rgb888::new(0x00, 0xFF, 0x00);
    pub const BLUE: Rgb888 = Rgb888::new(0x00, 0x00, 0xFF);
    pub const YELLOW: Rgb888 = Rgb888::new(0xFF, 0xFF, 0x00);
    pub const CYAN: Rgb888 = Rgb888::new(0x00, 0xFF, 0xFF);
    pub const MAGENTA: Rgb888 = Rgb888::new(0xFF, 0x00, 0xFF);
    pub const ORANGE: Rgb888 = Rgb888::new(0xFF, 0xA5, 0x00);
    pub const PURPLE: Rgb888 = Rgb888::new(0x80, 0x00, 0x80);
    pub const BROWN: Rgb888 = Rgb888::new(0xA5, 0x2A, 0x2A);
}

/// `steps` colours linearly interpolated from `start` to `end`, inclusive.
pub fn fade(start: Rgb888, end: Rgb888, steps: usize) -> Vec<Rgb888> {
    if steps < 2 {
        return vec![start; steps];
    }
    let lerp = |a: u8, b: u8, i: usize| -> u8 {
        let a = f32::from(a);
        let b = f32::from(b);
        (a + (b - a) * i as f32 / (steps - 1) as f32).round() as u8
    };
    (0..steps)
        .map(|i| {
            Rgb888::new(
                lerp(start.r(), end.r(), i),
                lerp(start.g(), end.g(), i),
                lerp(start.b(), end.b(), i),
            )
        })
        .collect()
}

fn c(color: Rgb888) -> Rgb565 {
    color.into()
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    Menu(MenuScene),
    Dashboard(DashboardScene),
    Ball(BallScene),
    Banner(BannerScene),
    /// Panel blanked; nothing else is drawn.
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuScene {
    pub choices: &'static [&'static str],
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardScene {
    pub title_x: i32,
    pub battery_label: String,
    pub voltage: f32,
    pub imu_revision: u8,
    pub reading: CalibratedReading,
    pub momentum: Axes,
    pub tilt: TiltState,
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallScene {
    pub ball: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerScene {
    pub text: &'static str,
    pub x: i32,
}

/// Consumer of finished scenes (the panel, or a headless stand-in).
pub trait DisplaySink {
    fn present(&mut self, scene: &Scene) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render<D>(scene: &Scene, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match scene {
        Scene::Menu(menu) => render_menu(menu, target),
        Scene::Dashboard(dash) => render_dashboard(dash, target),
        Scene::Ball(ball) => render_ball(ball, target),
        Scene::Banner(banner) => render_banner(banner, target),
        Scene::Off => target.clear(Rgb565::BLACK),
    }
}

fn text<D>(target: &mut D, x: i32, y: i32, s: &str, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyle::new(&FONT_6X10, c(color));
    Text::with_baseline(s, Point::new(x, y), style, Baseline::Middle).draw(target)?;
    Ok(())
}

fn rect<D>(target: &mut D, x: i32, y: i32, w: u32, h: u32, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(c(color)))
        .draw(target)
}

fn render_menu<D>(menu: &MenuScene, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(Rgb565::BLACK)?;
    text(target, 40, 80, "Please choose an option:", palette::WHITE)?;
    for (i, choice) in menu.choices.iter().enumerate() {
        text(target, 100, 100 + i as i32 * 20, choice, palette::WHITE)?;
    }
    text(target, 90, 100 + menu.selected as i32 * 20, "*", palette::WHITE)
}

fn render_dashboard<D>(dash: &DashboardScene, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(Rgb565::BLACK)?;

    // Title bar
    rect(target, 0, 0, 240, 40, palette::RED)?;
    text(target, dash.title_x, 25, "RoundWatch Demo", palette::WHITE)?;

    // Status bar
    rect(target, 0, 40, 240, 30, palette::BLUE)?;
    text(target, 20, 55, &format!("Chg: {}", dash.battery_label), palette::WHITE)?;
    text(target, 90, 55, &format!("Vol: {:.2}v", dash.voltage), palette::WHITE)?;
    text(target, 160, 55, &format!("ARev: {}", dash.imu_revision), palette::WHITE)?;

    let panels: [(i32, Rgb888, &str, Axes); 3] = [
        (0, palette::GREEN, "Accel", dash.reading.accel),
        (60, palette::ORANGE, "Gyro", dash.reading.gyro),
        (120, palette::MAGENTA, "Tilt", dash.momentum),
    ];
    for (x, color, title, axes) in panels {
        rect(target, x, 70, 60, 60, color)?;
        text(target, x + 20, 85, title, palette::BLACK)?;
        text(target, x + 20, 95, &format!("X: {}", axes.x), palette::BLACK)?;
        text(target, x + 20, 105, &format!("Y: {}", axes.y), palette::BLACK)?;
        text(target, x + 20, 115, &format!("Z: {}", axes.z), palette::BLACK)?;
    }

    rect(target, 180, 70, 60, 60, palette::CYAN)?;
    text(target, 200, 85, "Stat", palette::BLACK)?;
    text(target, 184, 95, dash.tilt.display_name(), palette::BLACK)?;
    text(target, 184, 105, dash.command.display_name(), palette::BLACK)?;

    Circle::with_center(Point::new(40, 170), 40)
        .into_styled(PrimitiveStyle::with_fill(c(palette::YELLOW)))
        .draw(target)?;

    let star = [
        Point::new(15, 0),
        Point::new(11, 10),
        Point::new(0, 10),
        Point::new(8, 20),
        Point::new(5, 29),
        Point::new(15, 21),
        Point::new(25, 29),
        Point::new(22, 20),
        Point::new(29, 10),
        Point::new(19, 10),
        Point::new(15, 0),
    ];
    Polyline::new(&star)
        .translate(Point::new(160, 160))
        .into_styled(PrimitiveStyle::with_stroke(c(palette::BROWN), 2))
        .draw(target)
}

fn render_ball<D>(ball: &BallScene, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(c(palette::BLUE))?;
    rect(target, 35, 35, 170, 170, palette::ORANGE)?;
    Circle::with_center(ball.ball, 20)
        .into_styled(PrimitiveStyle::with_fill(c(palette::PURPLE)))
        .draw(target)
}

fn render_banner<D>(banner: &BannerScene, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(Rgb565::BLACK)?;

    // Badge rim: concentric circles fading orange → white → orange.
    let half = fade(palette::ORANGE, palette::WHITE, 9);
    let rim = half.iter().chain(half.iter().rev()).chain(core::iter::once(&palette::BLACK));
    for (i, color) in rim.enumerate() {
        let diameter = (SCREEN_WIDTH as i32 - 2 * i as i32).max(0) as u32;
        Circle::with_center(Point::new(120, 120), diameter)
            .into_styled(PrimitiveStyle::with_fill(c(*color)))
            .draw(target)?;
    }

    text(target, banner.x, 100, banner.text, palette::MAGENTA)
}

// ---------------------------------------------------------------------------
// Frame buffer
// ---------------------------------------------------------------------------

/// Full-screen RGB565 buffer, row-major.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
        }
    }

    pub fn pixel(&self, p: Point) -> Option<Rgb565> {
        index(p).map(|i| self.pixels[i])
    }

    /// One row as big-endian RGB565 bytes, ready for the panel.
    pub fn row_bytes(&self, y: u32, out: &mut Vec<u8>) {
        use embedded_graphics::pixelcolor::raw::RawU16;

        out.clear();
        let start = (y * SCREEN_WIDTH) as usize;
        for px in &self.pixels[start..start + SCREEN_WIDTH as usize] {
            out.extend_from_slice(&RawU16::from(*px).into_inner().to_be_bytes());
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn index(p: Point) -> Option<usize> {
    let (w, h) = (SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32);
    if (0..w).contains(&p.x) && (0..h).contains(&p.y) {
        Some((p.y * w + p.x) as usize)
    } else {
        None
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}

/// Renders into a private frame buffer and drops the result. Used by the
/// host simulation and tests.
#[derive(Default)]
pub struct HeadlessDisplay {
    frame: FrameBuffer,
    presented: usize,
    last: Option<Scene>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.last.as_ref()
    }
}

impl DisplaySink for HeadlessDisplay {
    fn present(&mut self, scene: &Scene) -> anyhow::Result<()> {
        render(scene, &mut self.frame).unwrap_or_else(|never| match never {});
        self.presented += 1;
        self.last = Some(scene.clone());
        Ok(())
    }
}
