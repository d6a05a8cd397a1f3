//! Full-screen backdrops drawn behind the panels
//!
//! Every backdrop is a diagonal gradient with an optional animated layer
//! (particles, waves or geometric outlines). Each has a light and a dark
//! variant.

use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::appearance::{Background, ThemeMode};

type Rgb = (u8, u8, u8);

const BLACK: Rgb = (0, 0, 0);
const WHITE: Rgb = (255, 255, 255);
const BLUE_50: Rgb = (239, 246, 255);
const BLUE_200: Rgb = (191, 219, 254);
const BLUE_900: Rgb = (30, 58, 138);
const GRAY_800: Rgb = (31, 41, 55);
const GRAY_900: Rgb = (17, 24, 39);
const SLATE_900: Rgb = (15, 23, 42);
const INDIGO_500: Rgb = (99, 102, 241);
const INDIGO_900: Rgb = (49, 46, 129);
const PURPLE_500: Rgb = (168, 85, 247);
const PURPLE_900: Rgb = (88, 28, 135);
const VIOLET_900: Rgb = (76, 29, 149);
const PINK_500: Rgb = (236, 72, 153);

const PARTICLE_COUNT: usize = 50;
const SHAPE_COUNT: usize = 20;
const WAVE_COUNT: u16 = 3;

/// Fixed seeds so the layout is stable between frames
const PARTICLE_SEED: u64 = 0x5eed_0050;
const SHAPE_SEED: u64 = 0x5eed_0020;

/// Gradient stops, top-left to bottom-right
fn stops(background: Background, mode: ThemeMode) -> &'static [Rgb] {
    match (background, mode.is_dark()) {
        (Background::Default, false) => &[BLUE_50, BLUE_200],
        (Background::Default, true) => &[GRAY_900, GRAY_800],
        (Background::Gradient, false) => &[INDIGO_500, PURPLE_500, PINK_500],
        (Background::Gradient, true) => &[GRAY_900, PURPLE_900, VIOLET_900],
        (Background::Particles, false) => &[SLATE_900, INDIGO_900],
        (Background::Particles, true) => &[GRAY_900, BLACK],
        (Background::Waves, false) => &[BLUE_900, INDIGO_900],
        (Background::Waves, true) => &[GRAY_900, SLATE_900],
        (Background::Geometric, false) => &[GRAY_900, GRAY_800],
        (Background::Geometric, true) => &[BLACK, GRAY_900],
    }
}

fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Color at position `t` in 0..=1 along the stops
fn sample(stops: &[Rgb], t: f64) -> Rgb {
    match stops {
        [] => BLACK,
        [only] => *only,
        _ => {
            let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
            let i = (scaled.floor() as usize).min(stops.len() - 2);
            lerp(stops[i], stops[i + 1], scaled - i as f64)
        }
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// 0 -> 1 -> 0 over one period
fn triangle(phase: f64) -> f64 {
    let p = phase.rem_euclid(1.0);
    if p < 0.5 {
        p * 2.0
    } else {
        (1.0 - p) * 2.0
    }
}

/// Backdrop widget
pub struct Backdrop {
    background: Background,
    mode: ThemeMode,
    /// Animation frame
    tick: u64,
}

impl Backdrop {
    pub fn new(background: Background, mode: ThemeMode) -> Self {
        Self {
            background,
            mode,
            tick: 0,
        }
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    fn base_color(&self, area: Rect, x: u16, y: u16) -> Rgb {
        let w = f64::from(area.width.saturating_sub(1).max(1));
        let h = f64::from(area.height.saturating_sub(1).max(1));
        let t = (f64::from(x - area.x) / w + f64::from(y - area.y) / h) / 2.0;
        sample(stops(self.background, self.mode), t)
    }

    fn render_gradient(&self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let color = rgb(self.base_color(area, x, y));
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(' ');
                    cell.set_bg(color);
                }
            }
        }
    }

    /// Blend a cell's background toward white
    fn lighten(&self, area: Rect, buf: &mut Buffer, x: u16, y: u16, amount: f64) {
        let base = self.base_color(area, x, y);
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_bg(rgb(lerp(base, WHITE, amount)));
        }
    }

    fn render_particles(&self, area: Rect, buf: &mut Buffer) {
        let mut rng = StdRng::seed_from_u64(PARTICLE_SEED);
        let (low, high) = if self.mode.is_dark() { (0.1, 0.4) } else { (0.2, 0.8) };

        for _ in 0..PARTICLE_COUNT {
            let fx: f64 = rng.gen();
            let fy: f64 = rng.gen();
            let size: f64 = rng.gen_range(1.0..4.0);
            let period: f64 = rng.gen_range(10.0..30.0);

            let wave = triangle(self.tick as f64 / period);
            let drift = (wave * 2.0).round() as u16;
            let x = area.x + (fx * f64::from(area.width.saturating_sub(1))) as u16;
            let y = area.y + (fy * f64::from(area.height.saturating_sub(1))) as u16 + drift;
            if y >= area.bottom() {
                continue;
            }

            let opacity = low + (high - low) * wave;
            let base = self.base_color(area, x, y);
            let glyph = if size < 2.5 { '·' } else { '•' };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(glyph);
                cell.set_fg(rgb(lerp(base, WHITE, opacity)));
            }
        }
    }

    fn render_waves(&self, area: Rect, buf: &mut Buffer) {
        let amount = if self.mode.is_dark() { 0.05 } else { 0.10 };
        let band = (area.height / 4).max(1);

        for i in 1..=WAVE_COUNT {
            let period = 5.0 + f64::from(i);
            let bob = triangle(self.tick as f64 / period + f64::from(i) * 0.1);
            for x in area.left()..area.right() {
                let fx = f64::from(x - area.x) / f64::from(area.width.max(1));
                // Arched crest, lowest at the edges
                let arch = (fx * std::f64::consts::PI).sin();
                let crest = f64::from(band) * arch + bob - f64::from(i - 1) * 1.5;
                let rows = crest.max(0.0).round() as u16;
                for dy in 0..rows.min(area.height) {
                    let y = area.bottom() - 1 - dy;
                    self.lighten(area, buf, x, y, amount);
                }
            }
        }
    }

    fn render_geometric(&self, area: Rect, buf: &mut Buffer) {
        let mut rng = StdRng::seed_from_u64(SHAPE_SEED);
        let alpha = if self.mode.is_dark() { 0.12 } else { 0.2 };

        for _ in 0..SHAPE_COUNT {
            let fx: f64 = rng.gen();
            let fy: f64 = rng.gen();
            let size: u16 = rng.gen_range(2..7);
            let kind: u8 = rng.gen_range(0..3);

            let x0 = area.x + (fx * f64::from(area.width.saturating_sub(1))) as u16;
            let y0 = area.y + (fy * f64::from(area.height.saturating_sub(1))) as u16;
            let color = rgb(lerp(self.base_color(area, x0, y0), WHITE, alpha));

            let mut put = |x: u16, y: u16, ch: char| {
                if x < area.right() && y < area.bottom() {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(ch);
                        cell.set_fg(color);
                    }
                }
            };

            match kind {
                // Square outline; twice as wide to look square
                0 => {
                    let w = size * 2;
                    let h = size;
                    for dx in 1..w {
                        put(x0 + dx, y0, '─');
                        put(x0 + dx, y0 + h, '─');
                    }
                    for dy in 1..h {
                        put(x0, y0 + dy, '│');
                        put(x0 + w, y0 + dy, '│');
                    }
                    put(x0, y0, '┌');
                    put(x0 + w, y0, '┐');
                    put(x0, y0 + h, '└');
                    put(x0 + w, y0 + h, '┘');
                }
                1 => put(x0, y0, '○'),
                _ => put(x0, y0, '△'),
            }
        }
    }
}

impl Widget for Backdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        self.render_gradient(area, buf);
        match self.background {
            Background::Default | Background::Gradient => {}
            Background::Particles => self.render_particles(area, buf),
            Background::Waves => self.render_waves(area, buf),
            Background::Geometric => self.render_geometric(area, buf),
        }
    }
}
