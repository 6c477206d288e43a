//! Ambient decorations: cursor trail, corner glyphs, rain and the scroll hint.
//!
//! All of these are plain state updated from input callbacks and the frame
//! loop; the web layer draws them onto the 2D decor canvas or, for rain, into
//! the line renderer.

use crate::constants::*;
use crate::timer::TimerSlot;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

const KATAKANA_BASE: u32 = 0x30A0;
const KATAKANA_SPAN: u32 = 96;

pub fn random_glyph(rng: &mut impl Rng) -> char {
    char::from_u32(KATAKANA_BASE + rng.gen_range(0..KATAKANA_SPAN)).unwrap_or('ア')
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub opacity: f32,
    pub size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphParticle {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub glyph: char,
    pub opacity: f32,
}

pub struct CursorTrail {
    cursor: Option<Vec2>,
    pressed: bool,
    points: VecDeque<TrailPoint>,
    particles: VecDeque<GlyphParticle>,
    step_accum_ms: f64,
    rng: StdRng,
}

impl CursorTrail {
    pub fn new(seed: u64) -> Self {
        Self {
            cursor: None,
            pressed: false,
            points: VecDeque::with_capacity(TRAIL_MAX_POINTS),
            particles: VecDeque::with_capacity(TRAIL_MAX_PARTICLES),
            step_accum_ms: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Newest first.
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn particles(&self) -> impl Iterator<Item = &GlyphParticle> {
        self.particles.iter()
    }

    pub fn on_move(&mut self, pos: Vec2) {
        self.cursor = Some(pos);
        self.points.push_front(TrailPoint { pos, opacity: 1.0, size: 1.0 });
        self.points.truncate(TRAIL_MAX_POINTS);

        if self.rng.gen_bool(0.1) {
            let jitter = Vec2::new(self.rng.gen_range(-20.0..20.0), self.rng.gen_range(-20.0..20.0));
            let particle = GlyphParticle {
                pos: pos + jitter,
                velocity: Vec2::new(self.rng.gen_range(-0.5..0.5), self.rng.gen_range(0.5..1.5)),
                glyph: random_glyph(&mut self.rng),
                opacity: 1.0,
            };
            self.particles.push_front(particle);
            self.particles.truncate(TRAIL_MAX_PARTICLES);
        }
    }

    /// Runs the fixed 32 ms fade step as many times as `dt_ms` covers.
    pub fn advance(&mut self, dt_ms: f64) {
        self.step_accum_ms += dt_ms.max(0.0);
        let mut steps = 0;
        while self.step_accum_ms >= TRAIL_STEP_MS {
            self.step_accum_ms -= TRAIL_STEP_MS;
            self.step();
            steps += 1;
            if steps >= 8 {
                self.step_accum_ms = 0.0;
                break;
            }
        }
    }

    pub fn step(&mut self) {
        for (i, p) in self.points.iter_mut().enumerate() {
            p.opacity = (1.0 - i as f32 * 0.15).max(0.0);
            p.size = (1.0 - i as f32 * 0.1).max(0.3);
        }
        self.points.retain(|p| p.opacity > 0.2);

        for p in self.particles.iter_mut() {
            p.pos += p.velocity;
            p.opacity = (p.opacity - 0.08).max(0.0);
            p.velocity = Vec2::new(p.velocity.x * 0.95, p.velocity.y + 0.05);
        }
        self.particles.retain(|p| p.opacity > 0.2);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

pub const CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomLeft,
    Corner::BottomRight,
];

pub const CORNER_BOX_PX: f32 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerGlyph {
    pub corner: Corner,
    pub glyph: char,
    /// Offset inside the corner box, measured from the corner inwards.
    pub offset: Vec2,
    pub opacity: f32,
    pub size_px: f32,
}

impl CornerGlyph {
    /// Absolute position for a viewport of `width` x `height`.
    pub fn position(&self, width: f32, height: f32) -> Vec2 {
        match self.corner {
            Corner::TopLeft => self.offset,
            Corner::TopRight => Vec2::new(width - self.offset.x, self.offset.y),
            Corner::BottomLeft => Vec2::new(self.offset.x, height - self.offset.y),
            Corner::BottomRight => Vec2::new(width - self.offset.x, height - self.offset.y),
        }
    }
}

pub struct MatrixCorners {
    glyphs: Vec<CornerGlyph>,
    regen: TimerSlot,
    rng: StdRng,
}

impl MatrixCorners {
    pub fn new(seed: u64, now_ms: f64) -> Self {
        let mut corners = Self {
            glyphs: Vec::with_capacity(48),
            regen: TimerSlot::idle(),
            rng: StdRng::seed_from_u64(seed),
        };
        corners.regenerate(now_ms);
        corners
    }

    pub fn glyphs(&self) -> &[CornerGlyph] {
        &self.glyphs
    }

    pub fn count_in(&self, corner: Corner) -> usize {
        self.glyphs.iter().filter(|g| g.corner == corner).count()
    }

    /// Returns true when the glyph set was replaced.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.regen.fire(now_ms) {
            self.regenerate(now_ms);
            true
        } else {
            false
        }
    }

    fn regenerate(&mut self, now_ms: f64) {
        self.glyphs.clear();
        for corner in CORNERS {
            let count = self.rng.gen_range(8..=12);
            for _ in 0..count {
                let glyph = CornerGlyph {
                    corner,
                    glyph: random_glyph(&mut self.rng),
                    offset: Vec2::new(
                        self.rng.gen_range(0.0..CORNER_BOX_PX),
                        self.rng.gen_range(0.0..CORNER_BOX_PX),
                    ),
                    opacity: self.rng.gen_range(0.04..0.05),
                    size_px: self.rng.gen_range(10.0..18.0),
                };
                self.glyphs.push(glyph);
            }
        }
        self.regen.schedule(now_ms, CORNER_REGEN_MS);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainDrop {
    pub pos: Vec3,
    pub speed: f32,
}

pub const RAIN_SPREAD: f32 = 50.0;
pub const RAIN_DROP_LENGTH: f32 = 0.7;

pub struct RainField {
    drops: Vec<RainDrop>,
    rng: StdRng,
}

impl RainField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let drops = (0..count)
            .map(|_| RainDrop {
                pos: Vec3::new(
                    rng.gen_range(-RAIN_SPREAD..RAIN_SPREAD),
                    rng.gen_range(20.0..70.0),
                    rng.gen_range(-RAIN_SPREAD..RAIN_SPREAD),
                ),
                speed: rng.gen_range(0.05..0.10),
            })
            .collect();
        Self { drops, rng }
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// One frame of fall. Drops that reach the ground respawn high up.
    pub fn step(&mut self) {
        for d in self.drops.iter_mut() {
            d.pos.y -= d.speed;
            if d.pos.y < 0.0 {
                d.pos = Vec3::new(
                    self.rng.gen_range(-RAIN_SPREAD..RAIN_SPREAD),
                    self.rng.gen_range(30.0..50.0),
                    self.rng.gen_range(-RAIN_SPREAD..RAIN_SPREAD),
                );
            }
        }
    }

    /// Drops as vertical segments (top, bottom).
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.drops
            .iter()
            .map(|d| (d.pos + Vec3::Y * RAIN_DROP_LENGTH * 0.5, d.pos - Vec3::Y * RAIN_DROP_LENGTH * 0.5))
    }
}

impl Default for RainField {
    fn default() -> Self {
        Self::new(RAIN_DROP_COUNT, 0x5eed)
    }
}

/// "Scroll to explore" hint, hidden by the first wheel event or a timeout.
#[derive(Clone, Debug)]
pub struct ScrollHint {
    visible: bool,
    timeout: TimerSlot,
}

impl ScrollHint {
    pub fn new(now_ms: f64) -> Self {
        let mut timeout = TimerSlot::idle();
        timeout.schedule(now_ms, SCROLL_HINT_MS);
        Self { visible: true, timeout }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn on_wheel(&mut self) {
        self.visible = false;
        self.timeout.cancel();
    }

    pub fn tick(&mut self, now_ms: f64) {
        if self.timeout.fire(now_ms) {
            self.visible = false;
        }
    }
}

/// Everything the decor canvas draws, gathered for one frame.
pub struct Decor {
    pub trail: CursorTrail,
    pub corners: MatrixCorners,
    pub rain: RainField,
    pub hint: ScrollHint,
}

impl Decor {
    pub fn new(seed: u64, now_ms: f64) -> Self {
        Self {
            trail: CursorTrail::new(seed),
            corners: MatrixCorners::new(seed.wrapping_add(1), now_ms),
            rain: RainField::new(RAIN_DROP_COUNT, seed.wrapping_add(2)),
            hint: ScrollHint::new(now_ms),
        }
    }

    pub fn frame(&mut self, now_ms: f64, dt_ms: f64) {
        self.trail.advance(dt_ms);
        self.rain.step();
        self.corners.tick(now_ms);
        self.hint.tick(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_keeps_newest_six() {
        let mut t = CursorTrail::new(3);
        for i in 0..10 {
            t.on_move(Vec2::new(i as f32, 0.0));
        }
        let xs: Vec<f32> = t.points().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
        assert!(t.particles().count() <= TRAIL_MAX_PARTICLES);
    }

    #[test]
    fn fade_step_drops_old_points() {
        let mut t = CursorTrail::new(3);
        for i in 0..6 {
            t.on_move(Vec2::splat(i as f32));
        }
        t.step();
        // index 5 ends at 0.25, index 6 would be at 0.1
        assert_eq!(t.points().count(), 6);
        assert!(t.points().all(|p| p.size >= 0.3));
    }
}
