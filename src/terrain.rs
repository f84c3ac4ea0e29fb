/// Static level geometry and the ground-collision query.
///
/// The world is a flat floor plus a handful of one-way platform tops.
/// Moving platforms are owned by the obstacle manager; their current
/// bounds are passed in per query so riders resolve against them too.

use crate::math::Rect;

pub struct Terrain {
    /// Y coordinate of the floor surface.
    pub floor_y: f32,
    /// Static platforms; only their top edge is solid (one-way).
    pub platforms: Vec<Rect>,
    pub width: f32,
}

impl Terrain {
    pub fn new(width: f32, floor_y: f32) -> Self {
        Self {
            floor_y,
            platforms: Vec::new(),
            width,
        }
    }

    pub fn add_platform(&mut self, rect: Rect) {
        self.platforms.push(rect);
    }

    /// Returns the y of the highest support surface directly under `bounds`,
    /// considering the floor, static platforms, and any extra support rects
    /// (moving platforms). One-way: a platform only supports a body whose
    /// bottom edge is at or above its top within `tolerance`.
    pub fn support_below(&self, bounds: &Rect, extra: &[Rect], tolerance: f32) -> Option<f32> {
        let mut best: Option<f32> = None;
        let bottom = bounds.bottom();

        if bottom >= self.floor_y - tolerance {
            best = Some(self.floor_y);
        }

        for p in self.platforms.iter().chain(extra.iter()) {
            let overlaps_x = bounds.right() > p.left() && bounds.left() < p.right();
            let on_top = bottom >= p.top() - tolerance && bottom <= p.top() + tolerance;
            if overlaps_x && on_top {
                best = Some(match best {
                    Some(y) => y.min(p.top()),
                    None => p.top(),
                });
            }
        }
        best
    }

    /// True when `bounds` presses against the world's side walls.
    pub fn touching_wall(&self, bounds: &Rect) -> bool {
        bounds.left() <= 0.0 || bounds.right() >= self.width
    }

    /// Clamps a centre x so the body stays inside the world.
    pub fn clamp_x(&self, x: f32, half_w: f32) -> f32 {
        x.clamp(half_w, self.width - half_w)
    }
}
