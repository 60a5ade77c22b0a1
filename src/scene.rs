use std::f32::consts::TAU;

// Layout-unit constants. Orbits in the descriptor table are design units;
// ORBIT_SCALE spreads them out and the fit math in layout.rs maps them to
// surface pixels.
pub(crate) const ORBIT_SCALE: f32 = 1.3;
pub(crate) const SUN_RADIUS: f32 = 25.0;
pub(crate) const PADDING: f32 = 60.0;
pub(crate) const MIN_SCALE: f32 = 1e-3;
pub(crate) const MIN_BODY_RADIUS: f32 = 1.5;
pub(crate) const SUN_FLOOR: f32 = 0.6;

// Radians per tick for a speed factor of 1.0 (Earth).
pub(crate) const BASE_ORBIT_SPEED: f32 = 0.008;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

pub(crate) const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct BodySpec {
    pub(crate) name: &'static str,
    pub(crate) color: Rgb,
    pub(crate) highlight: Rgb,
    pub(crate) radius: f32,
    pub(crate) orbit: f32,
    pub(crate) speed: f32,
    pub(crate) ring: Option<Rgb>,
}

// Ordered by orbit radius so nearer bodies draw first.
pub(crate) static BODIES: [BodySpec; 8] = [
    BodySpec {
        name: "Mercury",
        color: rgb(169, 132, 102),
        highlight: rgb(214, 188, 160),
        radius: 4.0,
        orbit: 50.0,
        speed: 4.15,
        ring: None,
    },
    BodySpec {
        name: "Venus",
        color: rgb(219, 168, 98),
        highlight: rgb(245, 220, 160),
        radius: 7.0,
        orbit: 75.0,
        speed: 1.62,
        ring: None,
    },
    BodySpec {
        name: "Earth",
        color: rgb(58, 130, 215),
        highlight: rgb(140, 200, 255),
        radius: 7.5,
        orbit: 105.0,
        speed: 1.0,
        ring: None,
    },
    BodySpec {
        name: "Mars",
        color: rgb(205, 92, 55),
        highlight: rgb(240, 150, 100),
        radius: 5.0,
        orbit: 140.0,
        speed: 0.53,
        ring: None,
    },
    BodySpec {
        name: "Jupiter",
        color: rgb(216, 169, 122),
        highlight: rgb(240, 210, 170),
        radius: 20.0,
        orbit: 230.0,
        speed: 0.084,
        ring: None,
    },
    BodySpec {
        name: "Saturn",
        color: rgb(226, 195, 134),
        highlight: rgb(250, 230, 180),
        radius: 17.0,
        orbit: 330.0,
        speed: 0.034,
        ring: Some(rgb(210, 180, 140)),
    },
    BodySpec {
        name: "Uranus",
        color: rgb(146, 212, 224),
        highlight: rgb(200, 240, 245),
        radius: 12.0,
        orbit: 460.0,
        speed: 0.012,
        ring: None,
    },
    BodySpec {
        name: "Neptune",
        color: rgb(75, 112, 221),
        highlight: rgb(140, 170, 245),
        radius: 11.0,
        orbit: 600.0,
        speed: 0.006,
        ring: None,
    },
];

#[derive(Clone, Copy, Debug)]
pub(crate) struct Body {
    pub(crate) spec: &'static BodySpec,
    pub(crate) angle: f32,
    pub(crate) orbit_r: f32,
    pub(crate) display_r: f32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Star {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) size: f32,
    pub(crate) alpha: f32,
}

/// Everything the renderer reads, rebuilt in place on every resize.
/// Dimensions are braille subpixels (2 wide, 4 tall per terminal cell).
#[derive(Clone, Debug)]
pub(crate) struct SceneState {
    pub(crate) view_w: f32,
    pub(crate) view_h: f32,
    pub(crate) surf_w: f32,
    pub(crate) surf_h: f32,
    pub(crate) cx: f32,
    pub(crate) cy: f32,
    pub(crate) scale: f32,
    pub(crate) bodies: Vec<Body>,
    pub(crate) stars: Vec<Star>,
}

impl SceneState {
    pub(crate) fn empty() -> Self {
        Self {
            view_w: 0.0,
            view_h: 0.0,
            surf_w: 0.0,
            surf_h: 0.0,
            cx: 0.0,
            cy: 0.0,
            scale: MIN_SCALE,
            bodies: Vec::new(),
            stars: Vec::new(),
        }
    }

    /// Advance every body by one tick, keeping angles in [0, 2π).
    pub(crate) fn tick(&mut self) {
        for b in &mut self.bodies {
            b.angle += BASE_ORBIT_SPEED * b.spec.speed;
            if b.angle >= TAU {
                b.angle -= TAU;
            }
        }
    }

    pub(crate) fn body_position(&self, b: &Body) -> (f32, f32) {
        (
            self.cx + b.orbit_r * b.angle.cos(),
            self.cy + b.orbit_r * b.angle.sin(),
        )
    }

    pub(crate) fn sun_display_radius(&self) -> f32 {
        SUN_RADIUS * self.scale.sqrt().max(SUN_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_body(angle: f32) -> SceneState {
        let mut s = SceneState::empty();
        s.bodies.push(Body {
            spec: &BODIES[2], // Earth, speed 1.0
            angle,
            orbit_r: 100.0,
            display_r: 5.0,
        });
        s
    }

    #[test]
    fn descriptor_order_is_ascending_orbit() {
        for pair in BODIES.windows(2) {
            assert!(pair[0].orbit < pair[1].orbit);
        }
    }

    #[test]
    fn tick_wraparound_law() {
        // angle after N ticks == (a0 + N * step) mod 2π
        let a0 = 1.234f32;
        let mut s = one_body(a0);
        let n = 5000;
        for _ in 0..n {
            s.tick();
        }
        let step = BASE_ORBIT_SPEED * s.bodies[0].spec.speed;
        let expect = (a0 + n as f32 * step).rem_euclid(TAU);
        let got = s.bodies[0].angle;
        assert!(
            (got - expect).abs() < 1e-3 || (TAU - (got - expect).abs()) < 1e-3,
            "got {} expect {}",
            got,
            expect
        );
    }

    #[test]
    fn tick_keeps_angle_bounded() {
        let mut s = one_body(0.0);
        for _ in 0..100_000 {
            s.tick();
            let a = s.bodies[0].angle;
            assert!((0.0..TAU).contains(&a), "angle escaped: {}", a);
        }
    }

    #[test]
    fn body_position_on_orbit_circle() {
        let mut s = one_body(0.0);
        s.cx = 40.0;
        s.cy = 30.0;
        for a in [0.0f32, 0.7, 2.4, 5.9] {
            s.bodies[0].angle = a;
            let (x, y) = s.body_position(&s.bodies[0]);
            let d = ((x - s.cx).powi(2) + (y - s.cy).powi(2)).sqrt();
            assert!((d - s.bodies[0].orbit_r).abs() < 1e-3);
        }
    }

    #[test]
    fn sun_radius_never_below_floor() {
        let mut s = SceneState::empty();
        s.scale = MIN_SCALE;
        assert!(s.sun_display_radius() >= SUN_RADIUS * SUN_FLOOR - 1e-6);
        s.scale = 1.0;
        assert!((s.sun_display_radius() - SUN_RADIUS).abs() < 1e-6);
    }
}
