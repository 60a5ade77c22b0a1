use crate::scene::{
    Body, SceneState, Star, BODIES, MIN_BODY_RADIUS, MIN_SCALE, ORBIT_SCALE, PADDING, SUN_RADIUS,
};
use rand::{rngs::StdRng, Rng};
use std::f32::consts::TAU;

/// Unscaled side length of the square diagram that holds the largest orbit
/// plus the sun and a margin.
pub(crate) fn required_size() -> f32 {
    let max_orbit = BODIES.iter().fold(0.0f32, |m, b| m.max(b.orbit));
    (max_orbit * ORBIT_SCALE + SUN_RADIUS + PADDING) * 2.0
}

/// Uniform scale fitting the diagram into the viewport. Never upscales past
/// 1.0; floored at MIN_SCALE so a zero-area viewport cannot produce zero or
/// NaN downstream.
pub(crate) fn fit_scale(view_w: f32, view_h: f32) -> f32 {
    let req = required_size();
    let s = (view_w / req).min(view_h / req).min(1.0);
    if s.is_finite() {
        s.max(MIN_SCALE)
    } else {
        MIN_SCALE
    }
}

/// Rebuild the whole scene for a viewport size: scale, surface dims, center,
/// body runtime state (fresh random angles), starfield. Called once at
/// startup and again on every resize; nothing survives from the old layout.
pub(crate) fn rebuild(
    scene: &mut SceneState,
    view_w: f32,
    view_h: f32,
    star_count: usize,
    rng: &mut StdRng,
) {
    let req = required_size();
    let scale = fit_scale(view_w, view_h);

    // The surface never exceeds what the scaled diagram actually needs.
    let surf_w = view_w.min(req * scale).max(0.0);
    let surf_h = view_h.min(req * scale).max(0.0);

    scene.view_w = view_w.max(0.0);
    scene.view_h = view_h.max(0.0);
    scene.surf_w = surf_w;
    scene.surf_h = surf_h;
    scene.cx = surf_w * 0.5;
    scene.cy = surf_h * 0.5;
    scene.scale = scale;

    scene.bodies.clear();
    for spec in BODIES.iter() {
        scene.bodies.push(Body {
            spec,
            angle: rng.gen_range(0.0..TAU),
            orbit_r: spec.orbit * ORBIT_SCALE * scale,
            display_r: (spec.radius * scale.sqrt()).max(MIN_BODY_RADIUS),
        });
    }

    scene.stars.clear();
    if surf_w >= 1.0 && surf_h >= 1.0 {
        for _ in 0..star_count {
            scene.stars.push(Star {
                x: rng.gen_range(0.0..surf_w),
                y: rng.gen_range(0.0..surf_h),
                size: rng.gen_range(0.5..1.5),
                alpha: rng.gen_range(0.3..1.0),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SUN_FLOOR;
    use rand::SeedableRng;

    fn build(w: f32, h: f32, seed: u64) -> SceneState {
        let mut scene = SceneState::empty();
        let mut rng = StdRng::seed_from_u64(seed);
        rebuild(&mut scene, w, h, 200, &mut rng);
        scene
    }

    #[test]
    fn required_size_matches_descriptor_table() {
        // (600 * 1.3 + 25 + 60) * 2
        assert!((required_size() - 1730.0).abs() < 1e-3);
    }

    #[test]
    fn scenario_1200_by_800() {
        let s = build(1200.0, 800.0, 7);
        assert!((s.scale - 800.0 / 1730.0).abs() < 1e-4, "scale {}", s.scale);
        // height-bound: surface collapses to ~800x800
        assert!((s.surf_w - 800.0).abs() < 0.5);
        assert!((s.surf_h - 800.0).abs() < 0.5);
        let earth = &s.bodies[2];
        assert_eq!(earth.spec.name, "Earth");
        let expect = 105.0 * ORBIT_SCALE * s.scale;
        assert!((earth.orbit_r - expect).abs() < 1e-3);
        assert!((earth.orbit_r - 63.12).abs() < 0.1, "orbit {}", earth.orbit_r);
    }

    #[test]
    fn scale_bounds_and_radius_floors() {
        for (w, h) in [(1.0, 1.0), (80.0, 24.0), (400.0, 3000.0), (9000.0, 9000.0)] {
            let s = build(w, h, 1);
            assert!(s.scale > 0.0 && s.scale <= 1.0, "scale {} for {}x{}", s.scale, w, h);
            for b in &s.bodies {
                assert!(b.display_r >= MIN_BODY_RADIUS);
            }
            assert!(s.sun_display_radius() >= SUN_RADIUS * SUN_FLOOR - 1e-6);
        }
    }

    #[test]
    fn never_upscales_past_natural_size() {
        let s = build(9000.0, 9000.0, 1);
        assert!((s.scale - 1.0).abs() < 1e-6);
        assert!((s.surf_w - required_size()).abs() < 1e-3);
    }

    #[test]
    fn zero_viewport_floors_scale_without_panicking() {
        let s = build(0.0, 0.0, 3);
        assert_eq!(s.scale, MIN_SCALE);
        assert!(s.stars.is_empty());
        assert_eq!(s.bodies.len(), BODIES.len());
        for b in &s.bodies {
            assert!(b.orbit_r.is_finite() && b.display_r >= MIN_BODY_RADIUS);
        }
    }

    #[test]
    fn stars_stay_inside_surface() {
        let s = build(640.0, 480.0, 11);
        assert_eq!(s.stars.len(), 200);
        for st in &s.stars {
            assert!(st.x >= 0.0 && st.x < s.surf_w);
            assert!(st.y >= 0.0 && st.y < s.surf_h);
            assert!((0.5f32..1.5).contains(&st.size));
            assert!((0.3f32..1.0).contains(&st.alpha));
        }
    }

    #[test]
    fn rebuild_is_deterministic_for_fixed_seed() {
        let a = build(1200.0, 800.0, 42);
        let b = build(1200.0, 800.0, 42);
        assert_eq!(a.scale, b.scale);
        for (x, y) in a.bodies.iter().zip(&b.bodies) {
            assert_eq!(x.angle, y.angle);
        }
        for (x, y) in a.stars.iter().zip(&b.stars) {
            assert_eq!((x.x, x.y), (y.x, y.y));
        }
    }

    #[test]
    fn resize_round_trip_reproduces_geometry() {
        // scale and surface dims are pure functions of viewport size; star
        // positions are re-randomized by design and not compared.
        let mut scene = SceneState::empty();
        let mut rng = StdRng::seed_from_u64(5);
        rebuild(&mut scene, 1200.0, 800.0, 200, &mut rng);
        let (scale0, sw0, sh0, cx0) = (scene.scale, scene.surf_w, scene.surf_h, scene.cx);
        rebuild(&mut scene, 300.0, 200.0, 200, &mut rng);
        assert!(scene.scale < scale0);
        rebuild(&mut scene, 1200.0, 800.0, 200, &mut rng);
        assert_eq!(scene.scale, scale0);
        assert_eq!((scene.surf_w, scene.surf_h), (sw0, sh0));
        assert_eq!(scene.cx, cx0);
    }
}
