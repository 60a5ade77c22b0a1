use crate::render::{Pixel, PixelCanvas};
use crate::scene::{Rgb, SceneState};
use std::f32::consts::PI;

// Ring ellipse: fixed screen tilt, radii relative to the body disc.
const RING_TILT: f32 = PI / 10.0;
const RING_RX: f32 = 2.0;
const RING_RY: f32 = 0.8;

const ORBIT_GUIDE: Rgb = Rgb {
    r: 150,
    g: 155,
    b: 170,
};
const ORBIT_GUIDE_ALPHA: f32 = 0.28;

const SUN_CORE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 230,
};
const SUN_MID: Rgb = Rgb {
    r: 255,
    g: 200,
    b: 90,
};
const SUN_EDGE: Rgb = Rgb {
    r: 250,
    g: 140,
    b: 40,
};
const SUN_GLOW: Rgb = Rgb {
    r: 255,
    g: 180,
    b: 80,
};

const NIGHT: Rgb = Rgb { r: 8, g: 10, b: 14 };

fn clamp01(x: f32) -> f32 {
    x.max(0.0).min(1.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    lerp(a as f32, b as f32, t).clamp(0.0, 255.0).round() as u8
}

pub(crate) fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = clamp01(t);
    Rgb {
        r: lerp_u8(a.r, b.r, t),
        g: lerp_u8(a.g, b.g, t),
        b: lerp_u8(a.b, b.b, t),
    }
}

fn pixel(c: Rgb, alpha: f32) -> Pixel {
    Pixel {
        r: c.r,
        g: c.g,
        b: c.b,
        a: (clamp01(alpha) * 255.0 + 0.5) as u8,
    }
}

/// Body-disc radial gradient sampled at normalized distance `t` from the
/// hotspot: highlight at the inner stop, base color at 70%, darkened
/// semi-transparent edge at the outer stop. Returns color and alpha.
pub(crate) fn gradient_stop(highlight: Rgb, base: Rgb, t: f32) -> (Rgb, f32) {
    let t = clamp01(t);
    if t < 0.7 {
        (mix_rgb(highlight, base, t / 0.7), 1.0)
    } else {
        let u = (t - 0.7) / 0.3;
        (mix_rgb(base, NIGHT, u * 0.85), 1.0 - 0.5 * u)
    }
}

/// Filled dot with antialiased rim. Stars and other tiny marks.
pub(crate) fn fill_dot(canvas: &mut PixelCanvas, cx: f32, cy: f32, r: f32, c: Rgb, alpha: f32) {
    let span = r.ceil() as i32 + 1;
    let x0 = cx.floor() as i32;
    let y0 = cy.floor() as i32;
    for y in (y0 - span)..=(y0 + span) {
        for x in (x0 - span)..=(x0 + span) {
            let dx = (x as f32 + 0.5) - cx;
            let dy = (y as f32 + 0.5) - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let cov = clamp01(r - d + 0.5);
            if cov > 0.0 {
                canvas.blend_over(x, y, pixel(c, alpha * cov));
            }
        }
    }
}

/// Hairline circle outline, used for orbit guides.
pub(crate) fn stroke_circle(
    canvas: &mut PixelCanvas,
    cx: f32,
    cy: f32,
    r: f32,
    width: f32,
    c: Rgb,
    alpha: f32,
) {
    let span = (r + width).ceil() as i32 + 1;
    let x0 = cx.floor() as i32;
    let y0 = cy.floor() as i32;
    let half = width * 0.5;
    for y in (y0 - span)..=(y0 + span) {
        for x in (x0 - span)..=(x0 + span) {
            let dx = (x as f32 + 0.5) - cx;
            let dy = (y as f32 + 0.5) - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let cov = clamp01(half + 0.5 - (d - r).abs());
            if cov > 0.0 {
                canvas.blend_over(x, y, pixel(c, alpha * cov));
            }
        }
    }
}

/// Tilted ellipse outline. Distance to the edge uses the first-order
/// approximation |f| / |grad f| of the implicit ellipse equation, which is
/// accurate at stroke widths of a few pixels.
pub(crate) fn stroke_ellipse(
    canvas: &mut PixelCanvas,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    tilt: f32,
    width: f32,
    c: Rgb,
    alpha: f32,
) {
    let span = (rx.max(ry) + width).ceil() as i32 + 1;
    let x0 = cx.floor() as i32;
    let y0 = cy.floor() as i32;
    let (ts, tc) = tilt.sin_cos();
    let half = width * 0.5;
    for y in (y0 - span)..=(y0 + span) {
        for x in (x0 - span)..=(x0 + span) {
            let dx = (x as f32 + 0.5) - cx;
            let dy = (y as f32 + 0.5) - cy;
            // into ellipse-local axes
            let ex = tc * dx + ts * dy;
            let ey = -ts * dx + tc * dy;
            let f = (ex / rx).powi(2) + (ey / ry).powi(2) - 1.0;
            let grad =
                2.0 * ((ex / (rx * rx)).powi(2) + (ey / (ry * ry)).powi(2)).sqrt();
            let d_edge = f.abs() / grad.max(1e-6);
            let cov = clamp01(half + 0.5 - d_edge);
            if cov > 0.0 {
                canvas.blend_over(x, y, pixel(c, alpha * cov));
            }
        }
    }
}

/// Planet disc: radial gradient whose hotspot sits 0.4 radii along the
/// outward unit vector from the scene center.
pub(crate) fn gradient_disc(
    canvas: &mut PixelCanvas,
    cx: f32,
    cy: f32,
    r: f32,
    out_x: f32,
    out_y: f32,
    highlight: Rgb,
    base: Rgb,
) {
    let hx = cx + out_x * 0.4 * r;
    let hy = cy + out_y * 0.4 * r;
    // hotspot to far rim
    let gr = (r * 1.4).max(1e-3);

    let span = r.ceil() as i32 + 1;
    let x0 = cx.floor() as i32;
    let y0 = cy.floor() as i32;
    for y in (y0 - span)..=(y0 + span) {
        for x in (x0 - span)..=(x0 + span) {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let dx = px - cx;
            let dy = py - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let cov = clamp01(r - d + 0.5);
            if cov <= 0.0 {
                continue;
            }
            let hd = ((px - hx).powi(2) + (py - hy).powi(2)).sqrt();
            let (col, a) = gradient_stop(highlight, base, hd / gr);
            canvas.blend_over(x, y, pixel(col, a * cov));
        }
    }
}

/// Sun disc (bright core, warm mid, dimmer edge) plus a soft halo whose
/// extent scales with the display radius.
pub(crate) fn draw_sun(canvas: &mut PixelCanvas, cx: f32, cy: f32, r: f32) {
    let halo = r * 0.6;
    let span = (r + halo).ceil() as i32 + 1;
    let x0 = cx.floor() as i32;
    let y0 = cy.floor() as i32;
    for y in (y0 - span)..=(y0 + span) {
        for x in (x0 - span)..=(x0 + span) {
            let dx = (x as f32 + 0.5) - cx;
            let dy = (y as f32 + 0.5) - cy;
            let d = (dx * dx + dy * dy).sqrt();
            if d <= r {
                let t = clamp01(d / r.max(1e-3));
                let col = if t < 0.55 {
                    mix_rgb(SUN_CORE, SUN_MID, t / 0.55)
                } else {
                    mix_rgb(SUN_MID, SUN_EDGE, (t - 0.55) / 0.45)
                };
                canvas.blend_over(x, y, pixel(col, 1.0));
            } else if d <= r + halo {
                let t = 1.0 - (d - r) / halo.max(1e-3);
                let a = t * t * 0.45;
                if a > 0.01 {
                    canvas.blend_over(x, y, pixel(SUN_GLOW, a));
                }
            }
        }
    }
}

/// One full frame: clear, stars, sun, then each body in descriptor order
/// (orbit guide, ring when present, disc). Surface coordinates are offset so
/// the surface sits centered inside the viewport canvas.
pub(crate) fn draw_scene(canvas: &mut PixelCanvas, scene: &SceneState) {
    canvas.clear();

    let ox = (scene.view_w - scene.surf_w) * 0.5;
    let oy = (scene.view_h - scene.surf_h) * 0.5;
    let cx = scene.cx + ox;
    let cy = scene.cy + oy;

    for st in &scene.stars {
        fill_dot(
            canvas,
            st.x + ox,
            st.y + oy,
            st.size,
            Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
            st.alpha,
        );
    }

    draw_sun(canvas, cx, cy, scene.sun_display_radius());

    for b in &scene.bodies {
        stroke_circle(canvas, cx, cy, b.orbit_r, 1.0, ORBIT_GUIDE, ORBIT_GUIDE_ALPHA);

        let (bx, by) = scene.body_position(b);
        let bx = bx + ox;
        let by = by + oy;

        if let Some(ring) = b.spec.ring {
            let width = (b.display_r * 0.3).max(1.0);
            stroke_ellipse(
                canvas,
                bx,
                by,
                b.display_r * RING_RX,
                b.display_r * RING_RY,
                RING_TILT,
                width,
                ring,
                0.8,
            );
        }

        // outward unit vector from scene center; degenerate at the exact
        // center, where any direction will do
        let dx = bx - cx;
        let dy = by - cy;
        let len = (dx * dx + dy * dy).sqrt().max(1e-6);
        gradient_disc(
            canvas,
            bx,
            by,
            b.display_r,
            dx / len,
            dy / len,
            b.spec.highlight,
            b.spec.color,
        );
    }
}
