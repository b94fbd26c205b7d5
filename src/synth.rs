use image::{GrayImage, Luma};

/// One circle outline for [`circles_test_image`]: centre and radius in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleSpec {
    pub cx: i32,
    pub cy: i32,
    pub r: i32,
}

impl std::str::FromStr for CircleSpec {
    type Err = String;

    /// Parses `cx,cy,r`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [cx, cy, r] = parts.as_slice() else {
            return Err(format!("expected cx,cy,r but got {s:?}"));
        };
        let parse = |v: &str| v.parse::<i32>().map_err(|e| format!("{v:?}: {e}"));
        Ok(Self {
            cx: parse(*cx)?,
            cy: parse(*cy)?,
            r: parse(*r)?,
        })
    }
}

impl std::fmt::Display for CircleSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.cx, self.cy, self.r)
    }
}

pub const DEFAULT_CIRCLES: [CircleSpec; 3] = [
    CircleSpec { cx: 150, cy: 120, r: 40 },
    CircleSpec { cx: 330, cy: 200, r: 60 },
    CircleSpec { cx: 200, cy: 300, r: 25 },
];

/// Paints every pixel whose distance `d` from `(cx, cy)` satisfies
/// `r - thickness < d <= r`: the outline grows inwards from the radius.
pub fn draw_ring(img: &mut GrayImage, cx: f32, cy: f32, r: f32, thickness: f32, value: u8) {
    let (inner, outer) = ((r - thickness.max(1.0)).max(0.0), r.max(0.0));
    let (width, height) = img.dimensions();

    let x0 = (cx - outer).floor().max(0.0) as u32;
    let y0 = (cy - outer).floor().max(0.0) as u32;
    let x1 = (((cx + outer).floor() + 1.0).max(0.0) as u32).min(width);
    let y1 = (((cy + outer).floor() + 1.0).max(0.0) as u32).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let d2 = dx * dx + dy * dy;
            if (d2 > inner * inner || inner == 0.0) && d2 <= outer * outer {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }
}

/// Paints every pixel within `width / 2` of the segment `start`-`end`.
pub fn draw_thick_line(img: &mut GrayImage, start: (f32, f32), end: (f32, f32), width: f32, value: u8) {
    let half = width.max(1.0) / 2.0;
    let (w, h) = img.dimensions();
    let (sx, sy) = start;
    let (ex, ey) = end;
    let (vx, vy) = (ex - sx, ey - sy);
    let len2 = vx * vx + vy * vy;

    let x0 = (sx.min(ex) - half).floor().max(0.0) as u32;
    let y0 = (sy.min(ey) - half).floor().max(0.0) as u32;
    let x1 = ((sx.max(ex) + half).ceil().max(0.0) as u32).min(w);
    let y1 = ((sy.max(ey) + half).ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let (px, py) = (x as f32 - sx, y as f32 - sy);
            let t = if len2 > 0.0 {
                ((px * vx + py * vy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (dx, dy) = (px - t * vx, py - t * vy);
            if dx * dx + dy * dy <= half * half {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }
}

/// White canvas with four black two-pixel lines: near-horizontal, diagonal,
/// vertical through the middle and horizontal through the middle.
pub fn lines_test_image(width: u32, height: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([255]));
    let (w, h) = (width as f32, height as f32);
    let segments = [
        ((20.0, 20.0), (w - 20.0, 40.0)),
        ((30.0, h - 30.0), (w - 30.0, 60.0)),
        (((width / 2) as f32, 0.0), ((width / 2) as f32, h)),
        ((0.0, (height / 2) as f32), (w, (height / 2) as f32)),
    ];
    for (start, end) in segments {
        draw_thick_line(&mut img, start, end, 2.0, 0);
    }
    img
}

/// Background `bg` with black circle outlines of the given stroke thickness.
pub fn circles_test_image(width: u32, height: u32, bg: u8, thickness: u32, circles: &[CircleSpec]) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([bg]));
    for c in circles {
        draw_ring(&mut img, c.cx as f32, c.cy as f32, c.r as f32, thickness as f32, 0);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_circle_specs() {
        let c: CircleSpec = "330, 200,60".parse().unwrap();
        assert_eq!(c, CircleSpec { cx: 330, cy: 200, r: 60 });
        assert!("1,2".parse::<CircleSpec>().is_err());
        assert!("a,2,3".parse::<CircleSpec>().is_err());
    }

    #[test]
    fn ring_covers_the_radius_but_not_the_centre() {
        let img = circles_test_image(100, 100, 255, 3, &[CircleSpec { cx: 50, cy: 50, r: 20 }]);
        // Stroke covers distances 18, 19 and 20 from the centre.
        for x in [68, 69, 70] {
            assert_eq!(img.get_pixel(x, 50)[0], 0, "x = {x}");
        }
        assert_eq!(img.get_pixel(50, 30)[0], 0);
        assert_eq!(img.get_pixel(67, 50)[0], 255);
        assert_eq!(img.get_pixel(71, 50)[0], 255);
        assert_eq!(img.get_pixel(50, 29)[0], 255);
        assert_eq!(img.get_pixel(50, 50)[0], 255);
    }

    #[test]
    fn lines_image_has_the_middle_cross() {
        let img = lines_test_image(400, 300);
        assert_eq!(img.get_pixel(200, 10)[0], 0);
        assert_eq!(img.get_pixel(5, 150)[0], 0);
        assert_eq!(img.get_pixel(5, 5)[0], 255);
    }

    #[test]
    fn ring_clipped_by_the_border_does_not_panic() {
        let img = circles_test_image(30, 30, 200, 3, &[CircleSpec { cx: 0, cy: 0, r: 40 }]);
        assert_eq!(img.get_pixel(15, 15)[0], 200);
    }
}
