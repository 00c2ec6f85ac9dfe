//! Geometry of an area-proportional two-circle Venn diagram.
//!
//! Circle 1 is centred on the origin, circle 2 on `(distance, 0)`.
//! Units are arbitrary; the larger set always has unit area.

use std::f64::consts::PI;

/// Area given to an empty set so its circle can still be placed.
const PLACEHOLDER_AREA: f64 = 0.01;

/// Gap between disjoint circles, relative to the larger radius.
const DISJOINT_GAP: f64 = 0.1;

const BISECTION_STEPS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VennLayout {
    pub r1: f64,
    pub r2: f64,
    pub distance: f64,
}

/// Anchor points for the three region labels, in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionAnchors {
    pub only1: (f64, f64),
    pub only2: (f64, f64),
    pub both: (f64, f64),
}

/// Area of the intersection of two circles whose centres are `d` apart.
pub fn lens_area(r1: f64, r2: f64, d: f64) -> f64 {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        let r = r1.min(r2);
        return PI * r * r;
    }

    let a1 = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0).acos();
    let a2 = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0).acos();
    let k = ((-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2)).max(0.0);

    r1 * r1 * a1 + r2 * r2 * a2 - 0.5 * k.sqrt()
}

fn radius(area: f64) -> f64 {
    (area / PI).sqrt()
}

impl VennLayout {
    /// Places two circles so their areas and their intersection are
    /// proportional to the given region counts.
    pub fn solve(unique1: u64, unique2: u64, overlap: u64) -> VennLayout {
        // Summed as floats, counts near u64::MAX would overflow otherwise
        let set1 = unique1 as f64 + overlap as f64;
        let set2 = unique2 as f64 + overlap as f64;
        let largest = set1.max(set2);

        // Nothing to size by, draw two equal disjoint circles
        if largest == 0.0 {
            let r = radius(1.0);
            return VennLayout { r1: r, r2: r, distance: 2.0 * r + DISJOINT_GAP * r };
        }

        // Only an empty set is padded, a small one keeps its true area
        let area1 = if set1 == 0.0 { PLACEHOLDER_AREA } else { set1 / largest };
        let area2 = if set2 == 0.0 { PLACEHOLDER_AREA } else { set2 / largest };
        let target = overlap as f64 / largest;

        let r1 = radius(area1);
        let r2 = radius(area2);

        let distance = if overlap == 0 {
            r1 + r2 + DISJOINT_GAP * r1.max(r2)
        } else if target >= area1.min(area2) {
            (r1 - r2).abs()
        } else {
            // Lens area shrinks monotonically as the circles move apart
            let (mut lo, mut hi) = ((r1 - r2).abs(), r1 + r2);
            for _ in 0..BISECTION_STEPS {
                let mid = (lo + hi) / 2.0;
                if lens_area(r1, r2, mid) > target {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            (lo + hi) / 2.0
        };

        VennLayout { r1, r2, distance }
    }

    pub fn centres(&self) -> [(f64, f64); 2] {
        [(0.0, 0.0), (self.distance, 0.0)]
    }

    /// Bounding box as `(x_min, x_max, y_min, y_max)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let r = self.r1.max(self.r2);
        (
            (-self.r1).min(self.distance - self.r2),
            self.r1.max(self.distance + self.r2),
            -r,
            r,
        )
    }

    pub fn is_disjoint(&self) -> bool {
        self.distance >= self.r1 + self.r2
    }

    pub fn is_nested(&self) -> bool {
        self.distance <= (self.r1 - self.r2).abs()
    }

    pub fn intersection_area(&self) -> f64 {
        lens_area(self.r1, self.r2, self.distance)
    }

    pub fn anchors(&self) -> RegionAnchors {
        let d = self.distance;
        let left2 = d - self.r2;
        let right1 = self.r1;

        RegionAnchors {
            only1: ((-self.r1 + left2.min(right1)) / 2.0, 0.0),
            only2: ((right1.max(left2) + d + self.r2) / 2.0, 0.0),
            both: ((left2.max(-self.r1) + right1.min(d + self.r2)) / 2.0, 0.0),
        }
    }

    /// Outline of the intersection as a closed polygon with roughly `steps`
    /// points per arc. None when the circles do not meet.
    pub fn lens_outline(&self, steps: usize) -> Option<Vec<(f64, f64)>> {
        if self.is_disjoint() {
            return None;
        }

        let steps = steps.max(2);
        let d = self.distance;

        if self.is_nested() {
            let (cx, r) = if self.r1 <= self.r2 { (0.0, self.r1) } else { (d, self.r2) };
            return Some(arc((cx, 0.0), r, 0.0, 2.0 * PI, 2 * steps));
        }

        let a = (d * d + self.r1 * self.r1 - self.r2 * self.r2) / (2.0 * d);
        let h = (self.r1 * self.r1 - a * a).max(0.0).sqrt();
        let t1 = h.atan2(a);
        let t2 = h.atan2(d - a);

        // Bottom to top along circle 1, then top to bottom along circle 2
        let mut outline = arc((0.0, 0.0), self.r1, -t1, t1, steps);
        outline.extend(arc((d, 0.0), self.r2, PI - t2, PI + t2, steps));
        Some(outline)
    }
}

fn arc(centre: (f64, f64), r: f64, from: f64, to: f64, steps: usize) -> Vec<(f64, f64)> {
    (0..=steps)
        .map(|i| from + (to - from) * i as f64 / steps as f64)
        .map(|t| (centre.0 + r * t.cos(), centre.1 + r * t.sin()))
        .collect()
}
