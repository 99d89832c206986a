//! Symmetric placement for top-level entities (galaxies).
//!
//! A small pattern library keyed by entity count. Every pattern keeps the
//! minimum centre-to-centre distance at or above the requested spacing.
//! Points lie in the XZ plane (`y = 0`) and are assigned in input order.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Largest count placed on a single ring before switching to a grid.
pub const MAX_RING_COUNT: usize = 12;

/// Placement pattern chosen for a given entity count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Empty,
    Single,
    MirroredPair,
    Triangle,
    Diamond,
    /// One at the centre, four around it.
    CenteredDiamond,
    Ring,
    Grid,
}

impl Pattern {
    pub fn for_count(count: usize) -> Pattern {
        match count {
            0 => Pattern::Empty,
            1 => Pattern::Single,
            2 => Pattern::MirroredPair,
            3 => Pattern::Triangle,
            4 => Pattern::Diamond,
            5 => Pattern::CenteredDiamond,
            n if n <= MAX_RING_COUNT => Pattern::Ring,
            _ => Pattern::Grid,
        }
    }

    /// Unassigned points for `count` entities at `spacing`.
    pub fn points(self, count: usize, spacing: f32) -> Vec<Vec3> {
        let s = spacing;
        match self {
            Pattern::Empty => Vec::new(),
            Pattern::Single => vec![Vec3::ZERO],
            Pattern::MirroredPair => vec![Vec3::new(-s / 2.0, 0.0, 0.0), Vec3::new(s / 2.0, 0.0, 0.0)],
            // Equilateral triangle with side s.
            Pattern::Triangle => ring(3, s / 3f32.sqrt()),
            // Square rotated 45°, side s.
            Pattern::Diamond => ring(4, s / 2f32.sqrt()),
            Pattern::CenteredDiamond => {
                let mut points = vec![Vec3::ZERO];
                points.extend(ring(4, s));
                points
            }
            // Chord between neighbours equals s.
            Pattern::Ring => ring(count, s / (2.0 * (PI / count as f32).sin())),
            Pattern::Grid => grid(count, s),
        }
    }
}

/// `count` points evenly around a circle, first point on +Z.
fn ring(count: usize, radius: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            Vec3::new(angle.sin() * radius, 0.0, angle.cos() * radius)
        })
        .collect()
}

/// Row-major square-ish grid with pitch `spacing`, centred on the origin.
fn grid(count: usize, spacing: f32) -> Vec<Vec3> {
    let cols = (count as f32).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let x0 = -(cols as f32 - 1.0) * spacing / 2.0;
    let z0 = -(rows as f32 - 1.0) * spacing / 2.0;
    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            Vec3::new(x0 + col as f32 * spacing, 0.0, z0 + row as f32 * spacing)
        })
        .collect()
}

/// Entity id → position for one sibling set. Iteration follows input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutAssignment {
    order: Vec<String>,
    positions: HashMap<String, Vec3>,
    pattern: Option<Pattern>,
}

impl LayoutAssignment {
    pub fn get(&self, id: &str) -> Option<Vec3> {
        self.positions.get(id).copied()
    }

    pub fn pattern(&self) -> Option<Pattern> {
        self.pattern
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec3)> {
        self.order
            .iter()
            .filter_map(|id| self.positions.get(id).map(|p| (id.as_str(), *p)))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Smallest centre-to-centre distance (`None` below two entities).
    pub fn min_pairwise_distance(&self) -> Option<f32> {
        let points: Vec<Vec3> = self.positions.values().copied().collect();
        let mut best: Option<f32> = None;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                let d = a.distance(*b);
                best = Some(best.map_or(d, |m| m.min(d)));
            }
        }
        best
    }
}

/// Place `ids` symmetrically with minimum pairwise distance `spacing`.
///
/// Deterministic for a fixed id list and spacing. Duplicate ids keep the
/// last position assigned to them.
pub fn layout<S: AsRef<str>>(ids: &[S], spacing: f32) -> LayoutAssignment {
    let pattern = Pattern::for_count(ids.len());
    let points = pattern.points(ids.len(), spacing);

    let mut assignment = LayoutAssignment {
        order: Vec::with_capacity(ids.len()),
        positions: HashMap::with_capacity(ids.len()),
        pattern: Some(pattern),
    };
    for (id, point) in ids.iter().zip(points) {
        let id = id.as_ref();
        if assignment.positions.insert(id.to_owned(), point).is_some() {
            log::warn!("layout: duplicate id '{id}' overwrites an earlier placement");
        } else {
            assignment.order.push(id.to_owned());
        }
    }
    assignment
}

/// Whether `spacing` clears `max_diameter` by `safety_margin` (0.2 = 20 %).
///
/// Diagnostic only: a failure is logged, never raised.
pub fn validate_spacing(spacing: f32, max_diameter: f32, safety_margin: f32) -> bool {
    let required = max_diameter * (1.0 + safety_margin);
    let ok = spacing >= required;
    if !ok {
        log::warn!(
            "layout: spacing {spacing:.2} is below {required:.2} ({max_diameter:.2} diameter + {:.0}% margin); bodies may overlap",
            safety_margin * 100.0
        );
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("galaxy-{i}")).collect()
    }

    #[test]
    fn patterns_by_count() {
        assert_eq!(Pattern::for_count(1), Pattern::Single);
        assert_eq!(Pattern::for_count(2), Pattern::MirroredPair);
        assert_eq!(Pattern::for_count(3), Pattern::Triangle);
        assert_eq!(Pattern::for_count(4), Pattern::Diamond);
        assert_eq!(Pattern::for_count(5), Pattern::CenteredDiamond);
        assert_eq!(Pattern::for_count(6), Pattern::Ring);
        assert_eq!(Pattern::for_count(12), Pattern::Ring);
        assert_eq!(Pattern::for_count(13), Pattern::Grid);
    }

    #[test]
    fn single_is_centred() {
        let a = layout(&["only"], 100.0);
        assert_eq!(a.get("only"), Some(Vec3::ZERO));
    }

    #[test]
    fn pair_is_mirrored() {
        let a = layout(&["left", "right"], 100.0);
        let l = a.get("left").unwrap();
        let r = a.get("right").unwrap();
        assert_eq!(l, -r);
        assert!((l.distance(r) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn one_to_six_respect_spacing() {
        for n in 1..=6 {
            let a = layout(&ids(n), 50.0);
            assert_eq!(a.len(), n);
            if let Some(min) = a.min_pairwise_distance() {
                assert!(min >= 50.0 * (1.0 - 1e-5), "n = {n}, min = {min}");
            }
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let a = layout(&ids(7), 80.0);
        let b = layout(&ids(7), 80.0);
        assert_eq!(a, b);
    }

    #[test]
    fn iteration_follows_input_order() {
        let names = ["c", "a", "b"];
        let a = layout(&names, 10.0);
        let order: Vec<&str> = a.iter().map(|(id, _)| id).collect();
        assert_eq!(order, names);
    }

    #[test]
    fn duplicates_collapse() {
        let a = layout(&["x", "y", "x"], 10.0);
        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().count(), 2);
    }

    #[test]
    fn points_lie_in_plane() {
        for (_, p) in layout(&ids(20), 30.0).iter() {
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn validate_spacing_checks_margin() {
        assert!(validate_spacing(130.0, 100.0, 0.2));
        assert!(!validate_spacing(110.0, 100.0, 0.2));
    }

    proptest! {
        #[test]
        fn any_count_respects_spacing(n in 2usize..40, spacing in 1.0f32..500.0) {
            let a = layout(&ids(n), spacing);
            let min = a.min_pairwise_distance().unwrap();
            prop_assert!(min >= spacing * (1.0 - 1e-4), "n = {}, min = {}", n, min);
        }
    }
}
