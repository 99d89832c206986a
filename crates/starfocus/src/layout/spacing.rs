//! Collision-free orbital radii for a sibling set.
//!
//! Spacing is uniform across siblings: radius `i` is
//! `base_radius + i * spacing`. The spacing grows until every neighbouring
//! pair clears `size_a + size_b + margin`, and may shrink again to fit a
//! container, but never below `size_a + size_b`.
//!
//! Eccentric orbits swing in and out around their radius. [`SpacingPlan::swing_room`]
//! gives each body its share of the slack so swinging neighbours never meet.

/// Tunables for one sibling set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingParams {
    /// Radius of the innermost orbit.
    pub base_radius: f32,
    /// Clearance added on top of the two body sizes.
    pub margin: f32,
    /// Absolute lower bound for compressed spacing.
    pub min_floor: f32,
}

/// Result of [`compute_spacing`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingPlan {
    pub effective_spacing: f32,
    /// One orbital radius per input size, innermost first.
    pub radii: Vec<f32>,
    /// Whether the spacing was reduced to fit a container.
    pub compressed: bool,
}

impl SpacingPlan {
    /// Outer edge of the outermost body (0 for an empty set).
    pub fn extent(&self, sizes: &[f32]) -> f32 {
        match (self.radii.last(), sizes.last()) {
            (Some(r), Some(s)) => r + s,
            _ => 0.0,
        }
    }

    /// Radial swing each body may take without reaching a neighbour or,
    /// for the innermost body, the parent surface at `inner_edge`.
    ///
    /// Slack between two neighbours is split evenly between them.
    pub fn swing_room(&self, sizes: &[f32], inner_edge: f32) -> Vec<f32> {
        let n = self.radii.len().min(sizes.len());
        let mut room = vec![f32::INFINITY; n];
        if n == 0 {
            return room;
        }
        room[0] = (self.radii[0] - sizes[0] - inner_edge).max(0.0);
        for i in 1..n {
            let slack = self.radii[i] - self.radii[i - 1] - sizes[i] - sizes[i - 1];
            let share = slack.max(0.0) / 2.0;
            room[i - 1] = room[i - 1].min(share);
            room[i] = room[i].min(share);
        }
        room
    }

    /// Outer edge of the set when body `i` may swing out by `swing[i]`.
    pub fn reach(&self, sizes: &[f32], swing: &[f32]) -> f32 {
        self.radii
            .iter()
            .zip(sizes)
            .zip(swing)
            .map(|((r, s), d)| r + s + d)
            .fold(0.0, f32::max)
    }
}

/// `base_radius + index * spacing`.
#[inline]
pub fn compute_orbital_radius(base_radius: f32, index: usize, spacing: f32) -> f32 {
    base_radius + index as f32 * spacing
}

/// Largest `size_i + size_{i+1}` over neighbouring pairs (0 for < 2 bodies).
fn max_pair_sum(sizes: &[f32]) -> f32 {
    sizes
        .windows(2)
        .map(|w| w[0] + w[1])
        .fold(0.0, f32::max)
}

/// Plan orbital radii for bodies of the given `sizes` (radii, innermost first).
///
/// Starts from `nominal_spacing` and widens it so no neighbouring bodies can
/// touch. With `container_radius`, an extent past the container compresses
/// the spacing uniformly down to the collision floor and logs a warning.
pub fn compute_spacing(
    sizes: &[f32],
    nominal_spacing: f32,
    container_radius: Option<f32>,
    params: &SpacingParams,
) -> SpacingPlan {
    if sizes.is_empty() {
        return SpacingPlan {
            effective_spacing: nominal_spacing,
            radii: Vec::new(),
            compressed: false,
        };
    }

    let pair_floor = max_pair_sum(sizes);
    let required = if sizes.len() > 1 { pair_floor + params.margin } else { 0.0 };
    let mut spacing = nominal_spacing.max(required);
    let mut compressed = false;

    if let Some(container) = container_radius {
        let gaps = (sizes.len() - 1) as f32;
        let last_size = sizes[sizes.len() - 1];
        let extent = compute_orbital_radius(params.base_radius, sizes.len() - 1, spacing) + last_size;

        if extent > container && gaps > 0.0 {
            let floor = pair_floor.max(params.min_floor);
            let fitted = (container - params.base_radius - last_size) / gaps;
            let squeezed = fitted.max(floor);
            if squeezed < spacing {
                log::warn!(
                    "spacing: extent {:.2} exceeds container {:.2}; compressing spacing {:.3} -> {:.3}",
                    extent, container, spacing, squeezed
                );
                spacing = squeezed;
                compressed = true;
            }
            if fitted < floor {
                log::warn!(
                    "spacing: {} bodies cannot fit container {:.2} without overlap; holding floor {:.3}",
                    sizes.len(), container, floor
                );
            }
        } else if extent > container {
            log::warn!(
                "spacing: single body extent {:.2} exceeds container {:.2}",
                extent, container
            );
        }
    }

    let radii = (0..sizes.len())
        .map(|i| compute_orbital_radius(params.base_radius, i, spacing))
        .collect();

    SpacingPlan {
        effective_spacing: spacing,
        radii,
        compressed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PARAMS: SpacingParams = SpacingParams {
        base_radius: 4.0,
        margin: 0.5,
        min_floor: 0.1,
    };

    fn assert_no_overlap(sizes: &[f32], plan: &SpacingPlan) {
        for i in 1..sizes.len() {
            let gap = plan.radii[i] - plan.radii[i - 1];
            let needed = sizes[i] + sizes[i - 1];
            assert!(
                gap >= needed - 1e-4,
                "gap {gap} < {needed} between bodies {} and {i}",
                i - 1
            );
        }
    }

    #[test]
    fn empty_input() {
        let plan = compute_spacing(&[], 3.0, Some(10.0), &PARAMS);
        assert!(plan.radii.is_empty());
        assert_eq!(plan.effective_spacing, 3.0);
        assert!(!plan.compressed);
    }

    #[test]
    fn nominal_spacing_kept_when_bodies_are_small() {
        let plan = compute_spacing(&[0.2, 0.3, 0.1], 2.5, None, &PARAMS);
        assert_eq!(plan.effective_spacing, 2.5);
        assert_eq!(plan.radii, vec![4.0, 6.5, 9.0]);
    }

    #[test]
    fn large_bodies_widen_spacing() {
        let sizes = [1.0, 3.0, 0.5];
        let plan = compute_spacing(&sizes, 2.5, None, &PARAMS);
        // Largest neighbour pair is 1 + 3, plus margin.
        assert!((plan.effective_spacing - 4.5).abs() < 1e-6);
        assert_no_overlap(&sizes, &plan);
    }

    #[test]
    fn container_compresses_spacing() {
        let sizes = [0.5, 0.5, 0.5, 0.5];
        let plan = compute_spacing(&sizes, 10.0, Some(20.0), &PARAMS);
        assert!(plan.compressed);
        // (20 - 4 - 0.5) / 3
        assert!((plan.effective_spacing - 15.5 / 3.0).abs() < 1e-5);
        assert!(plan.extent(&sizes) <= 20.0 + 1e-4);
        assert_no_overlap(&sizes, &plan);
    }

    #[test]
    fn compression_never_breaks_the_collision_floor() {
        let sizes = [2.0, 2.0, 2.0, 2.0];
        let plan = compute_spacing(&sizes, 10.0, Some(8.0), &PARAMS);
        assert!(plan.compressed);
        assert!((plan.effective_spacing - 4.0).abs() < 1e-6);
        assert_no_overlap(&sizes, &plan);
    }

    #[test]
    fn roomy_container_is_untouched() {
        let plan = compute_spacing(&[0.5, 0.5], 2.0, Some(100.0), &PARAMS);
        assert!(!plan.compressed);
        assert_eq!(plan.effective_spacing, 2.0);
    }

    #[test]
    fn orbital_radius_is_linear() {
        assert_eq!(compute_orbital_radius(4.0, 0, 2.0), 4.0);
        assert_eq!(compute_orbital_radius(4.0, 3, 2.0), 10.0);
    }

    #[test]
    fn swing_room_splits_slack() {
        let sizes = [0.5, 0.5, 1.0];
        let plan = compute_spacing(&sizes, 3.0, None, &PARAMS);
        // Radii 4, 7, 10. Slacks: 2 to the pair (0, 1), 1.5 to (1, 2).
        let room = plan.swing_room(&sizes, 2.0);
        assert_eq!(room, vec![1.0, 0.75, 0.75]);
        assert!((plan.reach(&sizes, &room) - 11.75).abs() < 1e-6);
    }

    #[test]
    fn innermost_room_respects_parent() {
        let plan = compute_spacing(&[0.5], 3.0, None, &PARAMS);
        assert!((plan.swing_room(&[0.5], 3.2)[0] - 0.3).abs() < 1e-5);
        assert_eq!(plan.swing_room(&[0.5], 3.8), vec![0.0]);
    }

    #[test]
    fn floor_spacing_leaves_no_room() {
        let sizes = [2.0, 2.0, 2.0, 2.0];
        let plan = compute_spacing(&sizes, 10.0, Some(8.0), &PARAMS);
        assert!(plan.swing_room(&sizes, 0.0)[1..].iter().all(|d| *d <= 1e-5));
    }

    proptest! {
        #[test]
        fn swinging_neighbours_keep_clear(
            sizes in prop::collection::vec(0.0f32..3.0, 1..12),
            nominal in 0.0f32..8.0,
            inner in 0.0f32..4.0,
        ) {
            let plan = compute_spacing(&sizes, nominal, None, &PARAMS);
            let room = plan.swing_room(&sizes, inner);
            prop_assert!(plan.radii[0] - room[0] - sizes[0] >= inner - 1e-3 || room[0] == 0.0);
            for i in 1..sizes.len() {
                let inner_of_outer = plan.radii[i] - room[i];
                let outer_of_inner = plan.radii[i - 1] + room[i - 1];
                prop_assert!(inner_of_outer - outer_of_inner >= sizes[i] + sizes[i - 1] - 1e-3);
            }
        }

        #[test]
        fn adjacent_bodies_never_collide(
            sizes in prop::collection::vec(0.0f32..5.0, 0..12),
            nominal in 0.0f32..8.0,
            container in prop::option::of(1.0f32..60.0),
        ) {
            let plan = compute_spacing(&sizes, nominal, container, &PARAMS);
            prop_assert_eq!(plan.radii.len(), sizes.len());
            for i in 1..sizes.len() {
                let gap = plan.radii[i] - plan.radii[i - 1];
                prop_assert!(gap >= sizes[i] + sizes[i - 1] - 1e-3);
            }
        }
    }
}
