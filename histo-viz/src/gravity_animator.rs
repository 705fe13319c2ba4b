use alloc::{vec, vec::Vec};

/// Per-bin fall physics.
///
/// Rising targets are taken immediately (fast attack). A target below the
/// current height starts a free fall: velocity grows by `gravity * dt` each
/// step and the height drops by `velocity * dt` until it lands on the
/// target, where the velocity resets. Bins never interact.
///
/// Heights and velocities are kept in separate vectors so the renderer can
/// borrow the heights as a plain slice.
pub struct GravityAnimator {
    heights: Vec<f32>,
    velocities: Vec<f32>,
}

impl GravityAnimator {
    /// Creates `num_bins` bins resting at height 0.
    pub fn new(num_bins: usize) -> Self {
        Self {
            heights: vec![0.0; num_bins],
            velocities: vec![0.0; num_bins],
        }
    }

    pub fn num_bins(&self) -> usize {
        self.heights.len()
    }

    /// Replaces all bins with `num_bins` fresh ones at rest at height 0.
    pub fn reallocate(&mut self, num_bins: usize) {
        debug!("reallocating {} bins -> {}", self.heights.len(), num_bins);
        self.heights = vec![0.0; num_bins];
        self.velocities = vec![0.0; num_bins];
    }

    /// Advances every bin by `dt` seconds towards `targets`.
    ///
    /// A `targets` slice of a different length reallocates the bins first.
    /// Negative or non-finite `dt` counts as 0; `gravity <= 0` holds falling
    /// bins where they are.
    pub fn step(&mut self, targets: &[f32], dt: f32, gravity: f32) {
        if targets.len() != self.heights.len() {
            self.reallocate(targets.len());
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        for ((height, velocity), &target) in self
            .heights
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(targets)
        {
            step_bin(height, velocity, target, dt, gravity);
        }
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    /// Index of the tallest bin, the lowest index winning ties.
    pub fn tallest_bin(&self) -> Option<usize> {
        self.heights
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, &h)| match best {
                Some((_, best_h)) if best_h >= h => best,
                _ => Some((i, h)),
            })
            .map(|(i, _)| i)
    }

    /// Height of the tallest bin, 0 without bins.
    pub fn current_height(&self) -> f32 {
        self.tallest_bin().map_or(0.0, |i| self.heights[i])
    }
}

fn step_bin(height: &mut f32, velocity: &mut f32, target: f32, dt: f32, gravity: f32) {
    let target = if target.is_finite() { target.max(0.0) } else { 0.0 };

    if target >= *height {
        *height = target;
        *velocity = 0.0;
        return;
    }
    // NaN gravity lands here too.
    if !(gravity > 0.0) {
        *velocity = 0.0;
        return;
    }

    *velocity += gravity * dt;
    let fallen = *height - *velocity * dt;
    if fallen <= target {
        *height = target;
        *velocity = 0.0;
    } else {
        *height = fallen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling_from(height: f32) -> GravityAnimator {
        let mut animator = GravityAnimator::new(1);
        animator.step(&[height], 0.0, 10.0);
        animator
    }

    #[test]
    fn test_initial_state() {
        let animator = GravityAnimator::new(5);
        assert_eq!(animator.num_bins(), 5);
        assert_eq!(animator.heights(), &[0.0; 5]);
        assert_eq!(animator.velocities(), &[0.0; 5]);
        assert_eq!(animator.current_height(), 0.0);
    }

    #[test]
    fn test_rising_edge_is_immediate() {
        let mut animator = GravityAnimator::new(3);
        animator.step(&[10.0, 20.0, 30.0], 0.0, 10.0);
        assert_eq!(animator.heights(), &[10.0, 20.0, 30.0]);

        animator.step(&[50.0, 20.0, 31.0], 5.0, 10.0);
        assert_eq!(animator.heights(), &[50.0, 20.0, 31.0]);
        assert_eq!(animator.velocities(), &[0.0; 3]);
    }

    #[test]
    fn test_gravity_integration_sequence() {
        let mut animator = falling_from(100.0);

        animator.step(&[0.0], 1.0, 10.0);
        assert_eq!(animator.velocities()[0], 10.0);
        assert_eq!(animator.heights()[0], 90.0);

        animator.step(&[0.0], 1.0, 10.0);
        assert_eq!(animator.velocities()[0], 20.0);
        assert_eq!(animator.heights()[0], 70.0);

        animator.step(&[0.0], 1.0, 10.0);
        assert_eq!(animator.velocities()[0], 30.0);
        assert_eq!(animator.heights()[0], 40.0);

        // 40 - 40 lands exactly on the floor
        animator.step(&[0.0], 1.0, 10.0);
        assert_eq!(animator.heights()[0], 0.0);
        assert_eq!(animator.velocities()[0], 0.0);
    }

    #[test]
    fn test_fall_stops_at_target() {
        let mut animator = falling_from(100.0);
        animator.step(&[95.0], 1.0, 10.0);
        assert_eq!(animator.heights()[0], 95.0);
        assert_eq!(animator.velocities()[0], 0.0, "landed bins come to rest");
    }

    #[test]
    fn test_fall_is_strictly_decreasing_with_growing_velocity() {
        let mut animator = falling_from(500.0);
        let mut last_height = 500.0;
        let mut last_velocity = 0.0;
        while animator.heights()[0] > 0.0 {
            animator.step(&[0.0], 0.016, 10.0);
            let (height, velocity) = (animator.heights()[0], animator.velocities()[0]);
            assert!(height < last_height);
            assert!(height >= 0.0);
            if height > 0.0 {
                assert!(velocity >= last_velocity);
            }
            last_height = height;
            last_velocity = velocity;
        }
    }

    #[test]
    fn test_zero_gravity_holds_height() {
        let mut animator = falling_from(42.0);
        for _ in 0..100 {
            animator.step(&[0.0], 1.0, 0.0);
        }
        assert_eq!(animator.heights()[0], 42.0);

        animator.step(&[0.0], 1.0, -5.0);
        assert_eq!(animator.heights()[0], 42.0);
    }

    #[test]
    fn test_negative_dt_counts_as_zero() {
        let mut animator = falling_from(42.0);
        animator.step(&[0.0], -1.0, 10.0);
        assert_eq!(animator.heights()[0], 42.0);
        animator.step(&[0.0], f32::NAN, 10.0);
        assert_eq!(animator.heights()[0], 42.0);
    }

    #[test]
    fn test_landed_bins_are_idempotent() {
        let mut animator = GravityAnimator::new(2);
        animator.step(&[3.0, 7.0], 0.0, 10.0);
        for _ in 0..10 {
            animator.step(&[3.0, 7.0], 0.0, 10.0);
        }
        assert_eq!(animator.heights(), &[3.0, 7.0]);
        assert_eq!(animator.velocities(), &[0.0, 0.0]);
    }

    #[test]
    fn test_garbage_targets_fall_to_zero() {
        let mut animator = GravityAnimator::new(3);
        animator.step(&[f32::NAN, -4.0, f32::INFINITY], 1.0, 10.0);
        assert_eq!(animator.heights(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_length_change_reallocates() {
        let mut animator = GravityAnimator::new(2);
        animator.step(&[5.0, 5.0], 0.0, 10.0);
        animator.step(&[1.0, 2.0, 3.0], 0.0, 10.0);
        assert_eq!(animator.num_bins(), 3);
        assert_eq!(animator.heights(), &[1.0, 2.0, 3.0]);

        animator.step(&[], 0.0, 10.0);
        assert_eq!(animator.num_bins(), 0);
        assert_eq!(animator.current_height(), 0.0);
    }

    #[test]
    fn test_current_height_tracks_tallest_bin() {
        let mut animator = GravityAnimator::new(4);
        animator.step(&[1.0, 9.0, 9.0, 4.0], 0.0, 10.0);
        assert_eq!(animator.tallest_bin(), Some(1));
        assert_eq!(animator.current_height(), 9.0);
    }
}
