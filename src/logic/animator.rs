//! Score Animator
//!
//! Turns a target percentage into the finite, time-ordered sequence of
//! intermediate display values that the page shows while the score counts
//! up. A plan is computed once per submission cycle and never restarted;
//! the driver stops as soon as a frame is refused (stale cycle).

use std::time::Duration;

/// Compute the animation frames for `target_percent`.
///
/// The per-tick increment is `ceil(target / (duration / step))`, added to a
/// running total; the final frame is clamped to exactly `target_percent` so
/// rounding from the increment step can never overshoot. Output is
/// monotonic non-decreasing and terminal.
pub fn frame_plan(target_percent: u8, duration_ms: u64, step_ms: u64) -> Vec<u8> {
    debug_assert!(target_percent <= 100);

    if target_percent == 0 || duration_ms == 0 || step_ms == 0 {
        return vec![target_percent];
    }

    let ticks = duration_ms as f64 / step_ms as f64;
    let increment = (target_percent as f64 / ticks).ceil() as u32;

    let mut frames = Vec::new();
    let mut current: u32 = 0;
    loop {
        current += increment;
        if current >= target_percent as u32 {
            frames.push(target_percent);
            break;
        }
        frames.push(current as u8);
    }

    frames
}

/// Drive a frame plan at `step_ms` cadence.
///
/// `apply` receives each frame and returns whether it was accepted; a
/// refused frame ends the animation immediately. The submission sequence
/// check lives in the caller's closure, so overlapping cycles cannot write
/// interleaved values to the display.
pub async fn run<F>(plan: Vec<u8>, step_ms: u64, mut apply: F)
where
    F: FnMut(u8) -> bool,
{
    let mut ticker = tokio::time::interval(Duration::from_millis(step_ms.max(1)));
    // The first interval tick completes immediately; burn it so every
    // frame lands one full step apart.
    ticker.tick().await;

    for frame in plan {
        ticker.tick().await;
        if !apply(frame) {
            tracing::debug!("Animation superseded, dropping remaining frames");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ends_exactly_at_target() {
        let frames = frame_plan(73, 1000, 15);
        assert_eq!(*frames.last().unwrap(), 73);
    }

    #[test]
    fn plan_is_monotonic_and_bounded() {
        let frames = frame_plan(73, 1000, 15);
        let mut prev = 0u8;
        for &f in &frames {
            assert!(f >= prev, "frames must be non-decreasing");
            assert!(f <= 73, "frames must never exceed the target");
            prev = f;
        }
    }

    #[test]
    fn plan_clamps_overshoot_from_increment_rounding() {
        // ceil(73 / (1000/15)) = 2, so the raw total would hit 74
        let frames = frame_plan(73, 1000, 15);
        assert_eq!(frames[0], 2);
        assert_eq!(frames[frames.len() - 2], 72);
        assert_eq!(frames[frames.len() - 1], 73);
    }

    #[test]
    fn plan_for_zero_target_is_single_frame() {
        assert_eq!(frame_plan(0, 1000, 15), vec![0]);
    }

    #[test]
    fn plan_for_full_score() {
        let frames = frame_plan(100, 1000, 15);
        assert_eq!(*frames.last().unwrap(), 100);
        assert!(frames.iter().all(|&f| f <= 100));
    }

    #[test]
    fn plan_handles_small_targets() {
        let frames = frame_plan(1, 1000, 15);
        assert_eq!(frames, vec![1]);
    }

    #[test]
    fn plan_is_finite_for_every_target() {
        for target in 0..=100u8 {
            let frames = frame_plan(target, 1000, 15);
            assert!(!frames.is_empty());
            assert_eq!(*frames.last().unwrap(), target);
        }
    }

    #[tokio::test]
    async fn run_applies_every_frame_in_order() {
        let mut seen = Vec::new();
        run(frame_plan(10, 100, 10), 10, |f| {
            seen.push(f);
            true
        })
        .await;

        assert_eq!(*seen.last().unwrap(), 10);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn run_stops_when_a_frame_is_refused() {
        let mut applied = 0;
        run(vec![2, 4, 6, 8, 10], 10, |_| {
            applied += 1;
            applied < 3
        })
        .await;

        assert_eq!(applied, 3);
    }
}
