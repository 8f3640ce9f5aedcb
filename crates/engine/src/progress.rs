//! Three-segment progress indicator for steps 1–3.

use std::cmp::Ordering;

use concierge_types::Step;
use serde::Serialize;

pub const PROGRESS_SEGMENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStatus {
    Completed,
    Active,
    Upcoming,
}

/// Segment states relative to `step`; `None` on the success screen, which
/// has no progress indicator.
pub fn progress_segments(step: Step) -> Option<[SegmentStatus; PROGRESS_SEGMENTS]> {
    if step == Step::Success {
        return None;
    }
    let current = usize::from(step.number());
    Some(std::array::from_fn(|index| match (index + 1).cmp(&current) {
        Ordering::Less => SegmentStatus::Completed,
        Ordering::Equal => SegmentStatus::Active,
        Ordering::Greater => SegmentStatus::Upcoming,
    }))
}

/// Progressbar metadata (current value and bounds) exposed alongside the
/// segments so assistive renderers can announce "step n of 4".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressMeta {
    pub value_now: u8,
    pub value_min: u8,
    pub value_max: u8,
}

impl ProgressMeta {
    pub fn for_step(step: Step) -> Self {
        Self {
            value_now: step.number(),
            value_min: Step::SelectService.number(),
            value_max: Step::Success.number(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_track_the_current_step() {
        for step in [Step::SelectService, Step::SelectTime, Step::ConfirmDetails] {
            let segments = progress_segments(step).expect("steps 1-3 show progress");
            let n = usize::from(step.number());
            let completed = segments.iter().filter(|s| **s == SegmentStatus::Completed).count();
            let active: Vec<usize> = segments
                .iter()
                .enumerate()
                .filter(|(_, s)| **s == SegmentStatus::Active)
                .map(|(index, _)| index + 1)
                .collect();
            assert_eq!(completed, n - 1, "step {step}");
            assert_eq!(active, vec![n], "step {step}");
        }
    }

    #[test]
    fn success_has_no_progress() {
        assert_eq!(progress_segments(Step::Success), None);
        assert_eq!(ProgressMeta::for_step(Step::Success).value_now, 4);
        assert_eq!(ProgressMeta::for_step(Step::SelectTime).value_max, 4);
    }
}
