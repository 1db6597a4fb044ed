use std::ops::RangeInclusive;

use scenario_lab_core::prelude::{Priority, RunDuration, RunResult, Scenario, Verdict};

use crate::random::RandomSource;

/// Appended to the expected behaviour to describe a passing run.
pub const PASS_SUFFIX: &str = " -- Verified successfully.";

/// Narratives reported for a failing run, one picked at random.
pub const FAILURE_NARRATIVES: [&str; 8] = [
    "Missing ARIA attribute on one element. Partial compliance detected.",
    "Contrast ratio 3.8:1 found on secondary text -- below 4.5:1 AA threshold.",
    "Focus indicator missing on custom dropdown component.",
    "Screen reader did not announce dynamic content update.",
    "Keyboard trap detected in date picker widget.",
    "Touch target size 32x32px -- below 44x44px minimum.",
    "Heading hierarchy skipped from H2 to H4 on accounts page.",
    "Form error not programmatically associated with input field.",
];

const PASSED_DURATION_MS: RangeInclusive<u64> = 800..=4500;
const FAILED_DURATION_MS: RangeInclusive<u64> = 1200..=6000;

/// Chance that a run of a scenario with this priority passes.
pub fn pass_probability(priority: &Priority) -> f64 {
    match priority {
        Priority::P0 => 0.75,
        Priority::P1 => 0.80,
        _ => 0.85,
    }
}

/// Make up a plausible result for a run of `scenario`.
///
/// Draws, in order: the verdict, the failure narrative (failures only) and the duration.
pub fn synthesize<R: RandomSource + ?Sized>(scenario: &Scenario, random: &mut R) -> RunResult {
    let passed = random.next_f64() < pass_probability(scenario.priority());

    if passed {
        let expected = scenario.expected();
        let actual = format!(
            "{}{PASS_SUFFIX}",
            expected.strip_suffix('.').unwrap_or(expected)
        );
        RunResult::new(Verdict::Passed, actual, draw_duration(random, PASSED_DURATION_MS))
    } else {
        let last = (FAILURE_NARRATIVES.len() - 1) as u64;
        let index = usize::try_from(random.next_in_range(0, last).min(last)).unwrap_or_default();
        RunResult::new(
            Verdict::Failed,
            FAILURE_NARRATIVES[index],
            draw_duration(random, FAILED_DURATION_MS),
        )
    }
}

fn draw_duration<R: RandomSource + ?Sized>(random: &mut R, range: RangeInclusive<u64>) -> RunDuration {
    let millis = random
        .next_in_range(*range.start(), *range.end())
        .clamp(*range.start(), *range.end());
    RunDuration::from_millis_rounded(millis)
}
