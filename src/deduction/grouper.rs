//! Occurrence grouping.
//!
//! Decides whether a rule's qualifying days satisfy its occurrence
//! policy and, for the grouped policies, partitions them into fixed
//! three-day deduction groups.

use chrono::Duration;

use crate::deduction::rule_filter::QualifyingDay;
use crate::models::OccurrenceType;

/// Number of qualifying days that make up one deduction group.
///
/// Fixed policy for both grouped occurrence types: three qualifying days
/// form one deduction unit. The configured `occurrence_count` is a
/// trigger threshold for the `total` type only and never changes the
/// group size.
pub const DAYS_PER_GROUP: usize = 3;

/// The outcome of applying a rule's occurrence policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingOutcome {
    /// The rule triggers.
    Triggered {
        /// The deduction groups, for grouped occurrence types; `None`
        /// for the `total` type.
        groups: Option<Vec<Vec<QualifyingDay>>>,
        /// The triggering days. For grouped types this is the flattened
        /// union of complete groups only; days outside any complete
        /// group do not trigger.
        triggered: Vec<QualifyingDay>,
    },
    /// Too few qualifying days for the `total` threshold.
    BelowThreshold {
        /// Qualifying days found.
        found: usize,
        /// The configured threshold.
        required: u32,
    },
    /// A grouped occurrence type found qualifying days but no complete
    /// group of [`DAYS_PER_GROUP`].
    NoCompleteGroup {
        /// Qualifying days found.
        found: usize,
    },
}

/// Applies a rule's occurrence policy to its chronologically sorted
/// qualifying days.
///
/// - `total`: triggers when the day count reaches `occurrence_count`;
///   all qualifying days trigger, no grouping.
/// - `consecutive`: qualifying days are partitioned into maximal runs of
///   calendar-adjacent dates; each run contributes `floor(len / 3)`
///   complete groups in sequence order, remainders dropped.
/// - `non_consecutive`: days accumulate into a group that flushes when
///   it reaches three members; a day calendar-adjacent to the group's
///   last member discards the partial group and starts a new one.
pub fn group_occurrences(
    days: Vec<QualifyingDay>,
    occurrence_type: OccurrenceType,
    occurrence_count: u32,
) -> GroupingOutcome {
    match occurrence_type {
        OccurrenceType::Total => {
            if days.len() >= occurrence_count as usize {
                GroupingOutcome::Triggered {
                    groups: None,
                    triggered: days,
                }
            } else {
                GroupingOutcome::BelowThreshold {
                    found: days.len(),
                    required: occurrence_count,
                }
            }
        }
        OccurrenceType::Consecutive => finish(days.len(), consecutive_groups(days)),
        OccurrenceType::NonConsecutive => finish(days.len(), non_consecutive_groups(days)),
    }
}

fn finish(found: usize, groups: Vec<Vec<QualifyingDay>>) -> GroupingOutcome {
    if groups.is_empty() {
        return GroupingOutcome::NoCompleteGroup { found };
    }
    let triggered = groups.iter().flatten().cloned().collect();
    GroupingOutcome::Triggered {
        groups: Some(groups),
        triggered,
    }
}

fn adjacent(previous: &QualifyingDay, next: &QualifyingDay) -> bool {
    previous.date + Duration::days(1) == next.date
}

/// Partitions into maximal runs of adjacent dates, then splits each run
/// into complete [`DAYS_PER_GROUP`]-day groups in sequence order. Run
/// remainders shorter than a full group are dropped, never partially
/// charged.
fn consecutive_groups(days: Vec<QualifyingDay>) -> Vec<Vec<QualifyingDay>> {
    let mut groups = Vec::new();
    let mut run: Vec<QualifyingDay> = Vec::new();

    for day in days {
        if run.last().is_some_and(|last| !adjacent(last, &day)) {
            split_run(&mut groups, std::mem::take(&mut run));
        }
        run.push(day);
    }
    split_run(&mut groups, run);

    groups
}

fn split_run(groups: &mut Vec<Vec<QualifyingDay>>, run: Vec<QualifyingDay>) {
    let mut chunk = Vec::with_capacity(DAYS_PER_GROUP);
    for day in run {
        chunk.push(day);
        if chunk.len() == DAYS_PER_GROUP {
            groups.push(std::mem::take(&mut chunk));
        }
    }
    // remainder < DAYS_PER_GROUP is dropped
}

/// Walks the sorted days accumulating a current group. A day adjacent to
/// the group's last member resets the group (a complete group would
/// already have flushed); a group flushes the moment it reaches
/// [`DAYS_PER_GROUP`] members. Trailing partial groups are discarded.
fn non_consecutive_groups(days: Vec<QualifyingDay>) -> Vec<Vec<QualifyingDay>> {
    let mut groups = Vec::new();
    let mut current: Vec<QualifyingDay> = Vec::new();

    for day in days {
        if current.last().is_some_and(|last| adjacent(last, &day)) {
            // the partial group is forfeited; a complete one has already
            // flushed below
            current.clear();
        }
        current.push(day);
        if current.len() == DAYS_PER_GROUP {
            groups.push(std::mem::take(&mut current));
        }
    }
    // trailing partial group is discarded

    groups
}
