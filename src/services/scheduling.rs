//! Slot arithmetic and the swappable booking-conflict policy.
//!
//! The scheduling window is 09:00 to 17:00 in fixed 30-minute slots; 17:00
//! itself is not a bookable slot.

/// First bookable hour of the day
pub const OPENING_HOUR: u32 = 9;

/// Hour the window closes (exclusive)
pub const CLOSING_HOUR: u32 = 17;

/// Slot width in minutes
pub const SLOT_MINUTES: u32 = 30;

/// How booking conflicts are detected against existing active appointments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Reject only an identical slot label. This mirrors the historical
    /// behavior: two overlapping appointments with different start labels
    /// are NOT detected.
    #[default]
    ExactSlot,

    /// Reject any interval overlap based on start time plus duration.
    Overlap,
}

impl ConflictPolicy {
    /// Parse a policy name from configuration; unknown values map to None
    pub fn parse(value: &str) -> Option<ConflictPolicy> {
        match value.to_ascii_lowercase().as_str() {
            "exact" | "exact_slot" => Some(ConflictPolicy::ExactSlot),
            "overlap" => Some(ConflictPolicy::Overlap),
            _ => None,
        }
    }
}

/// All slot labels of the scheduling window in ascending order
pub fn day_slots() -> Vec<String> {
    let mut slots = Vec::new();
    for hour in OPENING_HOUR..CLOSING_HOUR {
        let mut minute = 0;
        while minute < 60 {
            slots.push(format!("{:02}:{:02}", hour, minute));
            minute += SLOT_MINUTES;
        }
    }
    slots
}

/// Slot labels still open given the labels of active appointments.
/// Ordering is ascending; the computation is stateless.
pub fn available_slots(booked: &[String]) -> Vec<String> {
    day_slots()
        .into_iter()
        .filter(|slot| !booked.iter().any(|b| b == slot))
        .collect()
}

/// Minutes since midnight for a `HH:MM` label
fn label_minutes(label: &str) -> Option<i32> {
    let (hours, minutes) = label.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Decide whether a candidate booking collides with an existing active
/// appointment under the given policy.
///
/// `existing` pairs are (slot label, duration minutes). Labels that fail to
/// parse are treated as exact-match only, never silently ignored.
pub fn conflicts(
    policy: ConflictPolicy,
    existing: &[(String, i32)],
    candidate_time: &str,
    candidate_duration: i32,
) -> bool {
    match policy {
        ConflictPolicy::ExactSlot => existing.iter().any(|(time, _)| time == candidate_time),
        ConflictPolicy::Overlap => {
            let Some(candidate_start) = label_minutes(candidate_time) else {
                return existing.iter().any(|(time, _)| time == candidate_time);
            };
            let candidate_end = candidate_start + candidate_duration.max(0);
            existing.iter().any(|(time, duration)| {
                match label_minutes(time) {
                    Some(start) => {
                        let end = start + (*duration).max(0);
                        start < candidate_end && candidate_start < end
                    }
                    None => time == candidate_time,
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_has_sixteen_ascending_slots() {
        let slots = day_slots();
        assert_eq!(slots.len(), 16);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("16:30"));
        for pair in slots.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn booked_labels_are_excluded() {
        let booked = vec!["09:00".to_string(), "10:30".to_string()];
        let open = available_slots(&booked);

        assert_eq!(open.len(), 14);
        assert!(!open.contains(&"09:00".to_string()));
        assert!(!open.contains(&"10:30".to_string()));
        assert!(open.contains(&"09:30".to_string()));
    }

    #[test]
    fn exact_policy_only_rejects_identical_labels() {
        let existing = vec![("09:00".to_string(), 60)];

        assert!(conflicts(ConflictPolicy::ExactSlot, &existing, "09:00", 30));
        // Overlapping but differently labelled: allowed under exact matching
        assert!(!conflicts(ConflictPolicy::ExactSlot, &existing, "09:30", 30));
    }

    #[test]
    fn overlap_policy_rejects_interval_overlap() {
        let existing = vec![("09:00".to_string(), 60)];

        assert!(conflicts(ConflictPolicy::Overlap, &existing, "09:30", 30));
        assert!(conflicts(ConflictPolicy::Overlap, &existing, "08:45", 30));
        assert!(!conflicts(ConflictPolicy::Overlap, &existing, "10:00", 30));
    }

    #[test]
    fn overlap_policy_back_to_back_is_not_a_conflict() {
        let existing = vec![("09:00".to_string(), 30)];
        assert!(!conflicts(ConflictPolicy::Overlap, &existing, "09:30", 30));
    }

    #[test]
    fn policy_names_parse_from_config() {
        assert_eq!(ConflictPolicy::parse("exact"), Some(ConflictPolicy::ExactSlot));
        assert_eq!(ConflictPolicy::parse("OVERLAP"), Some(ConflictPolicy::Overlap));
        assert_eq!(ConflictPolicy::parse("fuzzy"), None);
    }
}
