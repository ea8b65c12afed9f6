//! Free-text preferred day to a canonical preference token.
//!
//! The rules below are tried top to bottom and the first one that produces a
//! preference wins. Text that names no day falls through to one of two
//! fallbacks: an uppercased copy when it mentions am/pm, otherwise the
//! caller's original string untouched.

use crate::domain::model::{Day, Preference};

const FULL_DAY_NAMES: [(&str, Day); 3] = [
    ("monday", Day::Mon),
    ("tuesday", Day::Tues),
    ("wednesday", Day::Wed),
];

const SHORT_DAY_NAMES: [(&str, Day); 4] = [
    ("mon", Day::Mon),
    ("tue", Day::Tues),
    ("tues", Day::Tues),
    ("wed", Day::Wed),
];

const SHORT_DAY_STEMS: [(&str, Day); 3] = [("mon", Day::Mon), ("tue", Day::Tues), ("wed", Day::Wed)];

/// The three views of the input the rules look at.
struct PreferenceText<'a> {
    original: &'a str,
    /// Trimmed, lower-cased.
    lowered: String,
    /// `lowered` with morning/afternoon rewritten to am/pm.
    text: String,
}

impl<'a> PreferenceText<'a> {
    fn new(original: &'a str) -> Self {
        let lowered = original.trim().to_lowercase();
        let text = lowered.replace("morning", "am").replace("afternoon", "pm");
        Self {
            original,
            lowered,
            text,
        }
    }

    fn mentions_period(&self) -> bool {
        self.text.contains("am") || self.text.contains("pm")
    }

    /// Narrows a recognized day by any am/pm mention; pm is checked first.
    fn day_with_period(&self, day: Day) -> Preference {
        if self.text.contains("pm") {
            Preference::Slot(day.afternoon())
        } else if self.text.contains("am") {
            Preference::Slot(day.morning())
        } else {
            Preference::WholeDay(day)
        }
    }
}

type PreferenceRule = fn(&PreferenceText<'_>) -> Option<Preference>;

static RULES: &[(&str, PreferenceRule)] = &[
    ("blank", |input| {
        input.lowered.is_empty().then_some(Preference::AnyDay)
    }),
    ("any day", |input| {
        matches!(input.lowered.as_str(), "any" | "any day").then_some(Preference::AnyDay)
    }),
    ("exact day name", |input| {
        FULL_DAY_NAMES
            .iter()
            .find(|(name, _)| input.text == *name)
            .map(|(_, day)| Preference::WholeDay(*day))
    }),
    ("day name with period", |input| {
        FULL_DAY_NAMES
            .iter()
            .find(|(name, _)| input.text.contains(name))
            .map(|(_, day)| input.day_with_period(*day))
    }),
    ("exact short day", |input| {
        SHORT_DAY_NAMES
            .iter()
            .find(|(name, _)| input.text == *name)
            .map(|(_, day)| Preference::WholeDay(*day))
    }),
    ("short day with period", |input| {
        SHORT_DAY_STEMS
            .iter()
            .find(|(stem, _)| input.text.contains(stem))
            .map(|(_, day)| input.day_with_period(*day))
    }),
    ("period only", |input| {
        input
            .mentions_period()
            .then(|| Preference::Fallback(input.text.to_uppercase()))
    }),
];

/// Normalizes a preferred-day field. Absent and blank input both mean any day.
pub fn normalize_preference(raw: Option<&str>) -> Preference {
    let Some(raw) = raw else {
        return Preference::AnyDay;
    };
    let input = PreferenceText::new(raw);

    for (name, rule) in RULES {
        if let Some(preference) = rule(&input) {
            tracing::trace!(rule = *name, input = raw, "preference rule matched");
            return preference;
        }
    }

    Preference::Fallback(input.original.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Session;

    fn token(raw: &str) -> String {
        normalize_preference(Some(raw)).as_token()
    }

    #[test]
    fn test_blank_and_absent_mean_any_day() {
        assert_eq!(normalize_preference(None), Preference::AnyDay);
        assert_eq!(token(""), "Any Day");
        assert_eq!(token("   "), "Any Day");
    }

    #[test]
    fn test_any_keywords() {
        assert_eq!(token("ANY"), "Any Day");
        assert_eq!(token(" Any Day "), "Any Day");
        assert_eq!(token("any time"), "any time");
    }

    #[test]
    fn test_full_day_names() {
        assert_eq!(token("Monday"), "Mon Any");
        assert_eq!(token("TUESDAY"), "Tues Any");
        assert_eq!(token("wednesday"), "Wed Any");
    }

    #[test]
    fn test_day_names_with_period() {
        assert_eq!(token("monday afternoon"), "Mon PM");
        assert_eq!(token("Tuesday morning"), "Tues AM");
        assert_eq!(token("wednesday pm please"), "Wed PM");
        assert_eq!(token("monday if possible"), "Mon Any");
    }

    #[test]
    fn test_pm_checked_before_am() {
        assert_eq!(token("monday am or pm"), "Mon PM");
    }

    #[test]
    fn test_short_day_names() {
        assert_eq!(token("mon"), "Mon Any");
        assert_eq!(token("Tue"), "Tues Any");
        assert_eq!(token("tues"), "Tues Any");
        assert_eq!(token("wed"), "Wed Any");
    }

    #[test]
    fn test_short_day_with_period() {
        assert_eq!(token("tues am"), "Tues AM");
        assert_eq!(token("Wed afternoon"), "Wed PM");
        assert_eq!(token("mon only"), "Mon Any");
        assert_eq!(
            normalize_preference(Some("tues am")),
            Preference::Slot(Session::TuesAm)
        );
    }

    #[test]
    fn test_first_day_in_list_wins() {
        assert_eq!(token("monday or wednesday"), "Mon Any");
        assert_eq!(token("wed or tue"), "Tues Any");
    }

    #[test]
    fn test_period_without_day_is_uppercased() {
        assert_eq!(token(" morning "), "AM");
        assert_eq!(token("pm only"), "PM ONLY");
        assert_eq!(
            normalize_preference(Some("10am")),
            Preference::Fallback("10AM".to_string())
        );
    }

    #[test]
    fn test_unrecognized_text_is_returned_unchanged() {
        assert_eq!(token("  Friday "), "  Friday ");
        assert_eq!(token("ASAP"), "ASAP");
    }
}
