//! Duration extraction from free text.
//!
//! Each whitespace-delimited word is matched in full against the formats in
//! [`DurationFormat`] order. A word that merely contains a duration (`#out2hrs`,
//! `1:15hrs`) is not a candidate.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ParseError;

/// Whitespace-delimited words with their byte spans.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").unwrap());

/// Full-word patterns, in evaluation order.
static FORMATS: LazyLock<Vec<(DurationFormat, Regex)>> = LazyLock::new(|| {
    [
        (
            DurationFormat::HoursColonMinutes,
            r"(?i)^(?P<hrs>[0-9]+)?:(?P<mins>[0-9]+)$",
        ),
        (
            DurationFormat::HoursUnit,
            r"(?i)^(?P<hrs>[0-9]+)(?:hrs|hr|h)(?:(?P<mins>[0-9]+)(?:mins|min|mn|m)?)?$",
        ),
        (
            DurationFormat::MinutesUnit,
            r"(?i)^(?P<mins>[0-9]+)(?:mins|min|mn|m)$",
        ),
        (
            DurationFormat::DecimalHours,
            r"(?i)^(?P<decimal>[0-9]*\.[0-9]+)(?:hrs|hr|h)?$",
        ),
    ]
    .into_iter()
    .map(|(format, pattern)| (format, Regex::new(pattern).unwrap()))
    .collect()
});

/// The textual shapes a duration may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationFormat {
    /// `[hrs]:mins`, e.g. `1:15`, `:45`.
    HoursColonMinutes,
    /// `hrs(h|hr|hrs)[mins[(m|min|mn|mins)]]`, e.g. `1h`, `1h30min`.
    HoursUnit,
    /// `mins(m|min|mn|mins)`, e.g. `45m`.
    MinutesUnit,
    /// `[int].frac[(h|hr|hrs)]`, e.g. `1.25`, `.25h`.
    DecimalHours,
}

impl fmt::Display for DurationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::HoursColonMinutes => "[hrs]:mins",
            Self::HoursUnit => "hrs(h|hr|hrs)[mins[(m|min|mn|mins)]]",
            Self::MinutesUnit => "mins(m|min|mn|mins)",
            Self::DecimalHours => "[int].frac[(h|hr|hrs)]",
        };
        write!(f, "{s}")
    }
}

/// A duration found in an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDuration {
    /// The word the duration was read from, e.g. `1h30`.
    pub matched_text: String,
    /// Byte range of `matched_text` within the input.
    pub span: Range<usize>,
    /// Always greater than zero.
    pub minutes: u32,
    pub format: DurationFormat,
}

/// Finds the single duration in `input`.
///
/// Fails with [`ParseError::NoDuration`] when no word is a valid duration and
/// with [`ParseError::MultipleDurations`] when more than one is.
pub fn extract_duration(input: &str) -> Result<ExtractedDuration, ParseError> {
    let mut candidates = WORD_RE.find_iter(input).filter_map(|word| {
        let (minutes, format) = parse_duration_word(word.as_str())?;
        tracing::debug!(word = word.as_str(), minutes, %format, "duration candidate");
        Some(ExtractedDuration {
            matched_text: word.as_str().to_string(),
            span: word.range(),
            minutes,
            format,
        })
    });

    let Some(first) = candidates.next() else {
        return Err(ParseError::NoDuration {
            input: input.to_string(),
        });
    };
    if candidates.next().is_some() {
        return Err(ParseError::MultipleDurations {
            input: input.to_string(),
        });
    }
    Ok(first)
}

/// Parses one whitespace-free word as a duration.
///
/// Returns the minutes and the first format yielding a positive value, or
/// `None` if the word is not a duration.
pub fn parse_duration_word(word: &str) -> Option<(u32, DurationFormat)> {
    FORMATS.iter().find_map(|(format, regex)| {
        let caps = regex.captures(word)?;
        let minutes = match format {
            DurationFormat::DecimalHours => decimal_minutes(&caps["decimal"]),
            _ => hours_and_minutes(&caps),
        };
        match minutes {
            Some(minutes) if minutes > 0 => Some((minutes, *format)),
            _ => {
                tracing::trace!(word, %format, "rejected zero or out-of-range duration");
                None
            }
        }
    })
}

fn hours_and_minutes(caps: &Captures<'_>) -> Option<u32> {
    let field = |name: &str| -> Option<u32> {
        caps.name(name)
            .map_or(Some(0), |m| m.as_str().parse::<u32>().ok())
    };
    field("hrs")?.checked_mul(60)?.checked_add(field("mins")?)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is checked to be finite and within u32 range before casting"
)]
fn decimal_minutes(decimal: &str) -> Option<u32> {
    let hours: f64 = decimal.parse().ok()?;
    let minutes = (hours * 60.0).round();
    if !minutes.is_finite() || !(0.0..=f64::from(u32::MAX)).contains(&minutes) {
        return None;
    }
    Some(minutes as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(input: &str) -> Result<u32, &'static str> {
        extract_duration(input)
            .map(|d| d.minutes)
            .map_err(|e| e.kind().as_str())
    }

    #[test]
    fn rejects_inputs_without_a_duration() {
        let cases = [
            "#proposals",
            "@aba",
            "#out` -:45",
            "#out, 1.25min",
            "#out 1",
            "#out 1.",
            "#out .",
            "#out 0:00",
            "#out 0hr",
            "#out 0min",
            "#out 0.001",
            "#out1:15",
            "#out 1:15doctor",
            "#out 1:15(doctor)",
            "#out 1:15hrs",
            "1:15#out",
            "1:15, #out",
            "#out 1:15:30",
            "#out2hrs",
            "",
        ];
        for input in cases {
            assert_eq!(minutes(input), Err("NO_DURATION"), "input: {input:?}");
        }
    }

    #[test]
    fn rejects_inputs_with_several_durations() {
        let cases = [
            "#out 1hr 30min",
            "#out 1:30 and 1:31",
            "#out 1:01 25min",
            "#out 1:30 1:31",
            "#out 1h 2h",
            "1h 30mn #Support: Ongoing @aba update geography",
        ];
        for input in cases {
            assert_eq!(minutes(input), Err("MULTIPLE_DURATIONS"), "input: {input:?}");
        }
    }

    #[test]
    fn parses_hours_colon_minutes() {
        assert_eq!(minutes("#out 1:15"), Ok(75));
        assert_eq!(minutes("#out 1:15 doctor"), Ok(75));
        assert_eq!(minutes("1:15 #out"), Ok(75));
        assert_eq!(minutes("#out 0:15"), Ok(15));
        assert_eq!(minutes("#out :15"), Ok(15));
    }

    #[test]
    fn parses_hour_units() {
        for input in ["#out 1h", "#out 1H", "#out 1hr", "#out 1hrs"] {
            assert_eq!(minutes(input), Ok(60), "input: {input:?}");
        }
        for input in ["#out 2h", "#out 2hr", "#out 2hrs"] {
            assert_eq!(minutes(input), Ok(120), "input: {input:?}");
        }
        for input in [
            "#out 1h30",
            "#out 1h30m",
            "#out 1h30min",
            "#out 1h30mins",
            "#out 1hr30mins",
            "#out 1H30MN",
        ] {
            assert_eq!(minutes(input), Ok(90), "input: {input:?}");
        }
    }

    #[test]
    fn parses_minute_units() {
        for input in [
            "#out 15m",
            "#out 15min",
            "#out 15mins",
            "#out 15mn",
            "#out 15MIN",
            "#out 15mIn",
        ] {
            assert_eq!(minutes(input), Ok(15), "input: {input:?}");
        }
    }

    #[test]
    fn parses_decimal_hours() {
        assert_eq!(minutes("#out .25"), Ok(15));
        assert_eq!(minutes("#out 0.25"), Ok(15));
        assert_eq!(minutes("#out .25h"), Ok(15));
        for input in [
            "#out 1.25",
            "#out 1.25H",
            "#out 1.25h",
            "#out 1.25hr",
            "#out 1.25hrs",
        ] {
            assert_eq!(minutes(input), Ok(75), "input: {input:?}");
        }
        // 0.01h is 0.6 minutes, which rounds up to one
        assert_eq!(minutes("#out 0.01"), Ok(1));
    }

    #[test]
    fn records_matched_word_and_span() {
        let input = "#out  1h30min doctor";
        let duration = extract_duration(input).unwrap();
        assert_eq!(duration.matched_text, "1h30min");
        assert_eq!(&input[duration.span.clone()], "1h30min");
        assert_eq!(duration.format, DurationFormat::HoursUnit);
    }

    #[test]
    fn zero_candidates_are_ignored_when_counting() {
        // `0:00` is not a duration, so `1h` is the only candidate
        assert_eq!(minutes("#out 0:00 1h"), Ok(60));
    }

    #[test]
    fn overflowing_values_are_not_candidates() {
        assert_eq!(
            parse_duration_word("99999999999999999999h"),
            None,
            "hours beyond u32 are rejected"
        );
        assert_eq!(parse_duration_word("71582789h"), None);
        assert_eq!(
            parse_duration_word("1:15"),
            Some((75, DurationFormat::HoursColonMinutes))
        );
    }

    #[test]
    fn each_format_is_reported() {
        assert_eq!(
            parse_duration_word(":45").map(|(_, f)| f),
            Some(DurationFormat::HoursColonMinutes)
        );
        assert_eq!(
            parse_duration_word("45m").map(|(_, f)| f),
            Some(DurationFormat::MinutesUnit)
        );
        assert_eq!(
            parse_duration_word(".5").map(|(_, f)| f),
            Some(DurationFormat::DecimalHours)
        );
    }
}
