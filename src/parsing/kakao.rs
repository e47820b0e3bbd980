//! KakaoTalk line grammars.
//!
//! KakaoTalk exports differ between the desktop and mobile apps, and the
//! grammars overlap. This module classifies one trimmed physical line at a
//! time into a [`Line`], trying the grammars in a fixed priority order:
//!
//! 1. Date-section header: `2023년 10월 25일 수요일`, `2023. 10. 25.`, or either
//!    wrapped in `---------------` separators
//! 2. Bracketed message (desktop): `[Alice] [오후 3:45] hello`
//! 3. Dotted inline-dated message (mobile): `2023. 10. 25. 오전 10:05, Bob : hi`
//! 4. Korean inline-dated message (mobile): `2023년 10월 25일 오후 1:00, Bob : hi`
//! 5. Anything else is a continuation of the previous message
//!
//! The first grammar that matches wins. A header must either carry the dash
//! separator or contain no `:` at all; every message grammar contains a colon,
//! which keeps dated message lines from being read as headers.
//!
//! Time conversion lives in [`to_timestamp`], a pure function over the closed
//! set of [`HalfDay`] markers.

use chrono::{Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};

/// Decorative run that wraps desktop date headers.
pub const HEADER_SEPARATOR: &str = "---------------";

/// Half-day marker of a 12-hour clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfDay {
    /// Before noon (`오전` / `AM`)
    Am,
    /// After noon (`오후` / `PM`)
    Pm,
}

impl HalfDay {
    /// Every accepted marker token and the half of the day it denotes.
    const TOKENS: &'static [(&'static str, HalfDay)] = &[
        ("오전", HalfDay::Am),
        ("오후", HalfDay::Pm),
        ("AM", HalfDay::Am),
        ("PM", HalfDay::Pm),
    ];

    /// Looks up a marker token. Matching is exact and case-sensitive.
    ///
    /// ```
    /// use kakaopack::parsing::kakao::HalfDay;
    ///
    /// assert_eq!(HalfDay::from_token("오후"), Some(HalfDay::Pm));
    /// assert_eq!(HalfDay::from_token("AM"), Some(HalfDay::Am));
    /// assert_eq!(HalfDay::from_token("pm"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|&(_, half)| half)
    }

    /// Returns all accepted marker tokens.
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        Self::TOKENS.iter().map(|&(t, _)| t)
    }

    /// Regex alternation over all marker tokens.
    fn alternation() -> String {
        Self::tokens().collect::<Vec<_>>().join("|")
    }
}

/// Converts a 12-hour clock hour to the 24-hour clock.
///
/// - PM and hour ≠ 12: add 12
/// - AM and hour = 12: midnight, 0
/// - anything else passes through unchanged
pub fn to_24_hour(marker: HalfDay, hour: u32) -> u32 {
    match (marker, hour) {
        (HalfDay::Pm, h) if h != 12 => h.saturating_add(12),
        (HalfDay::Am, 12) => 0,
        (_, h) => h,
    }
}

/// Combines a calendar date with a half-day clock time.
///
/// Seconds are always zero. Hours and minutes are not range-checked: values
/// past the end of the hour or day roll over into the next one.
/// Returns `None` only if the result falls outside chrono's calendar.
///
/// ```
/// use chrono::NaiveDate;
/// use kakaopack::parsing::kakao::{HalfDay, to_timestamp};
///
/// let day = NaiveDate::from_ymd_opt(2023, 10, 25).unwrap();
/// let ts = to_timestamp(day, HalfDay::Pm, 3, 45).unwrap();
/// assert_eq!(ts, day.and_hms_opt(15, 45, 0).unwrap());
/// ```
pub fn to_timestamp(
    date: NaiveDate,
    marker: HalfDay,
    hour: u32,
    minute: u32,
) -> Option<NaiveDateTime> {
    let hour = to_24_hour(marker, hour);
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::hours(i64::from(hour)))?
        .checked_add_signed(Duration::minutes(i64::from(minute)))
}

/// A 12-hour clock time as written in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub marker: HalfDay,
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    /// Resolves this time on the given date. See [`to_timestamp`].
    pub fn on(self, date: NaiveDate) -> Option<NaiveDateTime> {
        to_timestamp(date, self.marker, self.hour, self.minute)
    }
}

/// Calendar date notations used by KakaoTalk exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateNotation {
    /// `2023년 10월 25일`
    Korean,
    /// `2023. 10. 25.`
    Dotted,
}

impl DateNotation {
    /// Header notations, in the order they are tried.
    pub fn all() -> &'static [DateNotation] {
        &[DateNotation::Korean, DateNotation::Dotted]
    }

    /// Regex fragment capturing year, month and day. Not anchored.
    pub fn pattern(self) -> &'static str {
        match self {
            DateNotation::Korean => r"([0-9]{4})년 ([0-9]{1,2})월 ([0-9]{1,2})일",
            DateNotation::Dotted => r"([0-9]{4})\. ([0-9]{1,2})\. ([0-9]{1,2})\.",
        }
    }
}

/// Resolves a written year, month and day to a calendar date.
///
/// Month and day are offsets, not validated fields: an impossible day spills
/// into the following month, month 13 into the next year, and zero steps back
/// one unit. Returns `None` only outside chrono's calendar.
///
/// ```
/// use chrono::NaiveDate;
/// use kakaopack::parsing::kakao::calendar_date;
///
/// assert_eq!(calendar_date(2023, 10, 25), NaiveDate::from_ymd_opt(2023, 10, 25));
/// assert_eq!(calendar_date(2023, 2, 30), NaiveDate::from_ymd_opt(2023, 3, 2));
/// assert_eq!(calendar_date(2023, 13, 1), NaiveDate::from_ymd_opt(2024, 1, 1));
/// ```
pub fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let new_year = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let month_start = match month.checked_sub(1) {
        Some(offset) => new_year.checked_add_months(Months::new(offset))?,
        None => new_year.checked_sub_months(Months::new(1))?,
    };
    month_start.checked_add_signed(Duration::days(i64::from(day) - 1))
}

/// Builds a date from three consecutive capture groups starting at `first`.
fn date_from_captures(caps: &Captures<'_>, first: usize) -> Option<NaiveDate> {
    let year = caps.get(first)?.as_str().parse().ok()?;
    let month = caps.get(first + 1)?.as_str().parse().ok()?;
    let day = caps.get(first + 2)?.as_str().parse().ok()?;
    calendar_date(year, month, day)
}

/// Builds a clock time from marker, hour and minute groups starting at `first`.
fn clock_from_captures(caps: &Captures<'_>, first: usize) -> Option<ClockTime> {
    Some(ClockTime {
        marker: HalfDay::from_token(caps.get(first)?.as_str())?,
        hour: caps.get(first + 1)?.as_str().parse().ok()?,
        minute: caps.get(first + 2)?.as_str().parse().ok()?,
    })
}

/// Classification of one trimmed, non-empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Date-section header; later undated lines inherit this date.
    Header(NaiveDate),

    /// Desktop message line that needs the current section date.
    Bracketed {
        time: ClockTime,
        sender: &'a str,
        content: &'a str,
    },

    /// Mobile message line carrying its own date.
    Dated {
        notation: DateNotation,
        date: NaiveDate,
        timestamp: NaiveDateTime,
        sender: &'a str,
        content: &'a str,
    },

    /// Matches no grammar; belongs to the previous message.
    Continuation(&'a str),
}

/// Compiled line grammars.
///
/// Compile once and reuse for every line of a document.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    headers: Vec<Regex>,
    bracketed: Regex,
    dated: Vec<(DateNotation, Regex)>,
}

impl LineClassifier {
    /// Compiles all line grammars.
    pub fn new() -> Self {
        let markers = HalfDay::alternation();

        let headers = DateNotation::all()
            .iter()
            .map(|n| compile(n.pattern()))
            .collect();

        let bracketed = compile(&format!(
            r"^\[(.*?)\] \[({markers})\s*([0-9]{{1,2}}):([0-9]{{1,2}})\] (.*)$"
        ));

        let dated = [DateNotation::Dotted, DateNotation::Korean]
            .into_iter()
            .map(|n| {
                let pattern = format!(
                    r"^{} ({markers}) ([0-9]{{1,2}}):([0-9]{{1,2}}), (.*?) : (.*)$",
                    n.pattern()
                );
                (n, compile(&pattern))
            })
            .collect();

        Self {
            headers,
            bracketed,
            dated,
        }
    }

    /// Classifies a line that has already been trimmed.
    ///
    /// ```
    /// use kakaopack::parsing::kakao::{Line, LineClassifier};
    ///
    /// let classifier = LineClassifier::new();
    /// assert!(matches!(classifier.classify("2023년 10월 25일 수요일"), Line::Header(_)));
    /// assert!(matches!(
    ///     classifier.classify("[Alice] [오후 3:45] hello"),
    ///     Line::Bracketed { sender: "Alice", content: "hello", .. }
    /// ));
    /// assert_eq!(classifier.classify("just text"), Line::Continuation("just text"));
    /// ```
    pub fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        self.header(line)
            .or_else(|| self.bracketed(line))
            .or_else(|| self.dated(line))
            .unwrap_or(Line::Continuation(line))
    }

    fn header<'a>(&self, line: &'a str) -> Option<Line<'a>> {
        if !line.contains(HEADER_SEPARATOR) && line.contains(':') {
            return None;
        }
        self.headers
            .iter()
            .find_map(|re| re.captures(line).and_then(|c| date_from_captures(&c, 1)))
            .map(Line::Header)
    }

    fn bracketed<'a>(&self, line: &'a str) -> Option<Line<'a>> {
        let caps = self.bracketed.captures(line)?;
        Some(Line::Bracketed {
            time: clock_from_captures(&caps, 2)?,
            sender: caps.get(1)?.as_str(),
            content: caps.get(5)?.as_str(),
        })
    }

    fn dated<'a>(&self, line: &'a str) -> Option<Line<'a>> {
        self.dated.iter().find_map(|(notation, re)| {
            let caps = re.captures(line)?;
            let date = date_from_captures(&caps, 1)?;
            let timestamp = clock_from_captures(&caps, 4)?.on(date)?;
            Some(Line::Dated {
                notation: *notation,
                date,
                timestamp,
                sender: caps.get(7)?.as_str(),
                content: caps.get(8)?.as_str(),
            })
        })
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    // Patterns are constants.
    Regex::new(pattern).unwrap()
}

/// Trims a physical line, including a leading byte-order mark.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
