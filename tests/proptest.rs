//! Property-based tests for kakaopack.
//!
//! These tests generate random documents to find edge cases in the line
//! classifier and the post-processing steps.

use chrono::{NaiveDate, Timelike};
use proptest::prelude::*;

use kakaopack::core::{FilterConfig, apply_filters, merge_consecutive};
use kakaopack::parsers::{KakaoParser, parse_kakao_chat};
use kakaopack::parsing::kakao::{HalfDay, to_24_hour, to_timestamp};

/// One physical line drawn from realistic KakaoTalk shapes plus noise.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        // Desktop headers
        (2015i32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!(
            "--------------- {y}년 {m}월 {d}일 수요일 ---------------"
        )),
        (2015i32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y}. {m}. {d}.")),
        // Bracketed messages
        (
            prop::sample::select(vec!["지수", "민수", "Alice", "Bob"]),
            prop::sample::select(vec!["오전", "오후", "AM", "PM"]),
            1u32..13,
            0u32..60,
            prop::sample::select(vec!["안녕", "hi", "ㅋㅋㅋ", "a : b", "[x] y"]),
        )
            .prop_map(|(s, mk, h, mi, c)| format!("[{s}] [{mk} {h}:{mi:02}] {c}")),
        // Inline-dated messages
        (
            2015i32..2030,
            1u32..13,
            1u32..29,
            prop::sample::select(vec!["오전", "오후", "AM", "PM"]),
            1u32..13,
            0u32..60,
        )
            .prop_map(|(y, m, d, mk, h, mi)| format!("{y}. {m}. {d}. {mk} {h}:{mi:02}, 민수 : 메시지")),
        // Continuations and noise
        prop::sample::select(vec![
            "second line".to_string(),
            "두 번째 줄".to_string(),
            String::new(),
            "   ".to_string(),
            "저장한 날짜 : 2023-10-25".to_string(),
            "🎉🔥 emoji".to_string(),
            "[broken [line".to_string(),
        ]),
    ]
}

fn arb_document(max_lines: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..max_lines).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// The parser is total over arbitrary text
    #[test]
    fn parse_never_panics(text in any::<String>()) {
        let _ = parse_kakao_chat(&text);
    }

    /// The parser is total over structured documents
    #[test]
    fn parse_structured_never_panics(doc in arb_document(40)) {
        let _ = parse_kakao_chat(&doc);
    }

    /// Parsing twice gives the same result
    #[test]
    fn parse_is_idempotent(doc in arb_document(40)) {
        prop_assert_eq!(parse_kakao_chat(&doc), parse_kakao_chat(&doc));
    }

    /// No message is ever created with empty content
    #[test]
    fn content_never_empty(doc in arb_document(40)) {
        for msg in parse_kakao_chat(&doc) {
            prop_assert!(!msg.content.is_empty());
            prop_assert!(!msg.content.starts_with('\n'));
        }
    }

    /// Every physical line is accounted for exactly once
    #[test]
    fn report_accounts_for_every_line(doc in arb_document(40)) {
        let outcome = KakaoParser::new().parse_with_report(&doc);
        let r = outcome.report;
        prop_assert_eq!(r.lines, doc.lines().count());
        prop_assert_eq!(
            r.lines,
            r.blank_lines + r.headers + r.messages + r.continuations + r.dropped()
        );
        prop_assert_eq!(r.messages, outcome.messages.len());
    }

    /// Blank lines change nothing
    #[test]
    fn blank_lines_are_inert(doc in arb_document(30), pad in 1usize..4) {
        let padded: String = doc
            .lines()
            .map(|l| format!("{l}{}", "\n   ".repeat(pad)))
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(parse_kakao_chat(&doc), parse_kakao_chat(&padded));
    }

    /// Output follows source line order
    #[test]
    fn order_is_preserved(minutes in prop::collection::vec(0u32..60, 1..30)) {
        let mut minutes = minutes;
        minutes.sort_unstable();
        let doc = std::iter::once("2023년 10월 25일 수요일".to_string())
            .chain(minutes.iter().enumerate().map(|(i, m)| format!("[U{i}] [오전 9:{m:02}] body {i}")))
            .collect::<Vec<_>>()
            .join("\n");

        let messages = parse_kakao_chat(&doc);
        prop_assert_eq!(messages.len(), minutes.len());
        for (i, msg) in messages.iter().enumerate() {
            prop_assert_eq!(&msg.sender, &format!("U{i}"));
            prop_assert_eq!(msg.timestamp.minute(), minutes[i]);
        }
    }

    /// A document of only continuation text yields nothing
    #[test]
    fn plain_text_yields_nothing(lines in prop::collection::vec("[a-z ]{0,20}", 0..10)) {
        prop_assert!(parse_kakao_chat(&lines.join("\n")).is_empty());
    }

    // ============================================
    // TIME NORMALIZATION
    // ============================================

    /// 12-hour to 24-hour conversion over the whole clock
    #[test]
    fn to_24_hour_covers_clock(hour in 1u32..13) {
        let am = to_24_hour(HalfDay::Am, hour);
        let pm = to_24_hour(HalfDay::Pm, hour);
        prop_assert!(am < 12);
        prop_assert!((12..24).contains(&pm));
        prop_assert_eq!(pm - am, 12);
    }

    /// In-range times land on the given date with zero seconds
    #[test]
    fn timestamp_stays_on_date(hour in 1u32..13, minute in 0u32..60, pm in any::<bool>()) {
        let date = NaiveDate::from_ymd_opt(2023, 10, 25).unwrap();
        let marker = if pm { HalfDay::Pm } else { HalfDay::Am };
        let ts = to_timestamp(date, marker, hour, minute).unwrap();
        prop_assert_eq!(ts.date(), date);
        prop_assert_eq!(ts.minute(), minute);
        prop_assert_eq!(ts.second(), 0);
    }

    // ============================================
    // POST-PROCESSING
    // ============================================

    /// Merge never increases count and never leaves equal neighbours
    #[test]
    fn merge_collapses_runs(doc in arb_document(40)) {
        let messages = parse_kakao_chat(&doc);
        let original = messages.len();
        let merged = merge_consecutive(messages);
        prop_assert!(merged.len() <= original);
        for pair in merged.windows(2) {
            prop_assert_ne!(&pair[0].sender, &pair[1].sender);
        }
    }

    /// No filter means passthrough
    #[test]
    fn no_filter_is_passthrough(doc in arb_document(30)) {
        let messages = parse_kakao_chat(&doc);
        let filtered = apply_filters(messages.clone(), &FilterConfig::new());
        prop_assert_eq!(filtered, messages);
    }

    /// Sender filter only keeps matching senders
    #[test]
    fn sender_filter_only_keeps_matching(doc in arb_document(30)) {
        let config = FilterConfig::new().with_sender("alice");
        for msg in apply_filters(parse_kakao_chat(&doc), &config) {
            prop_assert!(msg.sender.eq_ignore_ascii_case("alice"));
        }
    }
}
