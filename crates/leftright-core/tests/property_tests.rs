mod common;

use common::session;
use leftright_core::layouts::Hand;
use leftright_core::metrics;
use proptest::prelude::*;

prop_compose! {
    fn arb_run()(
        text in "[abcd ]{1,40}",
        gaps in proptest::collection::vec(0u64..2_000, 40),
    ) -> (String, Vec<u64>) {
        let mut t = 0;
        let times = gaps.iter().take(text.len()).map(|g| { t += g; t }).collect();
        (text, times)
    }
}

proptest! {
    #[test]
    fn prop_hand_time_never_exceeds_elapsed((text, times) in arb_run()) {
        let mut s = session(&text);
        s.start_at(0);
        for (c, &t) in text.chars().zip(times.iter()) {
            s.type_char(c, t);
        }
        let layout = s.layout().clone();
        let target: Vec<char> = text.chars().collect();

        // Dwell times of both hands are disjoint slices of the whole run.
        let dwell = |hand: Hand| -> u64 {
            target.iter().enumerate()
                .filter(|(_, c)| layout.classify(**c) == hand)
                .map(|(i, _)| times[i] - if i == 0 { 0 } else { times[i - 1] })
                .sum()
        };
        let end = *times.last().unwrap();
        prop_assert!(dwell(Hand::Left) + dwell(Hand::Right) <= end);

        let report = s.report().unwrap();
        prop_assert_eq!(
            report.left.wpm,
            metrics::hand_wpm(&target, s.timestamps(), 0, &layout, Hand::Left)
        );
    }

    #[test]
    fn prop_error_streak_is_bounded(keys in "[abcd]{0,60}") {
        let mut s = session(&"a".repeat(60));
        for (i, c) in keys.chars().enumerate() {
            s.type_char(c, i as u64);
        }
        let typed = s.input();
        let tail = typed.chars().rev().take_while(|&c| c != 'a').count();
        prop_assert!(tail <= 5);
    }

    #[test]
    fn prop_accuracy_is_a_percentage(input in "[ab]{0,20}", target in "[ab]{20}") {
        let i: Vec<char> = input.chars().collect();
        let t: Vec<char> = target.chars().collect();
        prop_assert!(metrics::accuracy(&i, &t) <= 100);
    }
}
