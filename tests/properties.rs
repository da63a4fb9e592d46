//! Property tests for the balancing search against the in-memory layout host.
//!
//! Every case builds a container of random width holding one wrapper of random words, then
//! checks the search's guarantees: repeatable results, ratio endpoints, the line count kept on
//! `[upper, full width]`, and a logarithmic number of probes.

use proptest::prelude::*;
use wrap_balancer::layout::{ElementId, LayoutDocument, Padding, TextStyle};
use wrap_balancer::{balance, BalanceReport, Config, LayoutHost, Px, SearchOutcome};

struct Case {
    doc: LayoutDocument,
    container: ElementId,
    wrapper: ElementId,
}

fn build(width: u16, advance: u8, words: &[usize]) -> Case {
    let text = words
        .iter()
        .enumerate()
        .map(|(i, &len)| {
            let letter = (b'a' + (i % 26) as u8) as char;
            letter.to_string().repeat(len)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut doc = LayoutDocument::new();
    let container = doc.add_container(Px::from(width), Padding::empty());
    let wrapper = doc
        .add_wrapper(
            container,
            text,
            TextStyle::monospace(Px(f32::from(advance)), Px(18.0)),
        )
        .expect("container exists");
    Case {
        doc,
        container,
        wrapper,
    }
}

fn outcome(report: BalanceReport) -> SearchOutcome {
    match report {
        BalanceReport::Applied { outcome, .. } => outcome,
        other => panic!("expected a search, got {other:?}"),
    }
}

fn case_strategy() -> impl Strategy<Value = (u16, u8, Vec<usize>)> {
    (
        40u16..600,
        4u8..=12,
        prop::collection::vec(1usize..=9, 1..30),
    )
}

fn height_at(case: &mut Case, width: Option<Px>) -> Px {
    case.doc.set_max_width(case.wrapper, width);
    case.doc.client_height(case.container)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn repeated_balancing_is_bit_identical(
        (width, advance, words) in case_strategy(),
        ratio in 0.0f32..=1.0,
    ) {
        let mut case = build(width, advance, &words);
        let config = Config::default();
        let first = balance(&mut case.doc, case.wrapper, ratio, &config).width();
        let second = balance(&mut case.doc, case.wrapper, ratio, &config).width();
        prop_assert_eq!(first.map(|w| w.0.to_bits()), second.map(|w| w.0.to_bits()));
    }

    #[test]
    fn ratio_endpoints_and_direction((width, advance, words) in case_strategy()) {
        let mut case = build(width, advance, &words);
        let config = Config::default();
        let full = Px::from(width);

        let at_zero = balance(&mut case.doc, case.wrapper, 0.0, &config);
        prop_assert_eq!(at_zero.width(), Some(full));

        let found = outcome(balance(&mut case.doc, case.wrapper, 1.0, &config));
        prop_assert_eq!(case.doc.max_width(case.wrapper), Some(found.upper));

        // moving towards ratio 1 moves towards `upper`, whichever side of `full` it is on
        let widths: Vec<f32> = (0..=10).map(|step| found.width_for(step as f32 / 10.0).0).collect();
        for pair in widths.windows(2) {
            if found.upper <= full {
                prop_assert!(pair[1] <= pair[0] + 1e-3);
            } else {
                prop_assert!(pair[1] + 1e-3 >= pair[0]);
            }
        }
    }

    #[test]
    fn widths_from_upper_to_full_keep_the_line_count((width, advance, words) in case_strategy()) {
        let mut case = build(width, advance, &words);
        let found = outcome(balance(&mut case.doc, case.wrapper, 1.0, &Config::default()));

        let base = height_at(&mut case, None);
        let from = found.upper.0.ceil() as u16;
        for w in from..=width {
            prop_assert_eq!(height_at(&mut case, Some(Px::from(w))), base, "width {}", w);
        }
    }

    #[test]
    fn widths_below_lower_add_lines((width, advance, words) in case_strategy()) {
        let mut case = build(width, advance, &words);
        let mut config = Config::default();
        config.refine_lower_bound(false);

        let base = height_at(&mut case, None);
        let start = Px::from(width) / 2.0 - Px(0.25);
        prop_assume!(height_at(&mut case, Some(start)) != base);

        let found = outcome(balance(&mut case.doc, case.wrapper, 1.0, &config));
        let below = found.lower.0.ceil() as u16;
        for w in 1..below {
            prop_assert!(height_at(&mut case, Some(Px::from(w))) > base, "width {}", w);
        }
    }

    #[test]
    fn probes_grow_logarithmically(
        (width, advance, words) in case_strategy(),
        refine in any::<bool>(),
    ) {
        let mut case = build(width, advance, &words);
        let mut config = Config::default();
        config.refine_lower_bound(refine);

        let found = outcome(balance(&mut case.doc, case.wrapper, 1.0, &config));
        let bound = (f32::from(width)).log2().ceil() as usize + 2;
        prop_assert!(found.probes <= bound, "{} probes for {}px", found.probes, width);
    }
}
