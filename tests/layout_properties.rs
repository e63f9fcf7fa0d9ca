//! Property-based tests for page layout.
//!
//! Properties Under Test:
//! - The page span is always at least one line
//! - Clamped top lines always lie in the valid range, and valid ones pass through
//! - Every pane of a pass lands on `clamp(base + span * page)`
//! - Unclamped neighbours share exactly `overlap` lines
//! - A second pass over an unchanged host changes nothing

use multipage::host::{Host, MemoryHost};
use multipage::layout::{clamp_top, page_span, LayoutEngine, LayoutOutcome};
use multipage::model::{DocumentId, GroupId, Overlap, ViewportId};
use proptest::prelude::*;

// ===== Arbitrary Strategies =====

/// One document in one group, shown by `panes` panes of equal `height`.
#[derive(Debug, Clone)]
struct Scenario {
    total_lines: usize,
    height: usize,
    panes: usize,
    overlap: usize,
    anchor_top: usize,
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (0usize..5000, 1usize..80, 2usize..7)
        .prop_flat_map(|(total_lines, height, panes)| {
            (
                Just(total_lines),
                Just(height),
                Just(panes),
                0usize..height + 3,
                1usize..total_lines.max(1) + 1,
            )
        })
        .prop_map(|(total_lines, height, panes, overlap, anchor_top)| Scenario {
            total_lines,
            height,
            panes,
            overlap,
            anchor_top,
        })
}

fn build_host(scenario: &Scenario) -> (MemoryHost, DocumentId, GroupId, Vec<ViewportId>) {
    let mut host = MemoryHost::new();
    let doc = host.add_document(scenario.total_lines);
    let group = host.add_group();
    let panes: Vec<ViewportId> = (0..scenario.panes)
        .map(|_| host.open_viewport(group, doc, scenario.height))
        .collect();
    let anchor_top = clamp_top(scenario.anchor_top, scenario.total_lines, scenario.height);
    host.set_top_line(panes[0], anchor_top)
        .expect("anchor is valid");
    (host, doc, group, panes)
}

fn tops(host: &MemoryHost, panes: &[ViewportId]) -> Vec<usize> {
    panes
        .iter()
        .map(|&pane| host.top_line(pane).expect("pane is valid"))
        .collect()
}

// ===== Properties =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn page_span_is_positive(height in 0usize..500, overlap in 0usize..600) {
        let span = page_span(height, Overlap::new(overlap));
        prop_assert!(span >= 1);
        if height > overlap {
            prop_assert_eq!(span, height - overlap);
        }
    }

    #[test]
    fn clamp_stays_in_range(desired in 0usize..10_000, total in 0usize..5000, height in 0usize..200) {
        let top = clamp_top(desired, total, height);
        let max_top = (total + 1).saturating_sub(height).max(1);
        prop_assert!(top >= 1);
        prop_assert!(top <= max_top);
        if (1..=max_top).contains(&desired) {
            prop_assert_eq!(top, desired);
        }
        prop_assert_eq!(clamp_top(top, total, height), top);
    }

    #[test]
    fn panes_land_on_clamped_page_offsets(scenario in arb_scenario()) {
        let (mut host, doc, group, panes) = build_host(&scenario);
        let base = host.top_line(panes[0]).expect("anchor is valid");
        let engine = LayoutEngine::new(Overlap::new(scenario.overlap));

        let outcome = engine.apply(&mut host, doc, group).expect("layout succeeds");

        prop_assert!(matches!(outcome, LayoutOutcome::Applied(_)));
        let span = page_span(scenario.height, Overlap::new(scenario.overlap));
        for (page, &pane) in panes.iter().enumerate() {
            let expected = clamp_top(base + span * page, scenario.total_lines, scenario.height);
            prop_assert_eq!(host.top_line(pane).unwrap(), expected);
            prop_assert!(host.scroll_bound(pane).unwrap());
        }
    }

    #[test]
    fn unclamped_neighbours_share_overlap_lines(scenario in arb_scenario()) {
        prop_assume!(scenario.overlap < scenario.height);
        let (mut host, doc, group, panes) = build_host(&scenario);
        let engine = LayoutEngine::new(Overlap::new(scenario.overlap));

        engine.apply(&mut host, doc, group).expect("layout succeeds");

        let tops = tops(&host, &panes);
        let max_top = (scenario.total_lines + 1).saturating_sub(scenario.height).max(1);
        for pair in tops.windows(2) {
            if pair[1] < max_top {
                let bottom = pair[0] + scenario.height - 1;
                prop_assert_eq!(pair[1] + scenario.overlap, bottom + 1);
            }
        }
    }

    #[test]
    fn second_pass_is_a_no_op(scenario in arb_scenario()) {
        let (mut host, doc, group, panes) = build_host(&scenario);
        let engine = LayoutEngine::new(Overlap::new(scenario.overlap));

        engine.apply(&mut host, doc, group).expect("first pass succeeds");
        let first = tops(&host, &panes);
        engine.apply(&mut host, doc, group).expect("second pass succeeds");

        prop_assert_eq!(tops(&host, &panes), first);
    }

    #[test]
    fn focus_survives_layout(scenario in arb_scenario(), focus in 0usize..7) {
        let (mut host, doc, group, panes) = build_host(&scenario);
        let focused = panes[focus % panes.len()];
        host.set_active_viewport(focused).expect("pane is valid");

        LayoutEngine::new(Overlap::new(scenario.overlap))
            .apply(&mut host, doc, group)
            .expect("layout succeeds");

        prop_assert_eq!(host.active_viewport(), Some(focused));
        prop_assert!(host.drain_events().is_empty());
    }
}
