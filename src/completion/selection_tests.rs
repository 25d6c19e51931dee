use super::*;
use proptest::prelude::*;

#[test]
fn test_new_state_has_no_selection() {
    let state = SelectionState::new(8);
    assert_eq!(state.selected(), None);
    assert!(!state.is_open());
    assert_eq!(state.scroll_offset(), 0);
}

#[test]
fn test_select_next_starts_at_first_and_opens() {
    let mut state = SelectionState::new(8);
    state.select_next(3);
    assert_eq!(state.selected(), Some(0));
    assert!(state.is_open());
}

#[test]
fn test_select_next_clamps_at_last() {
    let mut state = SelectionState::new(8);
    for _ in 0..10 {
        state.select_next(3);
    }
    assert_eq!(state.selected(), Some(2));
}

#[test]
fn test_select_previous_from_first_clears_but_stays_open() {
    let mut state = SelectionState::new(8);
    state.select_next(3);
    state.select_previous(3);
    assert_eq!(state.selected(), None);
    assert!(state.is_open());
}

#[test]
fn test_select_previous_without_selection_stays_none() {
    let mut state = SelectionState::new(8);
    state.select_previous(3);
    assert_eq!(state.selected(), None);
}

#[test]
fn test_navigation_ignored_without_rows() {
    let mut state = SelectionState::new(8);
    state.select_next(0);
    state.select_previous(0);
    assert_eq!(state.selected(), None);
    assert!(!state.is_open());
}

#[test]
fn test_close_clears_selection() {
    let mut state = SelectionState::new(8);
    state.select_next(3);
    state.close();
    assert!(!state.is_open());
    assert_eq!(state.selected(), None);
}

#[test]
fn test_select_index_ignores_out_of_range() {
    let mut state = SelectionState::new(8);
    state.select_index(1, 3);
    assert_eq!(state.selected(), Some(1));
    state.select_index(5, 3);
    assert_eq!(state.selected(), Some(1));
}

#[test]
fn test_clamp_to_empty_resets() {
    let mut state = SelectionState::new(8);
    state.select_next(3);
    state.clamp_to(0);
    assert_eq!(state.selected(), None);
}

#[test]
fn test_clamp_to_shorter_list_drops_stale_index() {
    let mut state = SelectionState::new(8);
    state.select_index(4, 5);
    state.clamp_to(2);
    assert_eq!(state.selected(), None);
}

#[test]
fn test_scrolls_down_to_keep_selection_visible() {
    let mut state = SelectionState::new(3);
    for _ in 0..5 {
        state.select_next(10);
    }
    assert_eq!(state.selected(), Some(4));
    assert_eq!(state.scroll_offset(), 2);
}

#[test]
fn test_scrolls_up_to_keep_selection_visible() {
    let mut state = SelectionState::new(3);
    for _ in 0..6 {
        state.select_next(10);
    }
    for _ in 0..4 {
        state.select_previous(10);
    }
    assert_eq!(state.selected(), Some(1));
    assert_eq!(state.scroll_offset(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The highlight never leaves [0, row_count) and the highlighted row is
    // always inside the visible window.
    #[test]
    fn prop_selection_stays_in_bounds(
        row_count in 0usize..20,
        max_visible in 1usize..6,
        moves in prop::collection::vec(prop::bool::ANY, 0..40),
    ) {
        let mut state = SelectionState::new(max_visible);
        for down in moves {
            if down {
                state.select_next(row_count);
            } else {
                state.select_previous(row_count);
            }
            if let Some(index) = state.selected() {
                prop_assert!(index < row_count);
                prop_assert!(index >= state.scroll_offset());
                prop_assert!(index < state.scroll_offset() + max_visible);
            }
        }
    }
}
