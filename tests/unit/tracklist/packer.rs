use super::*;
use crate::test_support::BoxTypesetter;

fn style(max_lines: usize) -> PackStyle {
    PackStyle {
        weight: FontWeight::Regular,
        size_px: 10.0,
        max_lines,
    }
}

fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Track {i}")).collect()
}

#[test]
fn empty_list_packs_to_nothing() {
    let packed = pack(&BoxTypesetter, &[], false, &style(5)).unwrap();
    assert!(packed.is_empty());
    assert!(packed.widths().is_empty());
}

#[test]
fn indexed_numbering_continues_across_columns() {
    let packed = pack(&BoxTypesetter, &names(5), true, &style(3)).unwrap();
    assert_eq!(packed.columns.len(), 2);
    let prefixes = |c: &Column| -> Vec<String> {
        c.lines.iter().map(|l| l[..3].to_string()).collect()
    };
    assert_eq!(prefixes(&packed.columns[0]), ["01.", "02.", "03."]);
    assert_eq!(prefixes(&packed.columns[1]), ["04.", "05."]);
    assert_eq!(packed.columns[0].lines[0], "01. Track 1");
}

#[test]
fn column_count_is_ceiling_of_tracks_over_capacity() {
    for (n, cap, expected) in [(1, 5, 1), (5, 5, 1), (6, 5, 2), (11, 5, 3)] {
        let packed = pack(&BoxTypesetter, &names(n), false, &style(cap)).unwrap();
        assert_eq!(packed.columns.len(), expected, "n={n} cap={cap}");
        let total: usize = packed.columns.iter().map(|c| c.lines.len()).sum();
        assert_eq!(total, n);
        assert!(packed.columns.iter().all(|c| c.lines.len() <= cap));
    }
}

#[test]
fn width_is_widest_line_in_column() {
    let tracks = vec!["ab".to_string(), "abcdef".to_string(), "abc".to_string()];
    let packed = pack(&BoxTypesetter, &tracks, false, &style(2)).unwrap();
    assert_eq!(packed.widths(), vec![30.0, 15.0]);
}

#[test]
fn index_pad_grows_past_99_tracks() {
    assert_eq!(index_width(0), 2);
    assert_eq!(index_width(9), 2);
    assert_eq!(index_width(99), 2);
    assert_eq!(index_width(100), 3);

    let packed = pack(&BoxTypesetter, &names(100), true, &style(50)).unwrap();
    assert_eq!(packed.columns[0].lines[0], "001. Track 1");
    assert_eq!(packed.columns[1].lines[49], "100. Track 100");
}

#[test]
fn long_names_are_kept_whole() {
    let long = "x".repeat(400);
    let packed = pack(&BoxTypesetter, std::slice::from_ref(&long), false, &style(5)).unwrap();
    assert_eq!(packed.columns[0].lines[0], long);
    assert_eq!(packed.columns[0].width, 2000.0);
}

#[test]
fn offsets_advance_by_width_plus_gap() {
    let tracks = vec!["abcd".to_string(), "ab".to_string()];
    let packed = pack(&BoxTypesetter, &tracks, false, &style(1)).unwrap();
    assert_eq!(packed.column_offsets(104.0, 50.0), vec![104.0, 174.0]);
}

#[test]
fn zero_capacity_is_rejected() {
    assert!(pack(&BoxTypesetter, &names(1), false, &style(0)).is_err());
}
