use super::*;

#[test]
fn duration_is_zero_padded_minutes_and_seconds() {
    assert_eq!(format_duration(0), "00:00");
    assert_eq!(format_duration(290_320), "04:50");
    assert_eq!(format_duration(59_999), "00:59");
    assert_eq!(format_duration(6_000_000), "100:00");
}

#[test]
fn release_dates_follow_precision() {
    assert_eq!(
        format_release_date("2017-06-09", DatePrecision::Day).unwrap(),
        "June 09, 2017"
    );
    assert_eq!(
        format_release_date("2017-06", DatePrecision::Month).unwrap(),
        "June 01, 2017"
    );
    assert_eq!(
        format_release_date("2017", DatePrecision::Year).unwrap(),
        "January 01, 2017"
    );
    assert!(format_release_date("2017-06", DatePrecision::Day).is_err());
}

#[test]
fn precision_parses_catalog_names() {
    assert_eq!("day".parse::<DatePrecision>().unwrap(), DatePrecision::Day);
    assert_eq!("year".parse::<DatePrecision>().unwrap(), DatePrecision::Year);
    assert!("week".parse::<DatePrecision>().is_err());
}

#[test]
fn long_labels_fall_back_to_artist() {
    assert_eq!(display_label("Partisan Records", "CAS"), "Partisan Records");
    let long = "L".repeat(MAX_LABEL_CHARS);
    assert_eq!(display_label(&long, "CAS"), "CAS");
    let short = "L".repeat(MAX_LABEL_CHARS - 1);
    assert_eq!(display_label(&short, "CAS"), short);
}

#[test]
fn dash_queries_become_fielded() {
    assert_eq!(
        normalize_track_query("Apocalypse - Cigarettes After Sex"),
        r#"track:"Apocalypse" artist:"Cigarettes After Sex""#
    );
    assert_eq!(normalize_track_query("Apocalypse"), "Apocalypse");
    let fielded = r#"track:"A - B""#;
    assert_eq!(normalize_track_query(fielded), fielded);
}

#[test]
fn relaxed_query_drops_artist_filter() {
    assert_eq!(
        relaxed_query(r#"track:"Apocalypse" artist:"Cigarettes After Sex""#).as_deref(),
        Some(r#"track:"Apocalypse""#)
    );
    assert_eq!(relaxed_query("Apocalypse"), None);
}
