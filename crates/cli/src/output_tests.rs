use super::*;

#[test]
fn zero_timestamp_renders_as_dash() {
    assert_eq!(format_time_ago(0), "-");
}

#[test]
fn elapsed_buckets_by_magnitude() {
    assert_eq!(format_elapsed(5), "5s");
    assert_eq!(format_elapsed(125), "2m");
    assert_eq!(format_elapsed(7200), "2h");
    assert_eq!(format_elapsed(172_800), "2d");
}

#[test]
fn handle_list_prints_empty_message_for_text() {
    let items: Vec<u8> = vec![];
    handle_list(OutputFormat::Text, &items, "nothing here", |_, _| {}).unwrap();
}
