use super::*;

#[test]
fn daily_allows_every_day() {
    let gate = DayGate::parse("daily");
    assert!(gate.allows(Weekday::Sat));
    assert!(gate.allows(Weekday::Mon));
}

#[test]
fn weekdays_excludes_weekend() {
    let gate = DayGate::parse("weekdays");
    assert!(gate.allows(Weekday::Fri));
    assert!(!gate.allows(Weekday::Sat));
    assert!(!gate.allows(Weekday::Sun));
}

#[test]
fn weekends_only_allows_sat_sun() {
    let gate = DayGate::parse("weekends");
    assert!(gate.allows(Weekday::Sun));
    assert!(!gate.allows(Weekday::Mon));
}

#[test]
fn named_day_list_is_comma_separated() {
    let gate = DayGate::parse("mon,wed,fri");
    assert!(gate.allows(Weekday::Mon));
    assert!(gate.allows(Weekday::Wed));
    assert!(!gate.allows(Weekday::Tue));
}

#[test]
fn unparseable_list_falls_back_to_daily() {
    let gate = DayGate::parse("nonsense");
    assert!(gate.allows(Weekday::Tue));
}
