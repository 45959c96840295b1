use super::*;

#[test]
fn strips_csi_color_codes() {
    assert_eq!(strip_ansi_escapes("\x1b[31mred\x1b[0m"), "red");
}

#[test]
fn strips_cursor_movement() {
    assert_eq!(strip_ansi_escapes("a\x1b[2Kb\x1b[1;1Hc"), "abc");
}

#[test]
fn strips_osc_terminated_by_bel() {
    assert_eq!(strip_ansi_escapes("\x1b]0;title\x07rest"), "rest");
}

#[test]
fn strips_osc_terminated_by_st() {
    assert_eq!(strip_ansi_escapes("\x1b]0;title\x1b\\rest"), "rest");
}

#[test]
fn passes_through_plain_text() {
    assert_eq!(strip_ansi_escapes("Do you want to run Bash?"), "Do you want to run Bash?");
}
