use super::*;
use crate::vendor::Vendor;

#[test]
fn scenario_3_approval_prompt_extraction() {
    let ring = "Do you want to run Bash?  1. Yes  2. Yes, and don't ask again  3. No, Esc to cancel";
    let prompt = detect_approval_prompt(ring, Vendor::Claude).expect("prompt detected");
    assert_eq!(prompt.prompt_text, "Do you want to run Bash?");
    assert_eq!(
        prompt.poll_options,
        vec!["Yes".to_string(), "Yes, and don't ask again".to_string(), "No".to_string()]
    );
}

#[test]
fn no_prompt_present_yields_none() {
    let ring = "assistant is thinking...";
    assert_eq!(detect_approval_prompt(ring, Vendor::Claude), None);
}

#[test]
fn vendor_without_approval_flow_yields_none() {
    let ring = "Do you want to run Bash?  1. Yes";
    assert_eq!(detect_approval_prompt(ring, Vendor::Pi), None);
}

#[test]
fn prompt_phrase_without_option_phrase_yields_none() {
    let ring = "Do you want to run Bash? still thinking";
    assert_eq!(detect_approval_prompt(ring, Vendor::Claude), None);
}

#[test]
fn ansi_noise_between_prompt_and_options_is_stripped() {
    let ring = "\x1b[2KDo you want to run Bash?\x1b[1;1H  1. Yes  2. No";
    let prompt = detect_approval_prompt(ring, Vendor::Claude).expect("prompt detected");
    assert_eq!(prompt.prompt_text, "Do you want to run Bash?");
    assert_eq!(prompt.poll_options, vec!["Yes".to_string(), "No".to_string()]);
}

#[test]
fn codex_prompt_phrase_is_detected() {
    let ring =
        "Would you like to run the following command: npm test?  1. Yes, proceed  2. No, cancel";
    let prompt = detect_approval_prompt(ring, Vendor::Codex).expect("prompt detected");
    assert!(prompt.prompt_text.starts_with("Would you like to run"));
    assert_eq!(prompt.poll_options, vec!["Yes, proceed".to_string(), "No, cancel".to_string()]);
}
