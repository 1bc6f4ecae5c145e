use pressence::ai::prompt_builder::{
    MAX_NAME_LENGTH, SYSTEM_INSTRUCTION, build_prompt, sanitize_subject_name,
};
use pressence::core::models::SearchResultItem;

fn item(rank: usize, title: &str, link: &str) -> SearchResultItem {
    SearchResultItem {
        rank,
        title: title.to_string(),
        link: link.to_string(),
        snippet: String::new(),
        source_label: String::new(),
    }
}

#[test]
fn test_sanitize_subject_name_strips_control_chars() {
    assert_eq!(sanitize_subject_name("Jane\u{0000} Doe\n"), "Jane Doe");
    assert_eq!(sanitize_subject_name("  Jane Doe  "), "Jane Doe");
    assert_eq!(sanitize_subject_name("\u{007F}"), "");
}

#[test]
fn test_sanitize_subject_name_truncates() {
    let long_name = "a".repeat(MAX_NAME_LENGTH + 50);
    assert_eq!(sanitize_subject_name(&long_name).chars().count(), MAX_NAME_LENGTH);
}

#[test]
fn test_prompt_names_subject_and_persona() {
    let prompt = build_prompt("Jane Doe", &[]);
    assert!(prompt.contains("premium PR strategist for luxury real estate"));
    assert!(prompt.contains("for the person: \"Jane Doe\""));
}

#[test]
fn test_prompt_states_format_rules() {
    let prompt = build_prompt("Jane Doe", &[]);
    assert!(prompt.contains("EXACTLY two sections"));
    assert!(prompt.contains("Summary: <one sharp sentence (<=220 characters)"));
    assert!(prompt.contains("Conclusion: <1-2 sentences (<=320 characters)"));
    assert!(prompt.contains("max 2-3 names"));
    assert!(prompt.contains("do NOT establish authority yet"));
    assert!(prompt.contains("profiles/directories/social links"));
    assert!(prompt.contains("no hedging"));
}

#[test]
fn test_prompt_embeds_results_as_json() {
    let results = vec![
        item(1, "Jane Doe - Realtor", "https://example.com/jane"),
        item(2, "Jane Doe | LinkedIn", "https://www.linkedin.com/in/janedoe"),
    ];
    let prompt = build_prompt("Jane Doe", &results);

    assert!(prompt.contains("Results JSON (first 2):"));
    let json_start = prompt.find('[').unwrap();
    let parsed: serde_json::Value = serde_json::from_str(prompt[json_start..].trim()).unwrap();
    assert_eq!(parsed[0]["rank"], 1);
    assert_eq!(parsed[1]["link"], "https://www.linkedin.com/in/janedoe");
    assert_eq!(parsed[1]["displayLink"], "");
}

#[test]
fn test_system_instruction_limits_output() {
    assert!(SYSTEM_INSTRUCTION.contains("Never include code fences or JSON"));
    assert!(SYSTEM_INSTRUCTION.contains("Max 2 lines"));
}
