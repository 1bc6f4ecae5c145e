use crate::core::models::SearchResultItem;

/// Upper bound on the subject name once sanitized.
pub const MAX_NAME_LENGTH: usize = 200;

/// Hard ceiling stated to the model for the `Summary:` line.
pub const SUMMARY_MAX_CHARS: usize = 220;

/// Hard ceiling stated to the model for the `Conclusion:` line.
pub const CONCLUSION_MAX_CHARS: usize = 320;

pub const SYSTEM_INSTRUCTION: &str = "Be concise, premium, and authoritative. Never include code fences or JSON in responses. Max 2 lines total.";

/// Removes control characters, trims, and hard-truncates a subject name.
#[must_use]
pub fn sanitize_subject_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .chars()
        .take(MAX_NAME_LENGTH)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Builds the user prompt for the model. The format rules are instructions
/// only; nothing downstream checks the reply against them.
#[must_use]
pub fn build_prompt(name: &str, results: &[SearchResultItem]) -> String {
    let results_json = serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a premium PR strategist for luxury real estate markets.
Analyze the following top search results for the person: \"{name}\".

GOAL: Create crisp, persuasive copy that creates urgency and FOMO around missing press.

Rules for output:
1) Output EXACTLY two sections with these labels, in this order:
   Summary: <one sharp sentence (<={SUMMARY_MAX_CHARS} characters) describing what appears at first glance>
   Conclusion: <1-2 sentences (<={CONCLUSION_MAX_CHARS} characters) persuading that their current presence is NOT enough and that they need strategic PR in elite publications>
2) If you find any notable outlets in the results (e.g., Forbes, Bloomberg, local business journals), briefly acknowledge them in the Summary or start of Conclusion (max 2-3 names), then state they do NOT establish authority yet.
3) If results are mostly profiles/directories/social links, say so plainly and emphasize lack of authority signals.
4) Use confident, high-status tone; no hedging, no apologies, no disclaimers.
5) Focus on FOMO and opportunity cost (lost trust, deals, and positioning) without sounding scammy.

Results JSON (first {count}):
{results_json}
",
        count = results.len(),
    )
}
