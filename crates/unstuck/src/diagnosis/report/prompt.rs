/// Renders the copyable coaching prompt.
///
/// Downstream tools rely on the context block followed by exactly five
/// numbered output instructions, so keep both stable.
pub fn render_prompt(
    trouble_label: &str,
    time_label: &str,
    primary_name: &str,
    secondary_name: &str,
    confidence_pct: u8,
) -> String {
    format!(
        "You are a coach at the Reskilling Design Lab for working professionals.\n\
Using an AI-assisted, pattern-specific shortest path to improvement, put into words what is making me stuck right now, \
and narrow my actions from today down to three, taking my constraints (time, energy, family) as given.\n\
\n\
[Context]\n\
- Main difficulty: {trouble_label}\n\
- Weekday time available: {time_label}\n\
- Estimated stuck pattern: {primary_name}\n\
- Secondary tendency: {secondary_name}\n\
- Confidence (rough): {confidence_pct}%\n\
\n\
[Output format]\n\
1. What is really causing the jam (in a few words)\n\
2. Things I should stop doing (2)\n\
3. Actions for today, this week and this month (one each, very concrete)\n\
4. A concrete way to use AI (1, ready to copy and paste)\n\
5. How to recover when it does not work (3 steps)\n"
    )
}
