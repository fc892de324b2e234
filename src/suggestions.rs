//! Suggested catalog additions for inputs the catalog keeps failing on.
//!
//! Suggestions are drafts for a human to review, not answers served to
//! users, so the heuristics can afford to be blunt keyword checks. The
//! rules live in one ordered table; the first matching rule wins.

/// A suggestion rule: when `matches` accepts the normalized input, propose
/// (`pattern`, `response`) as the catalog addition.
struct SuggestionRule {
    matches: fn(&str) -> bool,
    pattern: &'static str,
    response: &'static str,
}

fn asks_name(input: &str) -> bool {
    input.contains("what") && input.contains("name")
}

fn asks_creator(input: &str) -> bool {
    input.contains("who")
        && (input.contains("create") || input.contains("made") || input.contains("develop"))
}

fn asks_wellbeing(input: &str) -> bool {
    input.contains("how") && input.contains("are")
}

fn asks_joke(input: &str) -> bool {
    input.contains("joke") || input.contains("funny")
}

fn asks_help(input: &str) -> bool {
    input.contains("help") || input.contains("assist")
}

const SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        matches: asks_name,
        pattern: "what is your name",
        response: "My name is Ember. How can I help you?",
    },
    SuggestionRule {
        matches: asks_creator,
        pattern: "who created you",
        response: "I was created by the team behind this assistant.",
    },
    SuggestionRule {
        matches: asks_wellbeing,
        pattern: "how are you",
        response: "I'm doing well, thank you for asking!",
    },
    SuggestionRule {
        matches: asks_joke,
        pattern: "tell me a joke",
        response: "Why did the chatbot cross the road? To get to the other server!",
    },
    SuggestionRule {
        matches: asks_help,
        pattern: "can you help me",
        response: "Absolutely! What do you need help with?",
    },
];

/// Proposes a (pattern, response) catalog addition for an input the
/// catalog repeatedly failed to answer.
///
/// Rules are evaluated against the normalized input in table order. When
/// none applies, the fallback proposes the verbatim raw input as the
/// pattern with an apology that echoes it, leaving the phrasing decision
/// to the human reviewer.
pub fn suggest_addition(raw_input: &str, normalized: &str) -> (String, String) {
    for rule in SUGGESTION_RULES {
        if (rule.matches)(normalized) {
            return (rule.pattern.to_string(), rule.response.to_string());
        }
    }
    (
        raw_input.to_string(),
        format!("I'm not sure how to respond to \"{raw_input}\". Can you try asking something else?"),
    )
}
