//! Rule-based intent classification.
//!
//! Classification is an ordered list of (pattern, extractor) rules
//! evaluated first-match-wins over the lowercased, trimmed input. The rule
//! table is data, not control flow, so the priority order is testable on
//! its own. Classification is total: every input produces an intent, and
//! nothing here touches any state.

use std::sync::LazyLock;

use regex::Regex;

/// The classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Help,
    Checkout,
    ViewCart,
    OrderStatus,
    AddToCart,
    Search,
    Browse,
    Unknown,
}

/// Result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The matched intent.
    pub intent: Intent,
    /// Query fragment extracted from the utterance (may be empty).
    pub query: String,
}

struct Rule {
    intent: Intent,
    pattern: Regex,
    extract: fn(&str) -> String,
}

impl Rule {
    fn new(intent: Intent, pattern: &str, extract: fn(&str) -> String) -> Self {
        Self {
            intent,
            pattern: Regex::new(pattern).expect("intent pattern must compile"),
            extract,
        }
    }
}

/// Priority-ordered classification rules. The first matching rule wins and
/// later rules are never evaluated.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            Intent::Greeting,
            r"^(hi|hello|hey|howdy|yo|sup|greetings)\b",
            no_query,
        ),
        Rule::new(
            Intent::Help,
            r"\b(help|what can you do|capabilities|commands)\b",
            no_query,
        ),
        Rule::new(
            Intent::Checkout,
            r"\b(checkout|pay|purchase|buy|place order)\b",
            no_query,
        ),
        Rule::new(
            Intent::ViewCart,
            r"\b(my cart|view cart|show cart|what'?s in my cart|cart items)\b",
            no_query,
        ),
        Rule::new(
            Intent::OrderStatus,
            r"\b(order|status|tracking|my orders)\b",
            no_query,
        ),
        Rule::new(Intent::AddToCart, r"\badd\b", add_query),
        Rule::new(
            Intent::Search,
            r"\b(search|find|look for|looking for)\b",
            search_query,
        ),
        Rule::new(
            Intent::Browse,
            r"\b(browse|show|products|shop|catalog|what do you have|categories|all items)\b",
            browse_query,
        ),
    ]
});

static ADD_VERB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\badd\b").expect("pattern must compile"));
static CART_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bto\s*(my\s*)?cart\b").expect("pattern must compile"));
static SEARCH_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(search|find|look for|looking for)\b").expect("pattern must compile")
});
static FOR_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfor\b").expect("pattern must compile"));
static CATEGORY_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(electronics|clothing|food|grocery|home)\b").expect("pattern must compile")
});

fn no_query(_text: &str) -> String {
    String::new()
}

/// Strip the add verb and any "to (my) cart" suffix.
fn add_query(text: &str) -> String {
    let stripped = ADD_VERB.replace(text, "");
    let stripped = CART_SUFFIX.replace(&stripped, "");
    stripped.trim().to_string()
}

/// Strip the search verb and a leading "for".
fn search_query(text: &str) -> String {
    let stripped = SEARCH_VERB.replace(text, "");
    let stripped = FOR_WORD.replace(&stripped, "");
    stripped.trim().to_string()
}

/// A recognized category keyword, if the text names one.
fn browse_query(text: &str) -> String {
    CATEGORY_WORD
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Classify a user utterance.
///
/// Case-insensitive and whitespace-trimmed. Always returns a result; inputs
/// matching no rule classify as [`Intent::Unknown`] with an empty query.
#[must_use]
pub fn classify(text: &str) -> Classification {
    let lower = text.trim().to_lowercase();

    for rule in RULES.iter() {
        if rule.pattern.is_match(&lower) {
            return Classification {
                intent: rule.intent,
                query: (rule.extract)(&lower),
            };
        }
    }

    Classification {
        intent: Intent::Unknown,
        query: String::new(),
    }
}
