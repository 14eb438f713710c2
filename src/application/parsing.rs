//! # Body Classification
//!
//! Decides what an inbound message body asks for: the prefix query, a command
//! invocation, or nothing at all.

/// What a message body was recognised as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified<'a> {
    /// Body missing or empty.
    Empty,
    /// Body is the literal `prefix` (any case).
    PrefixQuery,
    /// Body starts with the configured prefix.
    Invocation { command: &'a str, args: Vec<String> },
    /// Ordinary conversation.
    Conversation,
}

/// Classifies `body` against `prefix`. Check order is fixed: the `prefix`
/// literal wins even when the configured prefix is itself `prefix`.
pub fn classify<'a>(body: Option<&'a str>, prefix: &str) -> Classified<'a> {
    let Some(body) = body.filter(|b| !b.is_empty()) else {
        return Classified::Empty;
    };

    if body.eq_ignore_ascii_case("prefix") {
        return Classified::PrefixQuery;
    }

    match strip_prefix_ignore_case(body, prefix) {
        Some(rest) => {
            let (command, args) = split_invocation(rest);
            Classified::Invocation { command, args }
        }
        None => Classified::Conversation,
    }
}

fn strip_prefix_ignore_case<'a>(body: &'a str, prefix: &str) -> Option<&'a str> {
    let head = body.get(..prefix.len())?;
    if head.to_lowercase() == prefix.to_lowercase() {
        Some(&body[prefix.len()..])
    } else {
        None
    }
}

/// Splits on single spaces. Consecutive spaces yield empty arguments.
fn split_invocation(rest: &str) -> (&str, Vec<String>) {
    let mut parts = rest.trim().split(' ');
    let command = parts.next().unwrap_or_default();
    (command, parts.map(str::to_string).collect())
}
