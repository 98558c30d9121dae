use crate::prelude::*;

/// The message that is rendered instead of a table if every state of an automaton is dead.
pub const EMPTY_LANGUAGE: &str = "DFA minimized to EMPTY DFA...";

fn label(dfa: &Dfa, state: StateIndex) -> String {
    format!("{}{}", dfa.attribute(state).show(), state)
}

/// Renders the transition table of `dfa` for humans. Each state is labeled by its index, prefixed
/// with `A` if it is accepting and `s` otherwise. Dead states are omitted and transitions into them
/// as well as missing transitions are shown as `-`. The table is followed by the initial state.
/// If all states are dead, the language is empty and [`EMPTY_LANGUAGE`] is returned instead.
///
/// # Example
/// ```
/// use minauto::prelude::*;
///
/// let dfa = parse_dfa("2 1 a 1 -1 1", &Limits::default()).unwrap();
/// let table = render(&dfa);
/// assert!(table.contains("A1"));
/// assert!(table.ends_with("Initial state: s0"));
/// ```
pub fn render(dfa: &Dfa) -> String {
    if dfa.live_states().next().is_none() {
        return EMPTY_LANGUAGE.to_string();
    }

    let mut builder = tabled::builder::Builder::default();
    builder.push_record(
        std::iter::once("State".to_string()).chain(dfa.alphabet().iter().map(|s| s.to_string())),
    );
    for q in dfa.live_states() {
        let mut row = vec![label(dfa, q)];
        row.extend(dfa.row(q).iter().map(|target| match target {
            Some(t) if !dfa.is_dead(*t) => label(dfa, *t),
            _ => "-".to_string(),
        }));
        builder.push_record(row);
    }

    format!(
        "{}\n\nInitial state: {}",
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string(),
        label(dfa, dfa.initial())
    )
}
