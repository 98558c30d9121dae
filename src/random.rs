use crate::{automaton::Dfa, config::Limits};

/// Returns an alphabet consisting of the first `symbols` lowercase letters, continuing with
/// the following unicode scalar values if more than 26 symbols are requested.
pub fn alphabet_of_size(symbols: usize) -> Vec<char> {
    (0..symbols)
        .filter_map(|i| char::from_u32('a' as u32 + i as u32))
        .collect()
}

/// Generates a random [`Dfa`] with `size` states over an alphabet of `symbols` letters using the
/// given random number generator. Every transition is present with probability `density` and leads
/// to a uniformly drawn state, every state is accepting with probability one half.
/// A `density` of `1.0` thus yields a complete automaton. Depending on the drawn transitions, some
/// states may be unreachable.
///
/// # Panics
/// If `size` or `symbols` are zero or exceed the default [`Limits`].
pub fn generate_random_dfa_with(
    rng: &mut fastrand::Rng,
    symbols: usize,
    size: usize,
    density: f64,
) -> Dfa {
    let rows = (0..size)
        .map(|_| {
            (0..symbols)
                .map(|_| (rng.f64() < density).then(|| rng.usize(..size)))
                .collect()
        })
        .collect();
    let accepting: Vec<_> = (0..size).filter(|_| rng.bool()).collect();

    match Dfa::new(alphabet_of_size(symbols), rows, accepting, &Limits::default()) {
        Ok(dfa) => dfa,
        Err(e) => panic!("could not generate random automaton: {e}"),
    }
}

/// Works as [`generate_random_dfa_with`], but uses a freshly seeded random number generator.
pub fn generate_random_dfa(symbols: usize, size: usize, density: f64) -> Dfa {
    generate_random_dfa_with(&mut fastrand::Rng::new(), symbols, size, density)
}
