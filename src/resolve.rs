//! Tie-break resolution between sources
//!
//! The first source to supply a key wins. A later value only replaces it when
//! the key declares a `tie_breaker` equal to the source the value came from.

use crate::domain::{ExpectedVariable, Source};
use crate::logger::LogGate;

/// Whether a value arriving from `from` may overwrite the one already stored for `key`.
pub fn tie_breaker_passes(
    key: &str,
    expected: &ExpectedVariable,
    from: Source,
    gate: &LogGate,
) -> bool {
    let Some(winner) = expected.options().and_then(|opt| opt.tie_breaker) else {
        gate.debug(format_args!("incoming key \"{}\" did not have a tie breaker", key));
        return false;
    };

    if winner != from {
        gate.debug(format_args!(
            "incoming key \"{}\" did not pass the tieBreaker. \
             Winning tieBreaker \"{}\", incoming key's tieBreaker \"{}\"",
            key, winner, from
        ));
        return false;
    }

    true
}
