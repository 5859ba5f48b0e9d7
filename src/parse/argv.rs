//! Argument vector parser
//!
//! `--KEY value words` style: a `--` token opens a key, following bare tokens
//! are joined onto its value with single spaces, and a key that never gets a
//! value fragment before the next key is a flag and becomes `"true"`.

use super::{strip_quotes, RawMap};
use crate::logger::LogGate;

/// Parse the invocation arguments (program name already removed).
pub fn parse_argv<I, S>(args: I, gate: &LogGate) -> RawMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut results = RawMap::new();
    let mut current: Option<String> = None;
    let mut assigned = false;

    for arg in args {
        let token = arg.as_ref();

        let fragment = if let Some(declared) = token.strip_prefix("--").filter(|_| token != "--")
        {
            let declared = declared.trim();
            let (key, inline) = match declared.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (declared, None),
            };

            if results.contains_key(key) {
                gate.warn(format_args!(
                    "argv key \"{}\" already exists. Overwriting initial value. \
                     \nThis happens when two argv keys are identical.\
                     \nExample: `app --DEV=true --DEV=false`\nThe last argument will be used",
                    key
                ));
            }

            if let Some(previous) = current.as_ref() {
                if !assigned {
                    gate.debug(format_args!(
                        "argv \"{}\" did not have a value. Setting to \"true\".",
                        previous
                    ));
                    results.insert(previous.clone(), "true".to_string());
                }
            }

            if key.is_empty() {
                if let Some(value) = inline.filter(|value| !value.is_empty()) {
                    warn_orphan(gate, value);
                }
                current = None;
                continue;
            }

            results.insert(key.to_string(), String::new());
            current = Some(key.to_string());
            assigned = false;

            match inline {
                Some(value) => value,
                None => continue,
            }
        } else {
            token
        };

        match current.as_ref().and_then(|key| results.get_mut(key)) {
            Some(value) => {
                value.push(' ');
                value.push_str(fragment);
                assigned = true;
            }
            None => warn_orphan(gate, fragment),
        }
    }

    for value in results.values_mut() {
        let trimmed = value.trim();
        let unquoted = strip_quotes(trimmed).map(|(inner, _)| inner).unwrap_or(trimmed);
        *value = unquoted.to_string();
    }

    gate.debug(format_args!("argv results {:?}", results));
    results
}

fn warn_orphan(gate: &LogGate, fragment: &str) {
    gate.warn(format_args!(
        "argv value \"{}\" is not a key value and does not proceed a key. Ignoring value",
        fragment
    ));
}
