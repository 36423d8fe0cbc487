//! Command line assembly for `docker compose` invocations

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::types::options::GlobalOptions;

/// Flag that selects the output format of query subcommands
const FORMAT_FLAG: &str = "--format";

/// Command line builder for one invocation
pub struct CommandBuilder<'a> {
    program: &'a str,
    options: &'a GlobalOptions,
    overrides: &'a [GlobalOptions],
}

impl<'a> CommandBuilder<'a> {
    /// Create a new command builder
    pub fn new(program: &'a str, options: &'a GlobalOptions, overrides: &'a [GlobalOptions]) -> Self {
        Self {
            program,
            options,
            overrides,
        }
    }

    /// Global flags resolved from the base options and every override
    #[must_use]
    pub fn global_flags(&self) -> String {
        self.options.merged(self.overrides).to_flags().join(" ")
    }

    /// Build `<program> <global-flags> <subcommand> <flags>`
    ///
    /// Empty segments are skipped so no stray whitespace is produced.
    #[must_use]
    pub fn build(&self, subcommand: &str, flags: &str) -> String {
        let global_flags = self.global_flags();

        [self.program, global_flags.as_str(), subcommand, flags]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Flags for a query subcommand, requesting JSON unless a format is given
#[must_use]
pub fn query_flags(flags: &str) -> String {
    let flags = flags.trim();

    if flags.split_whitespace().any(|token| {
        token == FORMAT_FLAG || token.starts_with(&format!("{FORMAT_FLAG}="))
    }) {
        return flags.to_string();
    }

    format!("{flags} {FORMAT_FLAG} json").trim().to_string()
}

/// Render a string-keyed map as repeated `flag key<sep>value` pairs
///
/// Keys are emitted in sorted order so the command line is deterministic,
/// e.g. `--build-arg a=1 --build-arg b=2`.
#[must_use]
pub fn sorted_pairs<K, V>(flag: &str, map: impl IntoIterator<Item = (K, V)>, sep: &str) -> String
where
    K: Ord + Display,
    V: Display,
{
    map.into_iter()
        .collect::<BTreeMap<K, V>>()
        .iter()
        .map(|(key, value)| format!("{flag} {key}{sep}{value}"))
        .collect::<Vec<_>>()
        .join(" ")
}
