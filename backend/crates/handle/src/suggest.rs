//! Alternative-handle generation for rejected or already-claimed candidates.

use chrono::{Datelike, Utc};

use crate::normalize::normalize;
use crate::validate::HANDLE_MAX;

/// Extra candidates produced beyond the requested count before deduplication.
const PRODUCTION_HEADROOM: usize = 5;

/// Longest base that still leaves room for a two-character suffix.
const UNDERSCORE_SUFFIX_MAX: usize = HANDLE_MAX - 2;

/// Generate up to `count` alternatives for `base`, using the current UTC
/// year for the year-stamped variant.
///
/// See [`suggestions_with_year`] for the generation rules.
#[must_use]
pub fn suggestions(base: &str, count: usize) -> Vec<String> {
    suggestions_with_year(base, count, Utc::now().year().rem_euclid(100))
}

/// Deterministic form of [`suggestions`] taking the two-digit year.
///
/// The base is case-folded, then variants are produced in a fixed order:
/// `base1`..`base3`, `base_1` and `base_x` (only when the base leaves room),
/// the year-stamped `base<yy>`, then `base4`, `base5`, … until enough
/// candidates have been produced. Variants longer than [`HANDLE_MAX`] are
/// discarded. The survivors are deduplicated preserving first occurrence and
/// truncated to `count`.
///
/// Long bases can squeeze out most variants; the result may then hold fewer
/// than `count` entries (or none when even `base1` would overflow). That is
/// degraded output, not an error.
#[must_use]
pub fn suggestions_with_year(base: &str, count: usize, year: i32) -> Vec<String> {
    let base = normalize(base);
    let mut production = Production::default();

    for n in 1..=3u32 {
        production.emit(format!("{base}{n}"));
    }
    if base.chars().count() <= UNDERSCORE_SUFFIX_MAX {
        production.emit(format!("{base}_1"));
        production.emit(format!("{base}_x"));
    }
    production.emit(format!("{base}{year:02}"));

    let budget = count.saturating_add(PRODUCTION_HEADROOM);
    let mut n = 4u32;
    while production.emitted < budget {
        let candidate = format!("{base}{n}");
        if candidate.chars().count() > HANDLE_MAX {
            // Counters only grow from here.
            break;
        }
        production.emit(candidate);
        n += 1;
    }

    production.collect(count)
}

/// Accumulates emitted variants, dropping any that overflow the length bound
/// while still counting them against the production budget.
#[derive(Default)]
struct Production {
    emitted: usize,
    kept: Vec<String>,
}

impl Production {
    fn emit(&mut self, candidate: String) {
        self.emitted += 1;
        if candidate.chars().count() <= HANDLE_MAX {
            self.kept.push(candidate);
        }
    }

    fn collect(self, count: usize) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut unique: Vec<String> = self
            .kept
            .into_iter()
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect();
        unique.truncate(count);
        unique
    }
}
