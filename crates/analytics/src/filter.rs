use chrono::NaiveDate;
use core_types::{BetRecord, CategoryField};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Describes which slice of the ledger a report covers.
///
/// Unset dates default to the earliest and latest dates present in the ledger.
/// An empty category set places no restriction on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub bookies: BTreeSet<String>,
    pub sports: BTreeSet<String>,
    pub bet_types: BTreeSet<String>,
    pub cappers: BTreeSet<String>,
    pub competitions: BTreeSet<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Adds `value` to the allowed set of `field`.
    pub fn allow(mut self, field: CategoryField, value: impl Into<String>) -> Self {
        self.allowed_mut(field).insert(value.into());
        self
    }

    pub fn allow_all<I, S>(mut self, field: CategoryField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_mut(field)
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn allowed(&self, field: CategoryField) -> &BTreeSet<String> {
        match field {
            CategoryField::Bookie => &self.bookies,
            CategoryField::Sport => &self.sports,
            CategoryField::BetType => &self.bet_types,
            CategoryField::Capper => &self.cappers,
            CategoryField::Competition => &self.competitions,
        }
    }

    fn allowed_mut(&mut self, field: CategoryField) -> &mut BTreeSet<String> {
        match field {
            CategoryField::Bookie => &mut self.bookies,
            CategoryField::Sport => &mut self.sports,
            CategoryField::BetType => &mut self.bet_types,
            CategoryField::Capper => &mut self.cappers,
            CategoryField::Competition => &mut self.competitions,
        }
    }

    /// True when no constraint at all is set.
    pub fn is_unrestricted(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && CategoryField::ALL
                .iter()
                .all(|field| self.allowed(*field).is_empty())
    }
}

/// Narrows a ledger down to the records matching a `FilterSpec`.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    spec: FilterSpec,
}

impl FilterEngine {
    pub fn new(spec: FilterSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Returns the matching records in their original relative order.
    pub fn apply(&self, ledger: &[BetRecord]) -> Vec<BetRecord> {
        self.apply_indexed(ledger)
            .into_iter()
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Like `apply`, but keeps each record's row position in the ledger.
    pub fn apply_indexed<'a>(&self, ledger: &'a [BetRecord]) -> Vec<(usize, &'a BetRecord)> {
        let Some((from, to)) = self.resolve_window(ledger) else {
            return Vec::new();
        };

        let matched: Vec<(usize, &BetRecord)> = ledger
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                let date = record.date();
                date >= from && date <= to && self.matches_categories(record)
            })
            .collect();

        debug!(
            total = ledger.len(),
            matched = matched.len(),
            "Ledger filtered."
        );
        matched
    }

    /// The effective inclusive date window, with unset bounds taken from the
    /// ledger. `None` only when the ledger is empty.
    pub fn resolve_window(&self, ledger: &[BetRecord]) -> Option<(NaiveDate, NaiveDate)> {
        let (min, max) = date_bounds(ledger)?;
        Some((self.spec.date_from.unwrap_or(min), self.spec.date_to.unwrap_or(max)))
    }

    fn matches_categories(&self, record: &BetRecord) -> bool {
        CategoryField::ALL.iter().all(|field| {
            let allowed = self.spec.allowed(*field);
            allowed.is_empty() || allowed.contains(record.category(*field))
        })
    }
}

/// The earliest and latest dates present in the ledger.
pub fn date_bounds(ledger: &[BetRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = ledger.iter().map(BetRecord::date).min()?;
    let max = ledger.iter().map(BetRecord::date).max()?;
    Some((min, max))
}

/// The distinct values of a categorical field, in first-seen order.
pub fn distinct_values(ledger: &[BetRecord], field: CategoryField) -> Vec<String> {
    let mut seen = HashSet::new();
    ledger
        .iter()
        .map(|record| record.category(field))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
