use crate::{CsvLedgerStore, DbError};
use core_types::round_working;
use rust_decimal::Decimal;
use tracing::info;

/// Stamps `stake_unit_value` onto standalone rows written before the column
/// existed, and derives a missing `profit_currency` from `profit_units`.
///
/// Works on raw rows because such a ledger does not load as records. Rows that
/// already carry a value are left alone. Returns the number of rows changed.
pub fn backfill_stake_unit_value(
    store: &CsvLedgerStore,
    stake_unit_value: Decimal,
) -> Result<usize, DbError> {
    let mut rows = store.read_rows()?;
    let mut changed = 0;

    for row in rows.iter_mut().filter(|row| !row.parlay.is_set()) {
        if row.stake_unit_value.is_some() {
            continue;
        }
        row.stake_unit_value = Some(stake_unit_value);
        if row.profit_currency.is_none() {
            row.profit_currency = row
                .profit_units
                .map(|units| round_working(units * stake_unit_value));
        }
        changed += 1;
    }

    if changed > 0 {
        store.write_rows(&rows)?;
    }
    info!(
        path = %store.path().display(),
        rows = changed,
        %stake_unit_value,
        "Stake-unit backfill complete."
    );
    Ok(changed)
}
