use crate::DbError;
use crate::row::{LEDGER_HEADER, LedgerRow};
use core_types::{BetRecord, Settlement};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Position of a record in the loaded ledger. It is the only identity a record
/// has.
pub type RowId = usize;

/// The storage contract the rest of the application relies on.
///
/// `append` and `update` are whole-ledger read-modify-write cycles. There is no
/// locking: two concurrent writers race and the later save wins.
pub trait LedgerStore {
    /// Loads the full ledger in stored order.
    fn load(&self) -> Result<Vec<BetRecord>, DbError>;

    /// Replaces the stored ledger with `ledger`.
    fn save(&self, ledger: &[BetRecord]) -> Result<(), DbError>;

    /// Appends a record and returns its row id.
    fn append(&self, record: BetRecord) -> Result<RowId, DbError> {
        let mut ledger = self.load()?;
        ledger.push(record);
        self.save(&ledger)?;
        Ok(ledger.len() - 1)
    }

    /// Applies a settlement to the record at `row`, the only mutation a stored
    /// record ever receives. Returns the updated record.
    fn update(&self, row: RowId, settlement: &Settlement) -> Result<BetRecord, DbError> {
        let mut ledger = self.load()?;
        let record = ledger.get_mut(row).ok_or(DbError::NotFound(row))?;
        record.settle(settlement)?;
        let updated = record.clone();
        self.save(&ledger)?;
        Ok(updated)
    }
}

/// A `LedgerStore` backed by a CSV file.
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    path: PathBuf,
}

impl CsvLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw rows. A missing file is an empty ledger; any other
    /// failure to open it is an error, so a later save cannot replace a
    /// ledger that was never read.
    pub fn read_rows(&self) -> Result<Vec<LedgerRow>, DbError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    path = %self.path.display(),
                    "Ledger file does not exist; starting from an empty ledger."
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(DbError::Io(e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let rows = reader
            .deserialize::<LedgerRow>()
            .collect::<Result<Vec<_>, _>>()?;
        debug!(path = %self.path.display(), rows = rows.len(), "Ledger rows read.");
        Ok(rows)
    }

    /// Rewrites the whole file from `rows`, creating parent directories.
    pub fn write_rows(&self, rows: &[LedgerRow]) -> Result<(), DbError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // The header is written by hand so an empty ledger still has one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(&self.path)?;
        writer.write_record(LEDGER_HEADER)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl LedgerStore for CsvLedgerStore {
    fn load(&self) -> Result<Vec<BetRecord>, DbError> {
        self.read_rows()?
            .into_iter()
            .enumerate()
            .map(|(row, raw)| {
                raw.into_record()
                    .map_err(|source| DbError::InvalidRow { row, source })
            })
            .collect()
    }

    fn save(&self, ledger: &[BetRecord]) -> Result<(), DbError> {
        let rows: Vec<LedgerRow> = ledger.iter().map(LedgerRow::from_record).collect();
        self.write_rows(&rows)?;
        info!(path = %self.path.display(), records = rows.len(), "Ledger saved.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{BetDetails, BetResult, CoreError, Outcome};
    use rust_decimal_macros::dec;

    fn details(d: u32) -> BetDetails {
        let mut details = BetDetails::new(NaiveDate::from_ymd_opt(2024, 2, d).unwrap());
        details.bookie = "Pinnacle".to_string();
        details.sport = "Tennis".to_string();
        details.selection = "Sinner, to win".to_string();
        details.event = "Sinner x \"Alcaraz\"".to_string();
        details.is_free_bet = true;
        details
    }

    fn sample_ledger() -> Vec<BetRecord> {
        vec![
            BetRecord::standalone(details(1), dec!(2), dec!(2.5), BetResult::Win, dec!(10)).unwrap(),
            BetRecord::standalone(details(2), dec!(0.75), dec!(1.83), BetResult::Open, dec!(12.5))
                .unwrap(),
            BetRecord::parlay_leg(details(2), BetResult::Open, None),
            BetRecord::parlay_leg(details(3), BetResult::Void, Some(dec!(10))),
        ]
    }

    #[test]
    fn missing_file_is_an_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("absent.csv"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("data").join("ledger.csv"));
        let ledger = sample_ledger();

        store.save(&ledger).unwrap();
        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn empty_ledger_round_trips_with_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let store = CsvLedgerStore::new(&path);

        store.save(&[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), LEDGER_HEADER.join(","));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_returns_the_new_row_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("ledger.csv"));

        for (expected, record) in sample_ledger().into_iter().enumerate() {
            assert_eq!(store.append(record).unwrap(), expected);
        }
        assert_eq!(store.load().unwrap(), sample_ledger());
    }

    #[test]
    fn update_settles_and_persists_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("ledger.csv"));
        store.save(&sample_ledger()).unwrap();

        let updated = store
            .update(1, &Settlement::new(Outcome::Loss).with_score("0-2"))
            .unwrap();
        assert_eq!(updated.profit_units(), Some(dec!(-0.75)));
        assert_eq!(updated.profit_currency(), Some(dec!(-9.375)));

        let ledger = store.load().unwrap();
        assert_eq!(ledger[1], updated);
        assert_eq!(ledger[1].details().score, "0-2");
        assert_eq!(ledger[0], sample_ledger()[0]);
    }

    #[test]
    fn update_rejects_settled_rows_and_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("ledger.csv"));
        store.save(&sample_ledger()).unwrap();

        let err = store.update(0, &Settlement::new(Outcome::Loss)).unwrap_err();
        assert!(matches!(
            err,
            DbError::Rejected(CoreError::AlreadySettled(BetResult::Win))
        ));
        assert!(matches!(
            store.update(42, &Settlement::new(Outcome::Win)),
            Err(DbError::NotFound(42))
        ));
        assert_eq!(store.load().unwrap(), sample_ledger());
    }

    #[test]
    fn unopenable_ledger_is_an_error_and_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "keep me").unwrap();
        let store = CsvLedgerStore::new(blocker.join("ledger.csv"));

        assert!(matches!(store.load(), Err(DbError::Io(_))));
        assert!(store.append(sample_ledger().remove(0)).is_err());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "keep me");
    }

    #[test]
    fn stored_profit_is_recomputed_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let header = LEDGER_HEADER.join(",");
        fs::write(
            &path,
            format!(
                "{header}\n\
                 2024-02-01,N,,,,,,,,,N,,2,2.5,N,W,99,990,10\n\
                 2024-02-02,N,,,,,,,,,N,,2,2.5,N,L,5,,10\n"
            ),
        )
        .unwrap();

        let ledger = CsvLedgerStore::new(&path).load().unwrap();
        assert_eq!(ledger[0].profit_units(), Some(dec!(3)));
        assert_eq!(ledger[0].profit_currency(), Some(dec!(30)));
        assert_eq!(ledger[1].profit_units(), Some(dec!(-2)));
        assert_eq!(ledger[1].profit_currency(), Some(dec!(-20)));
    }

    #[test]
    fn malformed_rows_report_their_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let store = CsvLedgerStore::new(&path);
        store.save(&sample_ledger()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        fs::write(&path, contents.replacen(",W,", ",X,", 1)).unwrap();

        assert!(matches!(
            store.load(),
            Err(DbError::InvalidRow { row: 0, .. })
        ));
    }
}
