use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use strands::{Address, PositionId};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustodyEventKind {
    /// The ledger took a position into custody.
    Custody,
    /// The ledger handed a position out.
    Release,
}

impl fmt::Display for CustodyEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustodyEventKind::Custody => f.write_str("CUSTODY"),
            CustodyEventKind::Release => f.write_str("RELEASE"),
        }
    }
}

/// A committed change to the custody book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodyEvent {
    pub id: Uuid,
    pub timestamp: i64,
    pub kind: CustodyEventKind,
    pub position_id: PositionId,
    pub beneficiary: Address,
    /// Holder side of the move: the ledger on custody, the recipient on release.
    pub counterparty: Address,
}

impl CustodyEvent {
    pub fn new(
        kind: CustodyEventKind,
        position_id: PositionId,
        beneficiary: Address,
        counterparty: Address,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            kind,
            position_id,
            beneficiary,
            counterparty,
        }
    }
}

/// Append-only CSV journal of custody events.
pub struct CustodyJournal {
    file_path: PathBuf,
}

impl CustodyJournal {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn log(&mut self, event: &CustodyEvent) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        // Format: Date, Kind, PositionId, Beneficiary, Counterparty, EventId
        let date = chrono::DateTime::from_timestamp_millis(event.timestamp)
            .unwrap_or_default()
            .to_rfc3339();

        writeln!(
            file,
            "{},{},{},{},{},{}",
            date, event.kind, event.position_id, event.beneficiary, event.counterparty, event.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_appends_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custody.csv");
        let mut journal = CustodyJournal::new(path.clone());

        let alice = Address::from_low_u64(1);
        let ledger = Address::from_low_u64(2);
        journal
            .log(&CustodyEvent::new(
                CustodyEventKind::Custody,
                PositionId(1),
                alice,
                ledger,
            ))
            .unwrap();
        journal
            .log(&CustodyEvent::new(
                CustodyEventKind::Release,
                PositionId(1),
                alice,
                alice,
            ))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = contents.lines().collect();
        assert_eq!(rows.len(), 2);

        let fields: Vec<&str> = rows[0].split(',').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[1], "CUSTODY");
        assert_eq!(fields[2], "1");
        assert_eq!(fields[3], alice.to_string());
        assert_eq!(fields[4], ledger.to_string());
        assert!(rows[1].contains(",RELEASE,"));
    }
}
