use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use fiado::ledger::{Debt, DebtId, LedgerStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local ledger store. Real persistence is a deployment concern; the
/// service only needs the `LedgerStore` contract.
#[derive(Default)]
pub(crate) struct InMemoryLedger {
    debts: Mutex<HashMap<DebtId, Debt>>,
}

impl LedgerStore for InMemoryLedger {
    fn insert(&self, debt: Debt) -> Result<Debt, StoreError> {
        let mut guard = self.debts.lock().expect("ledger mutex poisoned");
        if guard.contains_key(&debt.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(debt.id.clone(), debt.clone());
        Ok(debt)
    }

    fn update(&self, debt: Debt) -> Result<(), StoreError> {
        let mut guard = self.debts.lock().expect("ledger mutex poisoned");
        if guard.contains_key(&debt.id) {
            guard.insert(debt.id.clone(), debt);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &DebtId) -> Result<Option<Debt>, StoreError> {
        let guard = self.debts.lock().expect("ledger mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Debt>, StoreError> {
        let guard = self.debts.lock().expect("ledger mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|date| {
                date.and_hms_opt(0, 0, 0)
                    .expect("midnight is always representable")
            })
        })
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD[THH:MM:SS] ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_timestamps_and_bare_dates() {
        let full = parse_datetime("2025-05-20T08:30:00").expect("timestamp parses");
        assert_eq!(full.to_string(), "2025-05-20 08:30:00");

        let bare = parse_datetime("2025-05-20").expect("date parses");
        assert_eq!(bare.to_string(), "2025-05-20 00:00:00");

        assert!(parse_datetime("May 20th").is_err());
    }
}
