//! Lead source contracts and implementations.
//!
//! # Responsibility
//! - Supply the ordered lead rows a session store is built from.
//! - Generate `lead_{n}` identities for rows that arrive without one.
//!
//! # Invariants
//! - Row order is preserved into the store.
//! - Generated ids are 1-based positions in the fetched row list.

use crate::model::lead::{Lead, LeadField, LeadId};
use crate::model::store::{LeadStore, LeadStoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type SourceResult<T> = Result<T, SourceError>;

/// Lead source failures.
#[derive(Debug)]
pub enum SourceError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Store(LeadStoreError),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read leads from `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid lead rows: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<LeadStoreError> for SourceError {
    fn from(value: LeadStoreError) -> Self {
        Self::Store(value)
    }
}

/// Read-only supplier of lead rows.
pub trait LeadSource {
    /// Short label used in log events.
    fn source_name(&self) -> &'static str;
    /// Fetches all rows in display order.
    fn fetch_leads(&self) -> SourceResult<Vec<Lead>>;
}

/// Fetches all rows from `source` and builds a validated session store.
///
/// # Side effects
/// - Emits `leads_load` events with row count and duration.
pub fn load_store(source: &dyn LeadSource) -> SourceResult<LeadStore> {
    let started_at = Instant::now();
    let result = source
        .fetch_leads()
        .and_then(|leads| LeadStore::new(leads).map_err(SourceError::from));

    match &result {
        Ok(store) => info!(
            "event=leads_load module=repo status=ok source={} count={} duration_ms={}",
            source.source_name(),
            store.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=leads_load module=repo status=error source={} duration_ms={} error={}",
            source.source_name(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Id assigned to the row at zero-based `index` when the source has none.
pub fn generated_lead_id(index: usize) -> LeadId {
    format!("lead_{}", index + 1)
}

/// Parses a JSON array of lead rows.
///
/// Rows without a `lead_id` (or with an empty one) get `generated_lead_id`.
pub fn parse_lead_rows(json: &str) -> SourceResult<Vec<Lead>> {
    let mut leads: Vec<Lead> = serde_json::from_str(json)?;
    for (index, lead) in leads.iter_mut().enumerate() {
        if lead.lead_id.is_empty() {
            lead.lead_id = generated_lead_id(index);
        }
    }
    Ok(leads)
}

/// JSON file lead source (array of rows in table column shape).
#[derive(Debug, Clone)]
pub struct JsonFileLeadSource {
    path: PathBuf,
}

impl JsonFileLeadSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LeadSource for JsonFileLeadSource {
    fn source_name(&self) -> &'static str {
        "json_file"
    }

    fn fetch_leads(&self) -> SourceResult<Vec<Lead>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_lead_rows(&contents)
    }
}

/// Built-in demo table, regenerated on every fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleLeadSource;

// Cells follow `LeadField::all()` order.
#[rustfmt::skip]
const SAMPLE_ROWS: [[&str; 11]; 8] = [
    ["Test Firma AG", "12345", "info@testfirma.ch", "Teststrasse 1", "8000", "Zürich", "www.testfirma.ch", "IT", "KMU", "1-5 Mio", "A"],
    ["Muster GmbH", "67890", "kontakt@muster.de", "Musterweg 2", "10115", "Berlin", "www.muster.de", "Marketing", "Grossunternehmen", "10-50 Mio", "B"],
    ["Alpha Services", "11111", "contact@alpha.com", "Alpha Allee 3", "20095", "Hamburg", "www.alpha.com", "Finanzen", "KMU", "5-10 Mio", "A"],
    ["Beta Solutions", "22222", "info@beta.co", "Beta Boulevard 4", "50667", "Köln", "www.beta.co", "Consulting", "KMU", "1-5 Mio", "C"],
    ["Gamma Innovations", "33333", "sales@gamma.net", "Gamma Gasse 5", "60313", "Frankfurt", "www.gamma.net", "Technologie", "Grossunternehmen", "50-100 Mio", "B"],
    ["Delta Consulting", "44444", "support@delta.org", "Delta Damm 6", "80331", "München", "www.delta.org", "Dienstleistung", "Mittelstand", "10-50 Mio", "A"],
    ["Epsilon Enterprises", "55555", "hello@epsilon.biz", "Epsilon Esplanade 7", "10178", "Berlin", "www.epsilon.biz", "E-Commerce", "Startup", "0-1 Mio", "A"],
    ["Zeta Corporation", "66666", "admin@zeta.io", "Zeta Zeile 8", "40213", "Düsseldorf", "www.zeta.io", "Industrie", "Grossunternehmen", "100+ Mio", "B"],
];

impl LeadSource for SampleLeadSource {
    fn source_name(&self) -> &'static str {
        "sample"
    }

    fn fetch_leads(&self) -> SourceResult<Vec<Lead>> {
        Ok(SAMPLE_ROWS
            .iter()
            .enumerate()
            .map(|(index, row)| {
                LeadField::all()
                    .iter()
                    .zip(row)
                    .fold(Lead::new(generated_lead_id(index), ""), |lead, (field, value)| {
                        lead.with(*field, *value)
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{generated_lead_id, load_store, parse_lead_rows, SampleLeadSource, SourceError};
    use crate::model::lead::LeadField;

    #[test]
    fn sample_source_numbers_leads_from_one() {
        let store = load_store(&SampleLeadSource).expect("sample store should load");
        assert_eq!(store.len(), 8);
        assert_eq!(store.leads()[0].lead_id, "lead_1");
        assert_eq!(store.leads()[7].lead_id, "lead_8");
        assert_eq!(store.leads()[0].value(LeadField::City), "Zürich");
        let last = &store.leads()[7];
        assert_eq!(last.value(LeadField::Name), "Zeta Corporation");
        assert_eq!(last.value(LeadField::Street), "Zeta Zeile 8");
        assert_eq!(last.value(LeadField::CreditRating), "B");
    }

    #[test]
    fn json_rows_generate_missing_ids_by_position() {
        let leads = parse_lead_rows(
            r#"[{"name": "A", "ort": "Bern"}, {"lead_id": "custom", "name": "B"}, {"name": "C"}]"#,
        )
        .unwrap();
        assert_eq!(leads[0].lead_id, "lead_1");
        assert_eq!(leads[0].city, "Bern");
        assert_eq!(leads[1].lead_id, "custom");
        assert_eq!(leads[2].lead_id, generated_lead_id(2));
    }

    #[test]
    fn json_rows_use_source_column_names() {
        let leads = parse_lead_rows(
            r#"[{"lead_id": "", "name": "Nord AG", "strasse": "Hafen 1", "plz": "20095",
                 "branche": "Logistik", "umsatz_kategorie": "1-5 Mio", "bonität": "A"}]"#,
        )
        .unwrap();
        let lead = &leads[0];
        assert_eq!(lead.lead_id, "lead_1");
        assert_eq!(lead.value(LeadField::Street), "Hafen 1");
        assert_eq!(lead.value(LeadField::PostalCode), "20095");
        assert_eq!(lead.value(LeadField::Industry), "Logistik");
        assert_eq!(lead.value(LeadField::RevenueCategory), "1-5 Mio");
        assert_eq!(lead.value(LeadField::CreditRating), "A");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_lead_rows("{not json").expect_err("malformed payload must fail");
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
