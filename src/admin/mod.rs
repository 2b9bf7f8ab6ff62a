//! Admin catalogue import: multipart CSV/ZIP upload with a transient report

use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::auth::SessionHandle;
use crate::error::{Error, Result};
use crate::fetch::Fetch;

/// Outcome of a catalogue import
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportReport {
    /// Number of products created
    pub created: u64,

    /// Per-row error lines, in the order the backend reported them
    #[serde(default)]
    pub errors: Vec<String>,
}

/// A catalogue import payload: a required product CSV and an optional ZIP of
/// assets
#[derive(Debug, Clone, Default)]
pub struct CatalogImport {
    csv: Option<(String, Vec<u8>)>,
    assets: Option<(String, Vec<u8>)>,
}

impl CatalogImport {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the product CSV
    pub fn with_csv(mut self, file_name: &str, bytes: Vec<u8>) -> Self {
        self.csv = Some((file_name.to_string(), bytes));
        self
    }

    /// Attach the optional assets archive
    pub fn with_assets_zip(mut self, file_name: &str, bytes: Vec<u8>) -> Self {
        self.assets = Some((file_name.to_string(), bytes));
        self
    }
}

/// Client for admin catalogue imports
pub struct AdminClient {
    /// The base URL for the backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session; imports require an admin bearer token
    session: SessionHandle,

    /// Whether an import is currently in flight
    importing: AtomicBool,

    /// Report from the most recent successful import
    last_report: RwLock<Option<ImportReport>>,
}

impl AdminClient {
    /// Create a new AdminClient
    pub(crate) fn new(url: &str, client: Client, session: SessionHandle) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
            importing: AtomicBool::new(false),
            last_report: RwLock::new(None),
        }
    }

    /// Upload a catalogue import.
    ///
    /// A payload without a CSV is rejected before any network call. On
    /// success the returned report replaces the previously held one; on
    /// failure the prior report is left untouched.
    pub async fn import_catalog(&self, import: CatalogImport) -> Result<ImportReport> {
        let (csv_name, csv_bytes) = match import.csv {
            Some(csv) => csv,
            None => return Err(Error::validation("a product CSV is required")),
        };

        let mut form = multipart::Form::new().part(
            "csv_file",
            multipart::Part::bytes(csv_bytes)
                .file_name(csv_name)
                .mime_str("text/csv")?,
        );

        if let Some((zip_name, zip_bytes)) = import.assets {
            form = form.part(
                "assets_zip",
                multipart::Part::bytes(zip_bytes)
                    .file_name(zip_name)
                    .mime_str("application/zip")?,
            );
        }

        let url = format!("{}/api/admin/import-csv", self.url);

        self.importing.store(true, Ordering::SeqCst);
        let result = Fetch::post(&self.client, &url)
            .maybe_bearer_auth(self.session.token().as_deref())
            .multipart(form)
            .execute::<ImportReport>()
            .await;
        self.importing.store(false, Ordering::SeqCst);

        let report = result?;

        {
            let mut last_report = self.last_report.write().unwrap();
            *last_report = Some(report.clone());
        }

        Ok(report)
    }

    /// Whether an import is currently in flight
    pub fn is_importing(&self) -> bool {
        self.importing.load(Ordering::SeqCst)
    }

    /// The report from the most recent successful import
    pub fn last_report(&self) -> Option<ImportReport> {
        self.last_report.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionHandle;

    #[test]
    fn import_without_csv_is_rejected_before_any_request() {
        let admin = AdminClient::new(
            "http://localhost:8000",
            Client::new(),
            SessionHandle::new(None),
        );

        let result = tokio_test::block_on(
            admin.import_catalog(CatalogImport::new().with_assets_zip("a.zip", vec![1, 2, 3])),
        );

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(!admin.is_importing());
        assert_eq!(admin.last_report(), None);
    }

    #[test]
    fn report_parses_without_errors_field() {
        let report: ImportReport = serde_json::from_str(r#"{"created":12}"#).unwrap();
        assert_eq!(report.created, 12);
        assert!(report.errors.is_empty());
    }
}
