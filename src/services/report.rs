//! Compliance report: boilerplate data-protection summary for the plan.
//!
//! DESIGN
//! ======
//! The report body is fixed template text with the camera inventory filled
//! in. Generation sits behind the async [`ReportGenerator`] trait so a richer
//! generator can be swapped in and tests can inject failures.
//!
//! [`ReportDesk`] holds the user-visible status. Each run takes a ticket; a
//! completion whose ticket is not the latest is stale and discarded, so an
//! older request can never overwrite a newer result. Failures are logged and
//! shown as one fixed message; running again retries.

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

use canvas::doc::CameraKind;
use canvas::engine::EngineCore;
use canvas::viewport::Point;
use serde::Serialize;
use tracing::{debug, error, info};

/// Floor name used for cameras whose floor no longer exists.
pub const UNKNOWN_FLOOR: &str = "Unbekannt";

/// What the user sees when generation fails.
pub const REPORT_FAILED_MESSAGE: &str =
    "Fehler beim Generieren des DSGVO-Berichts. Bitte versuchen Sie es später erneut.";

// =============================================================================
// INPUT
// =============================================================================

/// One camera as listed in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCamera {
    pub kind: CameraKind,
    pub name: String,
    pub floor: String,
    pub position: Point,
}

/// Everything a generator needs, detached from the live engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportInput {
    pub cameras: Vec<ReportCamera>,
}

impl ReportInput {
    /// Snapshot every camera on every floor.
    #[must_use]
    pub fn from_engine(core: &EngineCore) -> Self {
        let cameras = core
            .doc
            .cameras()
            .map(|camera| ReportCamera {
                kind: camera.kind,
                name: camera.name.clone(),
                floor: core.floors.get(&camera.floor_id).map_or(UNKNOWN_FLOOR, |f| f.name.as_str()).to_owned(),
                position: camera.position(),
            })
            .collect();
        Self { cameras }
    }
}

// =============================================================================
// GENERATORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("report generation failed: {0}")]
    Generation(String),
}

/// Produces report text from a camera inventory. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ReportGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`ReportError`] if the report cannot be produced.
    async fn generate(&self, input: &ReportInput) -> Result<String, ReportError>;
}

/// The built-in generator: fixed sections with the inventory substituted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateReport;

#[async_trait::async_trait]
impl ReportGenerator for TemplateReport {
    async fn generate(&self, input: &ReportInput) -> Result<String, ReportError> {
        Ok(render_template(input))
    }
}

/// Fill the five-section template.
#[must_use]
pub fn render_template(input: &ReportInput) -> String {
    let mut out = String::from("DSGVO-Bericht für Videoüberwachungsanlage\n\n");
    out.push_str(
        "1. Rechtliche Grundlage\n\
         Die Videoüberwachung erfolgt gemäß Art. 6 Abs. 1 lit. f DSGVO zum Schutz berechtigter \
         Interessen (Einbruchschutz).\n\n",
    );

    out.push_str("2. Betroffene Bereiche\n");
    out.push_str(&format!("{} Kameras wurden identifiziert:\n", input.cameras.len()));
    for camera in &input.cameras {
        out.push_str(&format!("- {} auf {}\n", camera.name, camera.floor));
    }

    out.push_str(
        "\n3. Erforderliche Maßnahmen\n\
         - Hinweisschilder anbringen\n\
         - Speicherfristen beachten (max. 72 Stunden)\n\
         - Zugriffskontrolle implementieren\n\
         - Datenschutzerklärung erstellen\n\n\
         4. Technische Empfehlungen\n\
         - Verschlüsselung der Übertragung\n\
         - Sichere Passwörter verwenden\n\
         - Regelmäßige Updates\n\n\
         5. Dokumentationspflichten\n\
         - Verzeichnis der Verarbeitungstätigkeiten\n\
         - Technische und organisatorische Maßnahmen\n\
         - Datenschutz-Folgenabschätzung bei Bedarf\n\n\
         Hinweis: Dies ist eine automatisch generierte Zusammenfassung. Konsultieren Sie einen \
         Datenschutzexperten für eine vollständige Bewertung.",
    );
    out
}

// =============================================================================
// DESK
// =============================================================================

/// User-visible report state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Pending,
    Ready(String),
    /// Generation failed; carries the user-facing message.
    Failed(String),
}

/// Identifies one report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTicket(u64);

/// Holds the latest report and discards stale completions.
#[derive(Debug, Default)]
pub struct ReportDesk {
    generation: u64,
    status: ReportStatus,
}

impl ReportDesk {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> &ReportStatus {
        &self.status
    }

    /// Start a request. Any earlier outstanding ticket becomes stale.
    pub fn begin(&mut self) -> ReportTicket {
        self.generation += 1;
        self.status = ReportStatus::Pending;
        ReportTicket(self.generation)
    }

    /// Record a result. Returns false, leaving the status alone, for a stale ticket.
    pub fn complete(&mut self, ticket: ReportTicket, result: Result<String, ReportError>) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, latest = self.generation, "stale report discarded");
            return false;
        }
        self.status = match result {
            Ok(text) => {
                info!(generation = ticket.0, bytes = text.len(), "report ready");
                ReportStatus::Ready(text)
            }
            Err(e) => {
                error!(generation = ticket.0, error = %e, "report generation failed");
                ReportStatus::Failed(REPORT_FAILED_MESSAGE.to_owned())
            }
        };
        true
    }

    /// Run one request to completion with `generator`.
    pub async fn run(&mut self, generator: &dyn ReportGenerator, input: &ReportInput) -> &ReportStatus {
        let ticket = self.begin();
        let result = generator.generate(input).await;
        self.complete(ticket, result);
        &self.status
    }
}
