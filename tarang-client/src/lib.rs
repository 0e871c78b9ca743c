pub mod api;
pub mod dashboard;
pub mod drafts;
pub mod submit;
pub mod wizard;

pub use api::{ApiClientError, BookingApi, HttpBookingApi};
pub use dashboard::{DashboardPoller, DashboardSnapshot};
pub use drafts::{DraftQueue, LocalDraft};
pub use submit::{submit_with_fallback, SubmitOutcome};
pub use wizard::{BookingWizard, TierPrices, WizardError, WizardStep};
