//! Payment report preparation, submission and listing.
//!
//! A resident reports a payment by allocating amounts to pending charges and
//! listing the instruments that funded it (transfers, cash, credits). Reports
//! are created in `EN_PROCESO` and later approved or rejected by staff.

mod engine;
mod error;
mod evidence;
mod repository;
mod summary;
mod types;

pub use engine::{
    MAX_CLIENT_RATE, MAX_LINE_AMOUNT, MAX_TOTAL_BASE, PaymentSubmissionEngine, REPORT_LIST_LIMIT,
};
pub use error::PaymentError;
pub use evidence::{ALLOWED_EVIDENCE_EXTENSIONS, DecodedEvidence, EvidencePolicy, evidence_key};
pub use repository::{FundingRepository, InsertOutcome, PaymentReportRepository};
pub use summary::TotalsAccumulator;
pub use types::{
    AllocationDetail, AllocationLine, AllocationRequest, CreditBalance, DetailSummary,
    EvidenceUpload, InstrumentLine, InstrumentRequest, NewPaymentReport, PaymentAccount,
    PaymentReport, PreparedPayment, Rated, ReportStatus, ReportTotals, SubmissionMetadata,
    SubmissionReceipt, SubmitPaymentInput,
};
