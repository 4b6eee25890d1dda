pub mod pricing;
pub mod purchase_form;
pub mod rate_provider;
pub mod sales;
pub mod submission;

pub use purchase_form::{EditOutcome, PurchaseForm, RejectReason};
pub use rate_provider::{RateFeed, RateSource, SimulatedRateSource};
pub use sales::SaleDraft;
pub use submission::{PurchaseService, SubmitMode, SubmitOutcome};
