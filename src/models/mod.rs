mod account;
mod audit;
mod category;
mod limits;
mod transaction;

pub use account::{AccountType, Mode};
pub use audit::{AuditObservation, ComplianceCheck, ComplianceStatus, ObservationKind};
pub use category::{Category, Direction, RiskLevel, Tranche, VerificationStatus};
pub use limits::{FundingLimits, GROSS, NET_WITH_TDS};
pub use transaction::Transaction;
