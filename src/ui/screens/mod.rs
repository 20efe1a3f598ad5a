pub(crate) mod analyze;
pub(crate) mod dashboard;
pub(crate) mod reports;
pub(crate) mod transactions;
