pub(crate) mod dashboard;
pub(crate) mod goals;
pub(crate) mod monthly;
pub(crate) mod transactions;
