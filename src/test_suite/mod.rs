pub(crate) mod reports;
pub(crate) mod tables;
