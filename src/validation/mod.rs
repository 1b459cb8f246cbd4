pub(crate) mod config_validation;
mod validation_utils;
