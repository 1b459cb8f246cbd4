use crate::validation::validation_utils::{fail_validation_on_duplicates, fail_validation_on_value};
use std::collections::HashSet;
use validator::ValidationError;

/// Gene symbols become file names, so they must be unique and free of path separators.
pub fn validate_gene_names(genes: &[String]) -> Result<(), ValidationError> {
    if let Some(invalid) = genes
        .iter()
        .find(|gene| gene.contains(['/', '\\']) || gene.trim().is_empty())
    {
        return fail_validation_on_value(invalid, "invalid_gene", "Invalid gene name");
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let duplicates: Vec<&str> = genes
        .iter()
        .map(String::as_str)
        .filter(|gene| !seen.insert(*gene))
        .collect();
    fail_validation_on_duplicates(&duplicates, "duplicates", "Found duplicate genes")
}

/// Artifact names are plain file names inside the output directory.
pub fn validate_file_name(file_name: &str) -> Result<(), ValidationError> {
    if file_name.trim().is_empty() || file_name.contains(['/', '\\']) {
        return fail_validation_on_value(
            &file_name,
            "invalid_file_name",
            "File names must be non-empty and must not contain path separators",
        );
    }
    Ok(())
}
