use crate::constants::REPORT_ID;
use crate::extract::flat_record::FlatRecord;
use std::collections::BTreeSet;

/// The column set needed to serialise a batch of heterogeneous records.
///
/// `report_id` always comes first, every other key seen in the batch follows
/// in lexicographic order. Record order does not change the result.
pub fn project_fields<'a>(records: impl IntoIterator<Item = &'a FlatRecord>) -> Vec<String> {
    let others: BTreeSet<&str> = records
        .into_iter()
        .flat_map(FlatRecord::keys)
        .filter(|key| *key != REPORT_ID)
        .collect();

    std::iter::once(REPORT_ID)
        .chain(others)
        .map(str::to_string)
        .collect()
}
