use super::SkipReason;
use crate::model::TransitError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs::File, path::Path};

pub const STATS_FILENAME: &str = "fusion-stats.json";

/// counts of what a fusion run added to the network and what it skipped.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionStats {
    pub relations: usize,
    pub stops_inserted: usize,
    pub stops_resolved: usize,
    pub stops_unresolved: usize,
    pub transfer_edges_inserted: usize,
    pub route_edges_inserted: usize,
    pub route_profiles_interned: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl FusionStats {
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or_default()
    }

    pub fn log_summary(&self) {
        log::info!(
            "fused {} relations: {} stops inserted ({} resolved, {} unresolved), {} transfer edges, {} route edges, {} route profiles",
            self.relations,
            self.stops_inserted,
            self.stops_resolved,
            self.stops_unresolved,
            self.transfer_edges_inserted,
            self.route_edges_inserted,
            self.route_profiles_interned
        );
        for (reason, count) in self.skipped.iter() {
            log::info!("  {reason}: {count}");
        }
    }

    /// writes these stats as pretty JSON into the output directory. an
    /// existing file is left in place unless `overwrite` is set.
    pub fn write_json(&self, output_directory: &Path, overwrite: bool) -> Result<(), TransitError> {
        let filepath = output_directory.join(STATS_FILENAME);
        if filepath.exists() && !overwrite {
            log::warn!(
                "{} exists and overwrite is false, skipping",
                filepath.to_string_lossy()
            );
            return Ok(());
        }
        let file = File::create(&filepath).map_err(|e| {
            TransitError::OutputError(format!(
                "unable to create file {}: {e}",
                filepath.to_string_lossy()
            ))
        })?;
        serde_json::to_writer_pretty(file, self).map_err(|e| {
            TransitError::OutputError(format!(
                "unable to write {}: {e}",
                filepath.to_string_lossy()
            ))
        })
    }
}
