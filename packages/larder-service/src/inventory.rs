use std::path::Path;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};

use larder_config::Config;
use larder_domain::{InventorySnapshot, Thresholds};

use crate::LarderService;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReloadReport {
	pub ingredients_tracked: u64,
	pub lots_read: u64,
	pub rows_skipped: u64,
}

impl LarderService {
	/// Re-reads the lot file and swaps in a freshly built snapshot. Requests
	/// in flight keep the snapshot they already hold.
	pub fn reload_inventory(&self) -> ReloadReport {
		let (snapshot, report) = build_snapshot(&self.cfg, &self.thresholds);

		self.swap_snapshot(snapshot);

		report
	}
}

/// Loaded once at startup; a missing or malformed file means every ingredient
/// uses the global default.
pub(crate) fn load_thresholds(cfg: &Config) -> Thresholds {
	let fallback = cfg.inventory.default_low_threshold;

	match larder_ingest::read_thresholds(Path::new(&cfg.data.thresholds_path)) {
		Ok(file) => {
			info!(
				path = %cfg.data.thresholds_path,
				overrides = file.overrides.len(),
				rows_skipped = file.rows_skipped,
				"Loaded threshold overrides."
			);

			Thresholds::new(file.overrides, fallback)
		},
		Err(err) => {
			warn!(
				error = %err,
				path = %cfg.data.thresholds_path,
				"Threshold file unavailable; using the default threshold for every ingredient."
			);

			Thresholds::uniform(fallback)
		},
	}
}

pub(crate) fn build_snapshot(
	cfg: &Config,
	thresholds: &Thresholds,
) -> (InventorySnapshot, ReloadReport) {
	let today = OffsetDateTime::now_utc().date();

	match larder_ingest::read_lots(Path::new(&cfg.data.lots_path)) {
		Ok(file) => {
			let snapshot = InventorySnapshot::build(&file.lots, thresholds, today);
			let report = ReloadReport {
				ingredients_tracked: snapshot.len() as u64,
				lots_read: file.lots.len() as u64,
				rows_skipped: file.rows_skipped as u64,
			};

			info!(
				path = %cfg.data.lots_path,
				ingredients_tracked = report.ingredients_tracked,
				lots_read = report.lots_read,
				rows_skipped = report.rows_skipped,
				"Inventory snapshot rebuilt."
			);

			(snapshot, report)
		},
		Err(err) => {
			warn!(
				error = %err,
				path = %cfg.data.lots_path,
				"Lot file unavailable; serving with an empty inventory snapshot."
			);

			(InventorySnapshot::empty(thresholds.fallback()), ReloadReport::default())
		},
	}
}
