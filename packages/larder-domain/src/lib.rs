pub mod inventory;
pub mod rank;
pub mod substitution;
pub mod threshold;

pub use inventory::{IngredientState, InventorySnapshot, LotRecord, StockStatus, classify};
pub use rank::rank;
pub use substitution::{
	Availability, MenuCandidate, SubstitutionRule, SubstitutionSuggestion, resolve_substitution,
};
pub use threshold::Thresholds;
