pub mod crm;
pub mod ledger;
pub mod normalize;
pub mod pricing;

pub use crm::CrmService;
pub use pricing::{PricingEngine, DEFAULT_TAX_RATE};
