pub mod ledger;
pub mod movement;
pub mod pricing;
pub mod row;

pub use ledger::{ClientDebtSummary, CrmStats, Debt, MovementBalance, StatusDivergence};
pub use movement::{
    Movement, MovementItem, MovementStatus, MovementType, Payment, PaymentMethod,
    VerificationStatus,
};
pub use pricing::PriceBreakdown;
pub use row::{MovementRow, PaymentRow};
