pub mod export;
pub mod pool;
pub mod queries;
pub mod store;

pub use export::write_debts_csv;
pub use pool::create_pool;
pub use store::{MovementStore, PgMovementStore};
