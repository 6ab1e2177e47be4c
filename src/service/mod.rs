//! Service layer: ledger operations and the pending-set resolver.

pub mod ledger;
pub mod resolver;

pub use ledger::LedgerService;
pub use resolver::LedgerState;
