pub mod query_service;
pub mod summary_service;
pub mod transaction_service;

pub use query_service::QueryService;
pub use summary_service::SummaryService;
pub use transaction_service::TransactionService;
