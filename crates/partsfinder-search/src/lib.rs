pub mod client;
pub mod controller;
pub mod error;
pub mod normalize;
pub mod projection;
pub mod results;
mod retry;
pub mod session;
pub mod transport;
pub mod types;

pub use client::SearchClient;
pub use controller::SearchController;
pub use error::SearchError;
pub use normalize::normalize;
pub use projection::{
    active_products, results_view, stores_with_results, total_result_count, ResultsView, StoreTab,
};
pub use results::{SearchResults, StoreResults};
pub use session::{PendingSearch, SearchSession, SearchStatus};
pub use transport::SearchTransport;
