pub mod analyzer;
pub mod batch;
pub mod openai_client;
pub mod page_scraper;
pub mod site_analysis;

pub use analyzer::*;
pub use batch::*;
pub use openai_client::*;
pub use page_scraper::*;
pub use site_analysis::*;
