pub mod analysis;
pub mod ranking;
pub mod reference_document;
pub mod scraped_content;
pub mod url_extraction;

pub use analysis::*;
pub use ranking::*;
pub use reference_document::*;
pub use scraped_content::*;
pub use url_extraction::*;
