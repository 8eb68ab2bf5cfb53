pub mod error_record;
pub mod project;
pub mod result_record;
pub mod summary;

pub use error_record::*;
pub use project::*;
pub use result_record::*;
pub use summary::*;
