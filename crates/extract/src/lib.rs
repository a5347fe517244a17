// ABOUTME: Main library entry point for the jobtrail job-posting extractor.
// ABOUTME: Re-exports the public API: Engine, EngineBuilder, JobRecord, ExtractError, ErrorCode, Options.

//! jobtrail-extract turns a job-posting page into a structured [`JobRecord`].
//!
//! Known job boards (LinkedIn, Indeed, Glassdoor, ZipRecruiter, Naukri) get
//! site-specific strategies; everything else goes through a generic
//! class-name heuristic. Results are merged "first value wins" and cleaned
//! before they are returned.
//!
//! # Example
//!
//! ```no_run
//! use jobtrail_extract::{Engine, ExtractError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let engine = Engine::builder().build();
//!     let record = engine.extract_url("https://www.indeed.com/viewjob?jk=abc").await?;
//!     println!("{} at {}", record.title, record.company);
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod normalize;
pub mod options;
pub mod patterns;
pub mod record;
pub mod resource;
pub mod salary;

pub use crate::classify::is_job_page;
pub use crate::dom::Page;
pub use crate::engine::Engine;
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::registry::ExtractorRegistry;
pub use crate::extractors::SiteExtractor;
pub use crate::normalize::{clean, RecordNormalizer};
pub use crate::options::{EngineBuilder, FieldLimits, Options, DEFAULT_DATE_FORMAT};
pub use crate::record::{
    FormEdits, JobFields, JobRecord, UNKNOWN_COMPANY, UNKNOWN_LOCATION, UNKNOWN_TITLE,
};
pub use crate::salary::{extract_salary_from_description, is_definitely_salary, is_likely_salary};
