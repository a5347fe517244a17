// ABOUTME: Application tracker for extracted job records: backend trait, JSON store and submission flow.
// ABOUTME: Re-exports Backend, JsonStore, ApplicationFlow and the wire types.

//! jobtrail-tracker records what happened to a job posting.
//!
//! A [`Backend`] answers duplicate checks and stores logged or saved jobs.
//! [`JsonStore`] is the bundled file-backed implementation. The
//! [`ApplicationFlow`] wraps a backend with the timeout, cancellation and
//! error-to-notification rules used by front ends.

pub mod backend;
pub mod error;
pub mod flow;
pub mod messages;
pub mod store;

pub use crate::backend::Backend;
pub use crate::error::ChannelError;
pub use crate::flow::{ApplicationFlow, FlowOptions, Notification, Prompt, Submission, ERROR_MESSAGE};
pub use crate::messages::{Ack, ExistsCheck};
pub use crate::store::{Applications, JsonStore};
