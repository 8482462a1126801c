pub mod announcement;
pub mod config;
pub mod error;
pub mod normalize;

pub use announcement::{AnnouncementRecord, Bucket, RawAnnouncement};
pub use config::Config;
pub use error::IngestError;
