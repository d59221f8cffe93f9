#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod error;
pub mod frame_source;
pub mod hashing;
pub mod packet;
pub mod router;
pub mod tables;
pub mod telemetry;
pub mod tlv;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{load_from_path, Config};
pub use error::{NdnfwdError, Result};
pub use frame_source::FrameSource;
pub use hashing::{hash_name, HashAlgorithm};
pub use packet::Verdict;
pub use router::Router;
