//! Mattermost administration through the `platform` command line tools.
//!
//! ```no_run
//! use mattermost_admin::platform::{Grains, Platform, TokioRunner};
//!
//! let platform = Platform::new(Grains::with_install_path("/opt/mattermost"), TokioRunner::new());
//! platform.create_team("acme", "admin@acme.io")?;
//! println!("{}", platform.version()?);
//! # Ok::<(), mattermost_admin::PlatformError>(())
//! ```

pub mod error;
pub mod platform;
pub mod utils;

pub use error::{PlatformError, Result};
pub use platform::{Grains, Operation, Platform};
