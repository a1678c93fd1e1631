/*!
`system.rs` - installation-wide subcommands: reset-database, upload-license,
upgrade-db-30, version. Each prints the platform's stdout, or its stderr when
the exit code is positive.
*/

use clap::Args;

use super::shared::{Outcome, Session};
use mattermost_admin::Result;

#[derive(Args, Debug)]
pub struct UploadLicenseArgs {
    /// License file (accepted, not forwarded; the binary is invoked with -reset_database)
    #[arg(long, value_name = "PATH")]
    pub license_path: String,
}

pub fn execute_reset_database(session: &Session) -> Result<Outcome> {
    session.platform.reset_database().map(Outcome::Text)
}

pub fn execute_upload_license(session: &Session, args: UploadLicenseArgs) -> Result<Outcome> {
    session
        .platform
        .upload_license(&args.license_path)
        .map(Outcome::Text)
}

pub fn execute_upgrade_db_30(session: &Session) -> Result<Outcome> {
    session.platform.upgrade_db_30().map(Outcome::Text)
}

pub fn execute_version(session: &Session) -> Result<Outcome> {
    session.platform.version().map(Outcome::Text)
}
