/*!
Subcommand modules.

  src/cmd/
    mod.rs      (this file: module declarations + re-exports)
    shared.rs   (GlobalOpts, Session, Outcome, report / output_error)
    format.rs   (human output styling)
    team.rs     (create-team, join-team, permanent-delete-team)
    user.rs     (create-user, invite-user, assign-role, resets, deletes)
    channel.rs  (join/leave/restore/list channels)
    system.rs   (reset-database, upload-license, upgrade-db-30, version)

Conventions:
  - Argument structs derive `clap::Args` and mirror the operation's parameters.
  - Each `execute_*` returns `mattermost_admin::Result<Outcome>`; rendering
    is left to `shared::report`.
*/

pub mod channel;
pub mod format;
pub mod shared;
pub mod system;
pub mod team;
pub mod user;

pub use channel::JoinChannelArgs;
pub use shared::{GlobalOpts, Session, report};
pub use system::UploadLicenseArgs;
pub use team::{CreateTeamArgs, JoinTeamArgs, PermanentDeleteTeamArgs};
pub use user::{
    AssignRoleArgs, CreateUserArgs, InviteUserArgs, PermanentDeleteAllUsersArgs,
    PermanentDeleteUserArgs, ResetMfaArgs, ResetPasswordArgs,
};
