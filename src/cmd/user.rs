/*!
`user.rs` - user subcommands.

  create-user, invite-user, assign-role            (fail on non-zero exit)
  reset-password, reset-mfa, permanent-delete-user,
  permanent-delete-all-users                        (print stdout, or stderr on failure)
*/

use clap::Args;

use super::shared::{Outcome, Session};
use mattermost_admin::Result;

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub team_name: String,

    #[arg(long)]
    pub email: String,

    /// Platform config file (defaults to <install>/config/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Args, Debug)]
pub struct InviteUserArgs {
    #[arg(long)]
    pub team_name: String,

    #[arg(long)]
    pub email: String,

    /// Site URL used in the invitation link
    #[arg(long)]
    pub site_url: String,
}

#[derive(Args, Debug)]
pub struct AssignRoleArgs {
    #[arg(long)]
    pub email: String,

    /// Role name, e.g. system_admin
    #[arg(long)]
    pub role: String,
}

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct ResetMfaArgs {
    #[arg(long)]
    pub username: String,
}

#[derive(Args, Debug)]
pub struct PermanentDeleteUserArgs {
    #[arg(long)]
    pub email: String,
}

/// Both values are accepted but not forwarded to the platform binary.
#[derive(Args, Debug)]
pub struct PermanentDeleteAllUsersArgs {
    #[arg(long)]
    pub team_name: String,

    #[arg(long)]
    pub email: String,
}

pub fn execute_create_user(session: &Session, args: CreateUserArgs) -> Result<Outcome> {
    session.platform.create_user(
        &args.username,
        &args.password,
        &args.team_name,
        &args.email,
        args.config.as_deref(),
    )?;
    Ok(Outcome::Done)
}

pub fn execute_invite_user(session: &Session, args: InviteUserArgs) -> Result<Outcome> {
    session
        .platform
        .invite_user(&args.team_name, &args.email, &args.site_url)
        .map(Outcome::Flag)
}

pub fn execute_assign_role(session: &Session, args: AssignRoleArgs) -> Result<Outcome> {
    session.platform.assign_role(&args.email, &args.role)?;
    Ok(Outcome::Done)
}

pub fn execute_reset_password(session: &Session, args: ResetPasswordArgs) -> Result<Outcome> {
    session
        .platform
        .reset_password(&args.email, &args.password)
        .map(Outcome::Text)
}

pub fn execute_reset_mfa(session: &Session, args: ResetMfaArgs) -> Result<Outcome> {
    session.platform.reset_mfa(&args.username).map(Outcome::Text)
}

pub fn execute_permanent_delete_user(
    session: &Session,
    args: PermanentDeleteUserArgs,
) -> Result<Outcome> {
    session
        .platform
        .permanent_delete_user(&args.email)
        .map(Outcome::Text)
}

pub fn execute_permanent_delete_all_users(
    session: &Session,
    args: PermanentDeleteAllUsersArgs,
) -> Result<Outcome> {
    session
        .platform
        .permanent_delete_all_users(&args.team_name, &args.email)
        .map(Outcome::Text)
}
