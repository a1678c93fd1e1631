/*!
`team.rs` - team subcommands: create-team, join-team, permanent-delete-team.
*/

use clap::Args;

use super::shared::{Outcome, Session};
use mattermost_admin::Result;

#[derive(Args, Debug)]
pub struct CreateTeamArgs {
    /// Team name
    #[arg(long)]
    pub team_name: String,

    /// Email of the team owner
    #[arg(long)]
    pub email: String,
}

#[derive(Args, Debug)]
pub struct JoinTeamArgs {
    /// Email of the user joining
    #[arg(long)]
    pub email: String,

    /// Team to join
    #[arg(long)]
    pub team_name: String,
}

#[derive(Args, Debug)]
pub struct PermanentDeleteTeamArgs {
    /// Team name (accepted, not forwarded to the platform binary)
    #[arg(long)]
    pub team_name: String,
}

pub fn execute_create_team(session: &Session, args: CreateTeamArgs) -> Result<Outcome> {
    session
        .platform
        .create_team(&args.team_name, &args.email)
        .map(Outcome::Flag)
}

pub fn execute_join_team(session: &Session, args: JoinTeamArgs) -> Result<Outcome> {
    session.platform.join_team(&args.email, &args.team_name)?;
    Ok(Outcome::Done)
}

pub fn execute_permanent_delete_team(
    session: &Session,
    args: PermanentDeleteTeamArgs,
) -> Result<Outcome> {
    session
        .platform
        .permanent_delete_team(&args.team_name)
        .map(Outcome::Text)
}
