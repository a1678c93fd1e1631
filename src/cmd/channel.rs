/*!
`channel.rs` - channel subcommands.

  join-channel     always reports an error (license marker or generic failure)
  leave-channel    no-op, prints 0
  restore-channel  no-op, prints 0
  list-channels    one channel per line, from the pinned vagrant installation
*/

use clap::Args;

use super::shared::{Outcome, Session};
use mattermost_admin::Result;

#[derive(Args, Debug)]
pub struct JoinChannelArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub team_name: String,

    #[arg(long)]
    pub channel_name: String,

    /// License file (accepted, currently unused)
    #[arg(long, value_name = "PATH")]
    pub license: Option<String>,
}

pub fn execute_join_channel(session: &Session, args: JoinChannelArgs) -> Result<Outcome> {
    session.platform.join_channel(
        &args.email,
        &args.team_name,
        &args.channel_name,
        args.license.as_deref(),
    )?;
    Ok(Outcome::Done)
}

pub fn execute_leave_channel(session: &Session) -> Result<Outcome> {
    Ok(Outcome::Code(session.platform.leave_channel()))
}

pub fn execute_restore_channel(session: &Session) -> Result<Outcome> {
    Ok(Outcome::Code(session.platform.restore_channel()))
}

pub fn execute_list_channels(session: &Session) -> Result<Outcome> {
    session.platform.list_channels().map(Outcome::Lines)
}
