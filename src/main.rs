use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;

use cmd::{
    AssignRoleArgs, CreateTeamArgs, CreateUserArgs, GlobalOpts, InviteUserArgs, JoinChannelArgs,
    JoinTeamArgs, PermanentDeleteAllUsersArgs, PermanentDeleteTeamArgs, PermanentDeleteUserArgs,
    ResetMfaArgs, ResetPasswordArgs, Session, UploadLicenseArgs,
};
use mattermost_admin::{Operation, utils};

/// Mattermost Admin - drive the Mattermost `platform` command line tools.
///
/// Every subcommand runs `<install>/bin/platform <command> -config=... [-<name>=<value> ...]`
/// from the installation directory and reports the result.
///
/// Installation path (first match wins):
///   --install-path PATH
///   MATTERMOST_PATH        environment variable
///   --grains FILE          JSON/YAML facts file with a `mattermost_path` key
///                          (or MATTERMOST_GRAINS environment variable)
///
/// Examples:
///   mattermost-admin --install-path /opt/mattermost create-team --team-name acme --email admin@acme.io
///   mattermost-admin --grains /etc/salt/grains.yaml --json version
///   mattermost-admin --dry-run reset-password --email bob@acme.io --password s3cret
#[derive(Parser, Debug)]
#[command(
    name = "mattermost-admin",
    version,
    author,
    about = "Mattermost Admin - drive the Mattermost platform command line tools",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print the platform command lines instead of running them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Grains file (JSON or YAML) holding `mattermost_path`
    #[arg(long, value_name = "FILE", global = true)]
    grains: Option<std::path::PathBuf>,

    /// Mattermost installation directory (overrides grains)
    #[arg(long, value_name = "PATH", global = true)]
    install_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a team
    CreateTeam(CreateTeamArgs),
    /// Create a user
    CreateUser(CreateUserArgs),
    /// Invite a user to a team by email
    InviteUser(InviteUserArgs),
    /// Add a user to a team
    JoinTeam(JoinTeamArgs),
    /// Assign a role to a user
    AssignRole(AssignRoleArgs),
    /// Add a user to a channel
    JoinChannel(JoinChannelArgs),
    /// Remove a user from a channel (no-op)
    LeaveChannel,
    /// Restore an archived channel (no-op)
    RestoreChannel,
    /// List channels
    ListChannels,
    /// Reset a user's password
    ResetPassword(ResetPasswordArgs),
    /// Turn off multi-factor authentication for a user
    ResetMfa(ResetMfaArgs),
    /// Reset the database
    ResetDatabase,
    /// Permanently delete a user
    PermanentDeleteUser(PermanentDeleteUserArgs),
    /// Permanently delete all users
    PermanentDeleteAllUsers(PermanentDeleteAllUsersArgs),
    /// Permanently delete a team
    PermanentDeleteTeam(PermanentDeleteTeamArgs),
    /// Upload a license
    UploadLicense(UploadLicenseArgs),
    /// Upgrade the database from version 2.x to 3.0
    #[command(name = "upgrade-db-30")]
    UpgradeDb30,
    /// Print the platform version
    Version,
}

impl Commands {
    pub fn operation(&self) -> Operation {
        match self {
            Commands::CreateTeam(_) => Operation::CreateTeam,
            Commands::CreateUser(_) => Operation::CreateUser,
            Commands::InviteUser(_) => Operation::InviteUser,
            Commands::JoinTeam(_) => Operation::JoinTeam,
            Commands::AssignRole(_) => Operation::AssignRole,
            Commands::JoinChannel(_) => Operation::JoinChannel,
            Commands::LeaveChannel => Operation::LeaveChannel,
            Commands::RestoreChannel => Operation::RestoreChannel,
            Commands::ListChannels => Operation::ListChannels,
            Commands::ResetPassword(_) => Operation::ResetPassword,
            Commands::ResetMfa(_) => Operation::ResetMfa,
            Commands::ResetDatabase => Operation::ResetDatabase,
            Commands::PermanentDeleteUser(_) => Operation::PermanentDeleteUser,
            Commands::PermanentDeleteAllUsers(_) => Operation::PermanentDeleteAllUsers,
            Commands::PermanentDeleteTeam(_) => Operation::PermanentDeleteTeam,
            Commands::UploadLicense(_) => Operation::UploadLicense,
            Commands::UpgradeDb30 => Operation::UpgradeDb30,
            Commands::Version => Operation::Version,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let session = Session::open(GlobalOpts {
        json: cli.json,
        dry_run: cli.dry_run,
        grains_file: cli.grains,
        install_path: cli.install_path,
    })?;

    let op = cli.command.operation();
    let result = match cli.command {
        Commands::CreateTeam(args) => cmd::team::execute_create_team(&session, args),
        Commands::CreateUser(args) => cmd::user::execute_create_user(&session, args),
        Commands::InviteUser(args) => cmd::user::execute_invite_user(&session, args),
        Commands::JoinTeam(args) => cmd::team::execute_join_team(&session, args),
        Commands::AssignRole(args) => cmd::user::execute_assign_role(&session, args),
        Commands::JoinChannel(args) => cmd::channel::execute_join_channel(&session, args),
        Commands::LeaveChannel => cmd::channel::execute_leave_channel(&session),
        Commands::RestoreChannel => cmd::channel::execute_restore_channel(&session),
        Commands::ListChannels => cmd::channel::execute_list_channels(&session),
        Commands::ResetPassword(args) => cmd::user::execute_reset_password(&session, args),
        Commands::ResetMfa(args) => cmd::user::execute_reset_mfa(&session, args),
        Commands::ResetDatabase => cmd::system::execute_reset_database(&session),
        Commands::PermanentDeleteUser(args) => {
            cmd::user::execute_permanent_delete_user(&session, args)
        }
        Commands::PermanentDeleteAllUsers(args) => {
            cmd::user::execute_permanent_delete_all_users(&session, args)
        }
        Commands::PermanentDeleteTeam(args) => {
            cmd::team::execute_permanent_delete_team(&session, args)
        }
        Commands::UploadLicense(args) => cmd::system::execute_upload_license(&session, args),
        Commands::UpgradeDb30 => cmd::system::execute_upgrade_db_30(&session),
        Commands::Version => cmd::system::execute_version(&session),
    };

    cmd::report(&session, op, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_team_with_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mattermost-admin",
            "create-team",
            "--team-name",
            "acme",
            "--email",
            "a@b.com",
            "--json",
            "--install-path",
            "/opt/mattermost",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.install_path.as_deref(), Some("/opt/mattermost"));
        match cli.command {
            Commands::CreateTeam(args) => {
                assert_eq!(args.team_name, "acme");
                assert_eq!(args.email, "a@b.com");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_user_config_is_optional() {
        let cli = Cli::try_parse_from([
            "mattermost-admin",
            "create-user",
            "--username",
            "bob",
            "--password",
            "pw",
            "--team-name",
            "acme",
            "--email",
            "bob@acme.io",
        ])
        .unwrap();
        match cli.command {
            Commands::CreateUser(args) => assert!(args.config.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn upgrade_db_30_name_and_operation() {
        let cli = Cli::try_parse_from(["mattermost-admin", "upgrade-db-30"]).unwrap();
        assert_eq!(cli.command.operation(), Operation::UpgradeDb30);
    }

    #[test]
    fn missing_required_flag_is_rejected() {
        let err = Cli::try_parse_from(["mattermost-admin", "reset-mfa"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["mattermost-admin", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn every_operation_has_a_subcommand() {
        use clap::CommandFactory;
        let command = Cli::command();
        for op in Operation::variants() {
            let name = op.name().replace('_', "-");
            assert!(
                command.find_subcommand(&name).is_some(),
                "missing subcommand {name}"
            );
        }
    }
}
