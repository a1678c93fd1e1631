//! Mattermost `platform` binary wrapper.
//!
//! [`Platform`] resolves the installation from [`Grains`], builds the option
//! vector for an [`Operation`] and hands it to a [`CommandRunner`]. The exit
//! code and output streams are then mapped to a value or an error according
//! to the operation's reporting convention:
//!   - strict: non-zero exit logs and fails with `OperationFailed`
//!   - soft:   exit code > 0 returns stderr, otherwise stdout; never fails on exit code
//!   - scan:   `join_channel` only, see [`Platform::join_channel`]

pub mod grains;
pub mod operation;
pub mod options;
pub mod runner;

use std::path::Path;

use tracing::{debug, error};

use crate::error::{ENTERPRISE_LICENSE_REQUIRED, PlatformError, Result};
pub use grains::{Grains, INSTALL_PATH_ENV, INSTALL_PATH_GRAIN};
pub use operation::Operation;
pub use options::{Param, Params, build_options};
pub use runner::{CommandRunner, Invocation, ProcessOutput, RecordingRunner, TokioRunner};

/// Installation `list_channels` is pinned to, regardless of grains.
pub const LIST_CHANNELS_INSTALL_PATH: &str = "/home/vagrant/mattermost";

/// True when any stderr line carries the enterprise license marker (case-sensitive).
pub fn requires_enterprise_license(stderr: &str) -> bool {
    stderr
        .lines()
        .any(|line| line.contains(ENTERPRISE_LICENSE_REQUIRED))
}

#[derive(Debug)]
pub struct Platform<R> {
    grains: Grains,
    runner: R,
}

impl<R: CommandRunner> Platform<R> {
    pub fn new(grains: Grains, runner: R) -> Self {
        Self { grains, runner }
    }

    pub fn grains(&self) -> &Grains {
        &self.grains
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /* ---- Path resolution (looked up on every call) ---- */

    pub fn installation_path(&self) -> Result<String> {
        self.grains.require(INSTALL_PATH_GRAIN).map(str::to_string)
    }

    pub fn binary_path(&self) -> Result<String> {
        Ok(self.installation_path()? + "/bin/platform")
    }

    pub fn default_config_path(&self) -> Result<String> {
        Ok(self.installation_path()? + "/config/config.json")
    }

    /* ---- Command building / dispatch ---- */

    /// Option vector for `command`, defaulting `-config` to this installation.
    pub fn build_options(&self, command: Option<&str>, params: &Params) -> Result<Vec<String>> {
        build_options(command, params, || self.default_config_path())
    }

    /// Run the platform binary with `args` from the installation directory.
    pub fn run(&self, args: &[String]) -> Result<ProcessOutput> {
        let program = self.binary_path()?;
        let cwd = self.installation_path()?;
        self.dispatch(&program, args, Path::new(&cwd))
    }

    fn dispatch(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        debug!(
            command = %Invocation::new(program, args, cwd).command_line(),
            cwd = %cwd.display(),
            "invoking platform"
        );
        let output = self.runner.run(program, args, cwd)?;
        debug!(code = output.code, "platform exited");
        Ok(output)
    }

    fn invoke(&self, op: Operation, params: &Params) -> Result<ProcessOutput> {
        let program = self.binary_path()?;
        let args = self.build_options(op.command_token(), params)?;
        let cwd = self.installation_path()?;
        debug!(operation = %op, "dispatching operation");
        self.dispatch(&program, &args, Path::new(&cwd))
    }

    fn strict(&self, op: Operation, params: &Params, failure: &str) -> Result<()> {
        let output = self.invoke(op, params)?;
        if output.code != 0 {
            error!("platform returned exit code '{}'.", output.code);
            return Err(PlatformError::OperationFailed(failure.to_string()));
        }
        Ok(())
    }

    fn soft(&self, op: Operation, params: &Params) -> Result<String> {
        let output = self.invoke(op, params)?;
        if output.code > 0 {
            return Ok(output.stderr);
        }
        Ok(output.stdout)
    }

    /* ---- Strict operations ---- */

    pub fn create_team(&self, team_name: &str, email: &str) -> Result<bool> {
        let params = Params::new()
            .with(Param::TeamName, team_name)
            .with(Param::Email, email);
        self.strict(Operation::CreateTeam, &params, "Could not create team.")?;
        Ok(true)
    }

    /// Succeeds with `()`: no success value is reported.
    pub fn create_user(
        &self,
        username: &str,
        password: &str,
        team_name: &str,
        email: &str,
        config: Option<&str>,
    ) -> Result<()> {
        let params = Params::new()
            .with(Param::Username, username)
            .with(Param::Password, password)
            .with(Param::TeamName, team_name)
            .with(Param::Email, email)
            .with_opt(Param::Config, config);
        self.strict(Operation::CreateUser, &params, "Could not create user.")
    }

    pub fn invite_user(&self, team_name: &str, email: &str, site_url: &str) -> Result<bool> {
        let params = Params::new()
            .with(Param::TeamName, team_name)
            .with(Param::Email, email)
            .with(Param::SiteUrl, site_url);
        self.strict(Operation::InviteUser, &params, "Could not invite user.")?;
        Ok(true)
    }

    pub fn join_team(&self, email: &str, team_name: &str) -> Result<()> {
        let params = Params::new()
            .with(Param::Email, email)
            .with(Param::TeamName, team_name);
        self.strict(
            Operation::JoinTeam,
            &params,
            "Could not invite user to join team.",
        )
    }

    pub fn assign_role(&self, email: &str, role: &str) -> Result<()> {
        let params = Params::new()
            .with(Param::Email, email)
            .with(Param::Role, role);
        self.strict(Operation::AssignRole, &params, "Could not create user.")
    }

    /* ---- Scan operation ---- */

    /// Never succeeds. Fails with [`PlatformError::LicenseRequired`] when stderr
    /// carries the enterprise license marker (any exit code), and with
    /// `OperationFailed("Could not create user.")` otherwise, even on a zero exit.
    /// `license` is accepted but not used.
    pub fn join_channel(
        &self,
        email: &str,
        team_name: &str,
        channel_name: &str,
        _license: Option<&str>,
    ) -> Result<()> {
        let params = Params::new()
            .with(Param::Email, email)
            .with(Param::TeamName, team_name)
            .with(Param::ChannelName, channel_name);
        let output = self.invoke(Operation::JoinChannel, &params)?;

        if requires_enterprise_license(&output.stderr) {
            return Err(PlatformError::LicenseRequired);
        }
        if output.code != 0 {
            error!("platform returned exit code '{}'.", output.code);
        }
        Err(PlatformError::OperationFailed("Could not create user.".into()))
    }

    /* ---- Channel no-ops ---- */

    pub fn leave_channel(&self) -> i32 {
        0
    }

    pub fn restore_channel(&self) -> i32 {
        0
    }

    /// Lists channels of the installation at [`LIST_CHANNELS_INSTALL_PATH`],
    /// ignoring grains and the exit code. Lines are split on `'\n'`, so a
    /// trailing newline yields a trailing empty entry.
    pub fn list_channels(&self) -> Result<Vec<String>> {
        let program = format!("{LIST_CHANNELS_INSTALL_PATH}/bin/platform");
        let token = Operation::ListChannels.command_token().unwrap_or("-list_channels");
        let args = vec![
            format!("--config={LIST_CHANNELS_INSTALL_PATH}/config/config.json"),
            token.to_string(),
        ];
        let output = self.dispatch(&program, &args, Path::new(LIST_CHANNELS_INSTALL_PATH))?;
        Ok(output.stdout.split('\n').map(str::to_string).collect())
    }

    /* ---- Soft operations ---- */

    pub fn reset_password(&self, email: &str, password: &str) -> Result<String> {
        let params = Params::new()
            .with(Param::Email, email)
            .with(Param::Password, password);
        self.soft(Operation::ResetPassword, &params)
    }

    pub fn reset_mfa(&self, username: &str) -> Result<String> {
        let params = Params::new().with(Param::Username, username);
        self.soft(Operation::ResetMfa, &params)
    }

    pub fn reset_database(&self) -> Result<String> {
        self.soft(Operation::ResetDatabase, &Params::new())
    }

    pub fn permanent_delete_user(&self, email: &str) -> Result<String> {
        let params = Params::new().with(Param::Email, email);
        self.soft(Operation::PermanentDeleteUser, &params)
    }

    /// `team_name` and `email` are accepted but not passed on.
    pub fn permanent_delete_all_users(&self, _team_name: &str, _email: &str) -> Result<String> {
        self.soft(Operation::PermanentDeleteAllUsers, &Params::new())
    }

    /// Issues `-upload_license`; `team_name` is not passed on.
    pub fn permanent_delete_team(&self, _team_name: &str) -> Result<String> {
        self.soft(Operation::PermanentDeleteTeam, &Params::new())
    }

    /// Issues `-reset_database`; `license_path` is not passed on.
    pub fn upload_license(&self, _license_path: &str) -> Result<String> {
        self.soft(Operation::UploadLicense, &Params::new())
    }

    pub fn upgrade_db_30(&self) -> Result<String> {
        self.soft(Operation::UpgradeDb30, &Params::new())
    }

    pub fn version(&self) -> Result<String> {
        self.soft(Operation::Version, &Params::new())
    }
}
