/*!
Operations exposed by this crate.

Each operation has an external name (`create_team`, ...) and the command
token it actually hands to the platform binary. The two are not always in
agreement: `permanent_delete_team` issues `-upload_license` and
`upload_license` issues `-reset_database`. Those pairings are kept as-is
because existing automation may depend on them.
*/

use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    CreateTeam,
    CreateUser,
    InviteUser,
    JoinTeam,
    AssignRole,
    JoinChannel,
    LeaveChannel,
    RestoreChannel,
    ListChannels,
    ResetPassword,
    ResetMfa,
    ResetDatabase,
    PermanentDeleteUser,
    PermanentDeleteAllUsers,
    PermanentDeleteTeam,
    UploadLicense,
    UpgradeDb30,
    Version,
}

impl Operation {
    pub const fn variants() -> &'static [Operation] {
        &[
            Operation::CreateTeam,
            Operation::CreateUser,
            Operation::InviteUser,
            Operation::JoinTeam,
            Operation::AssignRole,
            Operation::JoinChannel,
            Operation::LeaveChannel,
            Operation::RestoreChannel,
            Operation::ListChannels,
            Operation::ResetPassword,
            Operation::ResetMfa,
            Operation::ResetDatabase,
            Operation::PermanentDeleteUser,
            Operation::PermanentDeleteAllUsers,
            Operation::PermanentDeleteTeam,
            Operation::UploadLicense,
            Operation::UpgradeDb30,
            Operation::Version,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateTeam => "create_team",
            Operation::CreateUser => "create_user",
            Operation::InviteUser => "invite_user",
            Operation::JoinTeam => "join_team",
            Operation::AssignRole => "assign_role",
            Operation::JoinChannel => "join_channel",
            Operation::LeaveChannel => "leave_channel",
            Operation::RestoreChannel => "restore_channel",
            Operation::ListChannels => "list_channels",
            Operation::ResetPassword => "reset_password",
            Operation::ResetMfa => "reset_mfa",
            Operation::ResetDatabase => "reset_database",
            Operation::PermanentDeleteUser => "permanent_delete_user",
            Operation::PermanentDeleteAllUsers => "permanent_delete_all_users",
            Operation::PermanentDeleteTeam => "permanent_delete_team",
            Operation::UploadLicense => "upload_license",
            Operation::UpgradeDb30 => "upgrade_db_30",
            Operation::Version => "version",
        }
    }

    /// Command token passed to the binary, or `None` for operations that never run it.
    pub fn command_token(&self) -> Option<&'static str> {
        let token = match self {
            Operation::LeaveChannel | Operation::RestoreChannel => return None,
            Operation::CreateTeam => "-create_team",
            Operation::CreateUser => "-create_user",
            Operation::InviteUser => "-invite_user",
            Operation::JoinTeam => "-join_team",
            Operation::AssignRole => "-assign_role",
            Operation::JoinChannel => "-join_channel",
            Operation::ListChannels => "-list_channels",
            Operation::ResetPassword => "-reset_password",
            Operation::ResetMfa => "-reset_mfa",
            Operation::ResetDatabase => "-reset_database",
            Operation::PermanentDeleteUser => "-permanent_delete_user",
            Operation::PermanentDeleteAllUsers => "-permanent_delete_all_users",
            Operation::PermanentDeleteTeam => "-upload_license",
            Operation::UploadLicense => "-reset_database",
            Operation::UpgradeDb30 => "-upgrade_db_30",
            Operation::Version => "-version",
        };
        Some(token)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Operation;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = Operation::variants().iter().map(|o| o.name()).collect();
        assert_eq!(names.len(), Operation::variants().len());
    }

    #[test]
    fn tokens_match_names_except_known_pairs() {
        for op in Operation::variants() {
            let Some(token) = op.command_token() else {
                continue;
            };
            match op {
                Operation::PermanentDeleteTeam => assert_eq!(token, "-upload_license"),
                Operation::UploadLicense => assert_eq!(token, "-reset_database"),
                _ => assert_eq!(token, format!("-{}", op.name())),
            }
        }
    }

    #[test]
    fn channel_noops_issue_nothing() {
        assert_eq!(Operation::LeaveChannel.command_token(), None);
        assert_eq!(Operation::RestoreChannel.command_token(), None);
    }
}
