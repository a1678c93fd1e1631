/*!
shared.rs - helpers shared by every subcommand.

Focus:
  - GlobalOpts: flags common to all subcommands (--json, --dry-run, grains sources)
  - Session: resolves grains, picks the runner and owns the `Platform`
  - Outcome + report / output_error: JSON or human rendering of a result
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji};
use mattermost_admin::platform::{
    CommandRunner, Grains, INSTALL_PATH_ENV, INSTALL_PATH_GRAIN, Operation, Platform,
    ProcessOutput, RecordingRunner, TokioRunner,
};

/// Environment fallback for `--grains`.
pub const GRAINS_FILE_ENV: &str = "MATTERMOST_GRAINS";

/* ---- Global options ---- */

#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    pub json: bool,
    pub dry_run: bool,
    pub grains_file: Option<PathBuf>,
    pub install_path: Option<String>,
}

fn env_non_blank(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl GlobalOpts {
    /// Grains with precedence: --install-path > MATTERMOST_PATH > grains file.
    pub fn load_grains(&self) -> Result<Grains> {
        let file = self
            .grains_file
            .clone()
            .or_else(|| env_non_blank(GRAINS_FILE_ENV).map(PathBuf::from));
        let env_path = env_non_blank(INSTALL_PATH_ENV);
        self.merge_grains(file.as_deref(), env_path)
    }

    fn merge_grains(&self, file: Option<&Path>, env_path: Option<String>) -> Result<Grains> {
        let mut grains = match file {
            Some(path) => Grains::from_file(path)
                .with_context(|| format!("Failed to load grains from {}", path.display()))?,
            None => Grains::new(),
        };
        if let Some(p) = env_path {
            grains.set(INSTALL_PATH_GRAIN, p);
        }
        if let Some(p) = self.install_path.as_deref().filter(|p| !p.trim().is_empty()) {
            grains.set(INSTALL_PATH_GRAIN, p);
        }
        Ok(grains)
    }
}

/* ---- Runner selection ---- */

/// Real spawn, or record-only for `--dry-run`.
#[derive(Debug)]
pub enum SessionRunner {
    Live(TokioRunner),
    DryRun(RecordingRunner),
}

impl CommandRunner for SessionRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> mattermost_admin::Result<ProcessOutput> {
        match self {
            SessionRunner::Live(r) => r.run(program, args, cwd),
            SessionRunner::DryRun(r) => r.run(program, args, cwd),
        }
    }
}

pub struct Session {
    pub opts: GlobalOpts,
    pub platform: Platform<SessionRunner>,
}

impl Session {
    pub fn open(opts: GlobalOpts) -> Result<Self> {
        let grains = opts.load_grains()?;
        let runner = if opts.dry_run {
            SessionRunner::DryRun(RecordingRunner::new())
        } else {
            SessionRunner::Live(TokioRunner::new())
        };
        Ok(Session {
            opts,
            platform: Platform::new(grains, runner),
        })
    }

    /// Command lines recorded during a dry run (empty for live sessions).
    pub fn dry_run_commands(&self) -> Vec<String> {
        match self.platform.runner() {
            SessionRunner::DryRun(r) => r.calls().iter().map(|c| c.command_line()).collect(),
            SessionRunner::Live(_) => Vec::new(),
        }
    }
}

/* ---- Outcome rendering ---- */

/// Value produced by an operation, in a printable form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Flag(bool),
    Done,
    Code(i32),
    Text(String),
    Lines(Vec<String>),
}

/// JSON document printed on success.
pub fn success_json(op: Operation, outcome: &Outcome, dry_run: &[String]) -> serde_json::Value {
    let mut base = serde_json::json!({
        "status": "ok",
        "operation": op.name(),
        "command": op.command_token(),
        "result": outcome,
    });
    if !dry_run.is_empty()
        && let serde_json::Value::Object(ref mut map) = base
    {
        map.insert("dry_run".to_string(), serde_json::json!(dry_run));
    }
    base
}

/// Print the result of `op`; errors are rendered and then returned.
pub fn report(
    session: &Session,
    op: Operation,
    result: mattermost_admin::Result<Outcome>,
) -> Result<()> {
    let dry_run = session.dry_run_commands();
    let json = session.opts.json;
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            if !json {
                print_dry_run(&dry_run);
            }
            return output_error(json, op, &e.to_string());
        }
    };

    if json {
        let doc = success_json(op, &outcome, &dry_run);
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string())
        );
        return Ok(());
    }

    print_dry_run(&dry_run);
    let style = StyleOptions::detect();
    match outcome {
        Outcome::Text(text) => print!("{text}"),
        Outcome::Lines(lines) => {
            println!(
                "{}",
                box_header(
                    format!("{} {} ({})", emoji("list", &style), op, lines.len())
                        .trim_start(),
                    None::<&str>,
                    &style
                )
            );
            for line in lines {
                println!("{line}");
            }
        }
        Outcome::Code(code) => println!("{code}"),
        Outcome::Flag(_) | Outcome::Done => {
            println!(
                "{} {}",
                emoji("success", &style),
                color(Role::Success, format!("{op} succeeded"), &style)
            );
        }
    }
    Ok(())
}

fn print_dry_run(commands: &[String]) {
    if commands.is_empty() {
        return;
    }
    let style = StyleOptions::detect();
    for c in commands {
        eprintln!("{} {}", color(Role::Dim, "[dry-run]", &style), c);
    }
}

pub fn output_error(json: bool, op: Operation, msg: &str) -> Result<()> {
    if json {
        let err = serde_json::json!({"status":"error","operation":op.name(),"error":msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} {op} failed", emoji("error", &style));
        let subtitle = color(Role::Error, msg, &style);
        println!("{}", box_header(title.trim_start(), Some(subtitle), &style));
    }
    anyhow::bail!(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_path_flag_beats_env_and_file() {
        let path = std::env::temp_dir().join("mattermost_admin_shared_grains.json");
        std::fs::write(&path, r#"{"mattermost_path":"/from/file","os":"Debian"}"#).unwrap();
        let opts = GlobalOpts {
            install_path: Some("/from/flag".into()),
            ..Default::default()
        };
        let grains = opts
            .merge_grains(Some(&path), Some("/from/env".into()))
            .unwrap();
        assert_eq!(grains.get(INSTALL_PATH_GRAIN), Some("/from/flag"));
        assert_eq!(grains.get("os"), Some("Debian"));

        let no_flag = GlobalOpts::default();
        let grains = no_flag
            .merge_grains(Some(&path), Some("/from/env".into()))
            .unwrap();
        assert_eq!(grains.get(INSTALL_PATH_GRAIN), Some("/from/env"));

        let grains = no_flag.merge_grains(Some(&path), None).unwrap();
        assert_eq!(grains.get(INSTALL_PATH_GRAIN), Some("/from/file"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_grains_file_is_an_error() {
        let opts = GlobalOpts::default();
        let err = opts
            .merge_grains(Some(Path::new("/nonexistent/grains.yaml")), None)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load grains"));
    }

    #[test]
    fn success_json_shape() {
        let doc = success_json(
            Operation::PermanentDeleteTeam,
            &Outcome::Text("ok\n".into()),
            &[],
        );
        assert_eq!(doc["status"], "ok");
        assert_eq!(doc["operation"], "permanent_delete_team");
        assert_eq!(doc["command"], "-upload_license");
        assert_eq!(doc["result"], "ok\n");
        assert!(doc.get("dry_run").is_none());
    }

    #[test]
    fn success_json_for_noop_and_lines() {
        let doc = success_json(Operation::LeaveChannel, &Outcome::Code(0), &[]);
        assert_eq!(doc["command"], serde_json::Value::Null);
        assert_eq!(doc["result"], 0);

        let doc = success_json(
            Operation::ListChannels,
            &Outcome::Lines(vec!["town-square".into(), String::new()]),
            &["platform -list_channels".to_string()],
        );
        assert_eq!(doc["result"], serde_json::json!(["town-square", ""]));
        assert_eq!(doc["dry_run"], serde_json::json!(["platform -list_channels"]));
    }

    #[test]
    fn dry_run_session_records_without_spawning() {
        let session = Session::open(GlobalOpts {
            dry_run: true,
            install_path: Some("/opt/mattermost".into()),
            ..Default::default()
        })
        .unwrap();
        let out = session.platform.version().unwrap();
        assert_eq!(out, "");
        assert_eq!(
            session.dry_run_commands(),
            vec![
                "/opt/mattermost/bin/platform -version '-config=/opt/mattermost/config/config.json'"
            ]
        );
    }

    #[test]
    fn output_error_returns_err() {
        let err = output_error(true, Operation::CreateTeam, "Could not create team.").unwrap_err();
        assert_eq!(err.to_string(), "Could not create team.");
    }
}
