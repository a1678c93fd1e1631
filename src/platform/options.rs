//! Option vector construction for the platform binary.
//!
//! A command line is `[command, -config=..., -<name>=<value>...]`. Flags
//! follow [`Param::ALL`] order no matter how the parameters were supplied,
//! and only non-empty values are emitted, except `config`, which is always
//! present.

use std::collections::HashMap;
use std::fmt;

use crate::error::Result;

/// Parameter names the platform binary understands, in emission order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Param {
    Config,
    Username,
    Email,
    Password,
    TeamName,
    Role,
    SiteUrl,
    ChannelName,
    LicensePath,
}

impl Param {
    pub const ALL: [Param; 9] = [
        Param::Config,
        Param::Username,
        Param::Email,
        Param::Password,
        Param::TeamName,
        Param::Role,
        Param::SiteUrl,
        Param::ChannelName,
        Param::LicensePath,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Param::Config => "config",
            Param::Username => "username",
            Param::Email => "email",
            Param::Password => "password",
            Param::TeamName => "team_name",
            Param::Role => "role",
            Param::SiteUrl => "site_url",
            Param::ChannelName => "channel_name",
            Param::LicensePath => "license_path",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// `-<name>=<value>`; the value is not escaped.
    pub fn flag(&self, value: &str) -> String {
        format!("-{}={}", self.name(), value)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named parameter values for a single invocation.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<Param, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `(name, value)` pairs; unrecognized names are dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (k, v) in pairs {
            if let Some(p) = Param::from_name(k.as_ref()) {
                params.values.insert(p, v.into());
            }
        }
        params
    }

    pub fn with(mut self, param: Param, value: impl Into<String>) -> Self {
        self.values.insert(param, value.into());
        self
    }

    /// Like [`Params::with`], skipping `None`.
    pub fn with_opt(self, param: Param, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with(param, v),
            None => self,
        }
    }

    /// Value for `param` if it was supplied and is non-empty.
    pub fn get(&self, param: Param) -> Option<&str> {
        self.values
            .get(&param)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Build the argument vector for one platform invocation.
///
/// `default_config` is only evaluated when no `config` value was supplied.
pub fn build_options<F>(command: Option<&str>, params: &Params, default_config: F) -> Result<Vec<String>>
where
    F: FnOnce() -> Result<String>,
{
    let Some(command) = command else {
        return Ok(Vec::new());
    };

    let mut options = vec![command.to_string()];
    let config = match params.get(Param::Config) {
        Some(c) => c.to_string(),
        None => default_config()?,
    };
    options.push(Param::Config.flag(&config));

    for param in Param::ALL.into_iter().skip(1) {
        if let Some(value) = params.get(param) {
            options.push(param.flag(value));
        }
    }
    Ok(options)
}
