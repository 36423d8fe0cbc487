//! Global `docker compose` options
//!
//! These options are rendered before the subcommand on every invocation. A
//! client holds one base set; each call may layer further sets on top of it.
//!
//! See <https://docs.docker.com/compose/reference/>.

use serde::{Deserialize, Serialize};

// ============================================================================
// Global Options
// ============================================================================

/// Options shared by every `docker compose` subcommand
///
/// Boolean fields are tri-state: `None` leaves the value to earlier layers,
/// `Some(false)` explicitly switches a flag off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalOptions {
    /// Compose configuration files (`--file`)
    pub files: Vec<String>,
    /// Profiles to enable (`--profile`)
    pub profiles: Vec<String>,
    /// Alternate project name (`--project-name`)
    pub project_name: Option<String>,
    /// Show more output (`--verbose`)
    pub verbose: Option<bool>,
    /// Do not print ANSI control characters (`--no-ansi`)
    pub no_ansi: Option<bool>,
    /// Daemon socket to connect to (`--host`)
    pub host: Option<String>,
    /// Use TLS; implied by `tls_verify` (`--tls`)
    pub tls: Option<bool>,
    /// Trust certs signed only by this CA (`--tlscacert`)
    pub tls_ca_cert: Option<String>,
    /// Path to TLS certificate file (`--tlscert`)
    pub tls_cert: Option<String>,
    /// Path to TLS key file (`--tlskey`)
    pub tls_key: Option<String>,
    /// Use TLS and verify the remote (`--tlsverify`)
    pub tls_verify: Option<bool>,
    /// Alternate working directory (`--project-directory`)
    pub project_directory: Option<String>,
    /// Convert deploy keys to their non-Swarm equivalent (`--compatibility`)
    pub compatibility: Option<bool>,
}

impl GlobalOptions {
    /// Create a new builder for `GlobalOptions`
    #[must_use]
    pub fn builder() -> GlobalOptionsBuilder {
        GlobalOptionsBuilder::default()
    }

    /// Layer `overrides` on top of `self`, left to right
    ///
    /// Files and profiles accumulate in call order. Scalar fields take the
    /// last value that is set; empty strings count as unset.
    #[must_use]
    pub fn merged<'a, I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = &'a GlobalOptions>,
    {
        let mut merged = self.clone();
        merged.project_name = non_empty(merged.project_name);
        merged.host = non_empty(merged.host);
        merged.tls_ca_cert = non_empty(merged.tls_ca_cert);
        merged.tls_cert = non_empty(merged.tls_cert);
        merged.tls_key = non_empty(merged.tls_key);
        merged.project_directory = non_empty(merged.project_directory);

        for layer in overrides {
            merged.files.extend(layer.files.iter().cloned());
            merged.profiles.extend(layer.profiles.iter().cloned());

            overlay_str(&mut merged.project_name, &layer.project_name);
            overlay(&mut merged.verbose, layer.verbose);
            overlay(&mut merged.no_ansi, layer.no_ansi);
            overlay_str(&mut merged.host, &layer.host);
            overlay(&mut merged.tls, layer.tls);
            overlay_str(&mut merged.tls_ca_cert, &layer.tls_ca_cert);
            overlay_str(&mut merged.tls_cert, &layer.tls_cert);
            overlay_str(&mut merged.tls_key, &layer.tls_key);
            overlay(&mut merged.tls_verify, layer.tls_verify);
            overlay_str(&mut merged.project_directory, &layer.project_directory);
            overlay(&mut merged.compatibility, layer.compatibility);
        }

        merged
    }

    /// Render these options as global flags in their fixed order
    ///
    /// Tokens are returned individually; values are not quoted.
    #[must_use]
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();

        for file in &self.files {
            flags.push("--file".to_string());
            flags.push(file.clone());
        }

        for profile in &self.profiles {
            flags.push("--profile".to_string());
            flags.push(profile.clone());
        }

        push_value(&mut flags, "--project-name", &self.project_name);
        push_switch(&mut flags, "--verbose", self.verbose);
        push_switch(&mut flags, "--no-ansi", self.no_ansi);
        push_value(&mut flags, "--host", &self.host);
        push_switch(&mut flags, "--tls", self.tls);
        push_value(&mut flags, "--tlscacert", &self.tls_ca_cert);
        push_value(&mut flags, "--tlscert", &self.tls_cert);
        push_value(&mut flags, "--tlskey", &self.tls_key);
        push_switch(&mut flags, "--tlsverify", self.tls_verify);
        push_value(&mut flags, "--project-directory", &self.project_directory);
        push_switch(&mut flags, "--compatibility", self.compatibility);

        flags
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn overlay(target: &mut Option<bool>, layer: Option<bool>) {
    if layer.is_some() {
        *target = layer;
    }
}

fn overlay_str(target: &mut Option<String>, layer: &Option<String>) {
    if let Some(value) = layer.as_deref().filter(|v| !v.is_empty()) {
        *target = Some(value.to_string());
    }
}

fn push_value(flags: &mut Vec<String>, name: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        flags.push(name.to_string());
        flags.push(value.to_string());
    }
}

fn push_switch(flags: &mut Vec<String>, name: &str, value: Option<bool>) {
    if value == Some(true) {
        flags.push(name.to_string());
    }
}

// ============================================================================
// Builder for GlobalOptions
// ============================================================================

/// Builder for `GlobalOptions`
#[derive(Debug, Default)]
pub struct GlobalOptionsBuilder {
    options: GlobalOptions,
}

impl GlobalOptionsBuilder {
    /// Set compose files, replacing any added so far
    #[must_use]
    pub fn files(mut self, files: Vec<impl Into<String>>) -> Self {
        self.options.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Add a compose file
    #[must_use]
    pub fn add_file(mut self, file: impl Into<String>) -> Self {
        self.options.files.push(file.into());
        self
    }

    /// Set profiles, replacing any added so far
    #[must_use]
    pub fn profiles(mut self, profiles: Vec<impl Into<String>>) -> Self {
        self.options.profiles = profiles.into_iter().map(Into::into).collect();
        self
    }

    /// Add a profile
    #[must_use]
    pub fn add_profile(mut self, profile: impl Into<String>) -> Self {
        self.options.profiles.push(profile.into());
        self
    }

    /// Set project name
    #[must_use]
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.options.project_name = Some(name.into());
        self
    }

    /// Set verbose output
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = Some(verbose);
        self
    }

    /// Set whether to suppress ANSI control characters
    #[must_use]
    pub const fn no_ansi(mut self, no_ansi: bool) -> Self {
        self.options.no_ansi = Some(no_ansi);
        self
    }

    /// Set daemon host
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.options.host = Some(host.into());
        self
    }

    /// Set TLS usage
    #[must_use]
    pub const fn tls(mut self, tls: bool) -> Self {
        self.options.tls = Some(tls);
        self
    }

    /// Set CA certificate path
    #[must_use]
    pub fn tls_ca_cert(mut self, path: impl Into<String>) -> Self {
        self.options.tls_ca_cert = Some(path.into());
        self
    }

    /// Set client certificate path
    #[must_use]
    pub fn tls_cert(mut self, path: impl Into<String>) -> Self {
        self.options.tls_cert = Some(path.into());
        self
    }

    /// Set client key path
    #[must_use]
    pub fn tls_key(mut self, path: impl Into<String>) -> Self {
        self.options.tls_key = Some(path.into());
        self
    }

    /// Set TLS verification
    #[must_use]
    pub const fn tls_verify(mut self, verify: bool) -> Self {
        self.options.tls_verify = Some(verify);
        self
    }

    /// Set project directory
    #[must_use]
    pub fn project_directory(mut self, dir: impl Into<String>) -> Self {
        self.options.project_directory = Some(dir.into());
        self
    }

    /// Set compatibility mode
    #[must_use]
    pub const fn compatibility(mut self, compatibility: bool) -> Self {
        self.options.compatibility = Some(compatibility);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> GlobalOptions {
        self.options
    }
}
