//! Pruning of out-of-date deployment archives.
//!
//! Keeps the N most recent archives (N = 0 means 1) in the local versions
//! directory and in the release directory of each configured host. Remote
//! work goes through an [`Executor`], which runs an opaque shell command on
//! a host.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::CleanConfig;
use crate::error::CleanError;

/// Runs a shell command on a remote host and returns its stdout.
pub trait Executor {
    fn run(&mut self, host: &str, command: &str) -> io::Result<String>;
}

/// Executes remote commands through the system `ssh` client.
#[derive(Debug, Default)]
pub struct SshExecutor;

impl Executor for SshExecutor {
    fn run(&mut self, host: &str, command: &str) -> io::Result<String> {
        debug!(host, command, "ssh");
        let output = Command::new("ssh").arg(host).arg(command).output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "`{command}` exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Outcome of a clean run.
#[derive(Debug, Default)]
pub struct CleanReport {
    pub keep: usize,
    pub local_removed: Vec<PathBuf>,
    /// Per-host list of removed release names, or the failure for that host.
    pub remote: Vec<(String, Result<Vec<String>, CleanError>)>,
}

/// Number of archives to keep for a requested retention count.
pub fn retention(number: u32) -> usize {
    if number == 0 {
        1
    } else {
        number as usize
    }
}

/// Delete all but the `keep` newest archives everywhere.
///
/// A local failure aborts the run; a remote failure is recorded for its host
/// and the remaining hosts are still processed.
pub fn do_clean<E: Executor>(
    config: &CleanConfig,
    number: u32,
    executor: &mut E,
) -> Result<CleanReport, CleanError> {
    let keep = retention(number);
    let local_removed = prune_local(&config.versions_dir, keep)?;

    let remote = config
        .hosts
        .iter()
        .map(|host| {
            let result = prune_remote(
                executor,
                host,
                &config.releases_dir,
                &config.archive_marker,
                keep,
            );
            if let Err(err) = &result {
                warn!(host = %host, error = %err, "remote prune failed");
            }
            (host.clone(), result)
        })
        .collect();

    Ok(CleanReport {
        keep,
        local_removed,
        remote,
    })
}

/// Remove all but the `keep` newest files in `dir`, newest by file name.
pub fn prune_local(dir: &Path, keep: usize) -> Result<Vec<PathBuf>, CleanError> {
    let local = |source| CleanError::Local {
        path: dir.to_path_buf(),
        source,
    };

    let mut archives = Vec::new();
    for entry in fs::read_dir(dir).map_err(local)? {
        let entry = entry.map_err(local)?;
        if entry.file_type().map_err(local)?.is_file() {
            archives.push(entry.path());
        }
    }
    archives.sort();

    let stale_count = archives.len().saturating_sub(keep);
    let stale: Vec<PathBuf> = archives.into_iter().take(stale_count).collect();
    for path in &stale {
        fs::remove_file(path).map_err(|source| CleanError::Local {
            path: path.clone(),
            source,
        })?;
        info!(archive = %path.display(), "removed local archive");
    }
    Ok(stale)
}

/// Names from an oldest-first listing that fall outside the newest `keep`.
pub fn select_stale<'a>(listing: &'a str, marker: &str, keep: usize) -> Vec<&'a str> {
    let archives: Vec<&str> = listing
        .split_whitespace()
        .filter(|name| name.contains(marker))
        .collect();
    let stale_count = archives.len().saturating_sub(keep);
    archives.into_iter().take(stale_count).collect()
}

/// Remove all but the `keep` newest releases on `host`.
pub fn prune_remote<E: Executor>(
    executor: &mut E,
    host: &str,
    releases_dir: &str,
    marker: &str,
    keep: usize,
) -> Result<Vec<String>, CleanError> {
    let remote = |source| CleanError::Remote {
        host: host.to_string(),
        source,
    };
    let dir = shell_quote(releases_dir);

    let listing = executor
        .run(host, &format!("cd {dir} && ls -tr"))
        .map_err(remote)?;

    let mut removed = Vec::new();
    for name in select_stale(&listing, marker, keep) {
        if !is_plain_name(name) {
            warn!(host, name, "skipping release with unexpected name");
            continue;
        }
        executor
            .run(host, &format!("cd {dir} && rm -rf ./{name}"))
            .map_err(remote)?;
        info!(host, release = name, "removed remote release");
        removed.push(name.to_string());
    }
    Ok(removed)
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records commands and answers `ls` with a canned listing.
    #[derive(Default)]
    struct FakeExecutor {
        listing: String,
        fail_hosts: Vec<String>,
        commands: Vec<(String, String)>,
    }

    impl Executor for FakeExecutor {
        fn run(&mut self, host: &str, command: &str) -> io::Result<String> {
            self.commands.push((host.to_string(), command.to_string()));
            if self.fail_hosts.iter().any(|h| h == host) {
                return Err(io::Error::other("connection refused"));
            }
            if command.ends_with("ls -tr") {
                Ok(self.listing.clone())
            } else {
                Ok(String::new())
            }
        }
    }

    fn versions_dir(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"tgz").unwrap();
        }
        dir
    }

    fn remaining(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    const ARCHIVES: [&str; 4] = [
        "web_static_20240101000000.tgz",
        "web_static_20240102000000.tgz",
        "web_static_20240103000000.tgz",
        "web_static_20240104000000.tgz",
    ];

    #[test]
    fn retention_zero_means_one() {
        assert_eq!(retention(0), 1);
        assert_eq!(retention(1), 1);
        assert_eq!(retention(3), 3);
    }

    #[test]
    fn prune_local_keeps_newest() {
        let dir = versions_dir(&ARCHIVES);
        let removed = prune_local(dir.path(), 2).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(remaining(dir.path()), vec![ARCHIVES[2], ARCHIVES[3]]);
    }

    #[test]
    fn prune_local_with_fewer_archives_than_keep() {
        let dir = versions_dir(&ARCHIVES[..1]);
        assert!(prune_local(dir.path(), 3).unwrap().is_empty());
        assert_eq!(remaining(dir.path()), vec![ARCHIVES[0]]);
    }

    #[test]
    fn prune_local_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = prune_local(&dir.path().join("versions"), 1).unwrap_err();
        assert!(matches!(err, CleanError::Local { .. }));
    }

    #[test]
    fn select_stale_filters_marker() {
        let listing = "other web_static_a web_static_b\nweb_static_c\n";
        assert_eq!(select_stale(listing, "web_static_", 1), vec!["web_static_a", "web_static_b"]);
        assert!(select_stale(listing, "web_static_", 5).is_empty());
    }

    #[test]
    fn prune_remote_issues_expected_commands() {
        let mut exec = FakeExecutor {
            listing: "test web_static_1 web_static_2 web_static_3".into(),
            ..Default::default()
        };
        let removed = prune_remote(&mut exec, "web-01", "/data/web_static/releases", "web_static_", 1)
            .unwrap();
        assert_eq!(removed, vec!["web_static_1", "web_static_2"]);
        let commands: Vec<&str> = exec.commands.iter().map(|(_, c)| c.as_str()).collect();
        assert_eq!(
            commands,
            vec![
                "cd '/data/web_static/releases' && ls -tr",
                "cd '/data/web_static/releases' && rm -rf ./web_static_1",
                "cd '/data/web_static/releases' && rm -rf ./web_static_2",
            ]
        );
    }

    #[test]
    fn prune_remote_skips_suspicious_names() {
        let mut exec = FakeExecutor {
            listing: "web_static_$(reboot) web_static_ok web_static_new".into(),
            ..Default::default()
        };
        let removed = prune_remote(&mut exec, "h", "/r", "web_static_", 1).unwrap();
        assert_eq!(removed, vec!["web_static_ok"]);
    }

    #[test]
    fn do_clean_continues_after_host_failure() {
        let dir = versions_dir(&ARCHIVES);
        let config = CleanConfig {
            versions_dir: dir.path().to_path_buf(),
            hosts: vec!["down".into(), "up".into()],
            ..Default::default()
        };
        let mut exec = FakeExecutor {
            listing: "web_static_1 web_static_2".into(),
            fail_hosts: vec!["down".into()],
            ..Default::default()
        };

        let report = do_clean(&config, 0, &mut exec).unwrap();
        assert_eq!(report.keep, 1);
        assert_eq!(report.local_removed.len(), 3);
        assert_eq!(remaining(dir.path()), vec![ARCHIVES[3]]);

        assert_eq!(report.remote.len(), 2);
        assert!(matches!(report.remote[0], (ref h, Err(CleanError::Remote { .. })) if h == "down"));
        assert_eq!(report.remote[1].0, "up");
        assert_eq!(report.remote[1].1.as_ref().unwrap(), &vec!["web_static_1".to_string()]);
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("/a b"), "'/a b'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
