//! A [`VcsDriver`] implementation that shells out to the `git` binary.
//!
//! Every invocation is logged at `debug` level before it runs and after it
//! completes; this is the only place in the crate that logs (the engine
//! itself never does).

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use super::driver::VcsDriver;
use super::error::VcsError;
use super::types::{CherryPickOutcome, CommitId, CommitOptions, PushOptions, StageOptions, VcsConfig};

/// Drives a checkout on disk by shelling out to `git`.
pub struct GitCliDriver {
    repo_path: PathBuf,
    config: VcsConfig,
}

impl GitCliDriver {
    pub fn new(repo_path: impl Into<PathBuf>, config: VcsConfig) -> Self {
        Self {
            repo_path: repo_path.into(),
            config,
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    pub fn config(&self) -> &VcsConfig {
        &self.config
    }

    /// Run `git <args>` in the repository directory, returning stdout as a
    /// lossy UTF-8 string on success.
    fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        let cmd_str = format!("git {}", args.join(" "));
        log::debug!("$ {cmd_str}");
        let start = Instant::now();

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| VcsError::CommandFailed {
                command: cmd_str.clone(),
                stderr: e.to_string(),
            })?;

        let ok = output.status.success();
        log::debug!(
            "{cmd_str} dur_us={} ok={ok}",
            start.elapsed().as_micros()
        );

        if !ok {
            return Err(VcsError::CommandFailed {
                command: cmd_str,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Like [`Self::run`], but with extra environment variables set on the
    /// child process. Used by `commit` to apply the driver's configured
    /// identity without relying on ambient `user.name`/`user.email`.
    fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Result<String, VcsError> {
        let cmd_str = format!("git {}", args.join(" "));
        log::debug!("$ {cmd_str}");
        let start = Instant::now();

        let mut command = Command::new("git");
        command.args(args).current_dir(&self.repo_path);
        for (key, value) in envs {
            command.env(key, value);
        }

        let output = command.output().map_err(|e| VcsError::CommandFailed {
            command: cmd_str.clone(),
            stderr: e.to_string(),
        })?;

        let ok = output.status.success();
        log::debug!(
            "{cmd_str} dur_us={} ok={ok}",
            start.elapsed().as_micros()
        );

        if !ok {
            return Err(VcsError::CommandFailed {
                command: cmd_str,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run `git <args>`, reporting success purely through the exit code
    /// (used for boolean checks like `merge-base --is-ancestor`).
    fn run_check(&self, args: &[&str]) -> Result<bool, VcsError> {
        let cmd_str = format!("git {}", args.join(" "));
        log::debug!("$ {cmd_str}");
        let start = Instant::now();

        let status = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .status()
            .map_err(|e| VcsError::CommandFailed {
                command: cmd_str.clone(),
                stderr: e.to_string(),
            })?;

        log::debug!(
            "{cmd_str} dur_us={} ok={}",
            start.elapsed().as_micros(),
            status.success()
        );

        Ok(status.success())
    }
}

impl VcsDriver for GitCliDriver {
    fn fetch(&self, refspec: &str) -> Result<(), VcsError> {
        self.run(&["fetch", &self.config.remote_name, refspec])?;
        Ok(())
    }

    fn checkout(&self, name: &str, start_point: Option<&str>) -> Result<(), VcsError> {
        match start_point {
            Some(start) if !self.branch_exists(name)? => {
                self.run(&["checkout", "-B", name, start])?;
            }
            _ => {
                self.run(&["checkout", name])?;
            }
        }
        Ok(())
    }

    fn branch_reset(&self, name: &str, start_point: &str) -> Result<(), VcsError> {
        self.run(&["branch", "-f", name, start_point])?;
        Ok(())
    }

    fn reset_soft(&self, to: &str) -> Result<(), VcsError> {
        self.run(&["reset", "--soft", to])?;
        Ok(())
    }

    fn symbolic_ref_head(&self) -> Result<Option<String>, VcsError> {
        match self.run(&["symbolic-ref", "--short", "-q", "HEAD"]) {
            Ok(name) => {
                let name = name.trim();
                if name.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(name.to_string()))
                }
            }
            Err(_) => Ok(None),
        }
    }

    fn rev_parse(&self, rev: &str) -> Result<CommitId, VcsError> {
        let out = self.run(&["rev-parse", rev])?;
        let sha = out.trim();
        if sha.is_empty() {
            return Err(VcsError::ParseError(format!("empty rev-parse for {rev}")));
        }
        Ok(CommitId::new(sha))
    }

    fn remote_ref(&self, branch: &str) -> String {
        format!("{}/{branch}", self.config.remote_name)
    }

    fn is_dirty(&self, include_untracked: bool) -> Result<bool, VcsError> {
        let mut args = vec!["status", "--porcelain"];
        if !include_untracked {
            args.push("--untracked-files=no");
        }
        let out = self.run(&args)?;
        Ok(!out.trim().is_empty())
    }

    fn add(&self, opts: &StageOptions) -> Result<(), VcsError> {
        if opts.all {
            self.run(&["add", "-A"])?;
        } else {
            self.run(&["add", "-u"])?;
        }
        Ok(())
    }

    fn commit(&self, opts: &CommitOptions) -> Result<CommitId, VcsError> {
        let mut args = vec!["commit", "-m", opts.message.as_str()];
        if opts.allow_empty {
            args.push("--allow-empty");
        }
        if opts.signoff {
            args.push("--signoff");
        }
        if opts.no_verify {
            args.push("--no-verify");
        }

        // The driver's configured identity is applied through the
        // environment rather than left to ambient `user.name`/`user.email`,
        // per the engine's "never reach for process-wide config" contract.
        // A per-call `CommitOptions::author` overrides the author only; the
        // committer identity always comes from `VcsConfig`.
        let (author_name, author_email) = match &opts.author {
            Some(author) => (author.name.as_str(), author.email.as_str()),
            None => (
                self.config.author_name.as_str(),
                self.config.author_email.as_str(),
            ),
        };
        let envs = [
            ("GIT_AUTHOR_NAME", author_name),
            ("GIT_AUTHOR_EMAIL", author_email),
            ("GIT_COMMITTER_NAME", self.config.committer_name.as_str()),
            ("GIT_COMMITTER_EMAIL", self.config.committer_email.as_str()),
        ];

        self.run_with_env(&args, &envs)?;
        self.rev_parse("HEAD")
    }

    fn cherry_pick(&self, id: &CommitId, allow_empty: bool) -> Result<CherryPickOutcome, VcsError> {
        let mut args = vec!["cherry-pick"];
        if allow_empty {
            args.push("--allow-empty");
            args.push("--keep-redundant-commits");
        }
        let sha = id.as_str();
        args.push(sha);

        // The committer of a cherry-picked commit is whoever applies it,
        // not the original author; apply the driver's configured identity
        // rather than leaving it to ambient `user.name`/`user.email`.
        let envs = [
            ("GIT_COMMITTER_NAME", self.config.committer_name.as_str()),
            ("GIT_COMMITTER_EMAIL", self.config.committer_email.as_str()),
        ];

        match self.run_with_env(&args, &envs) {
            Ok(_) => {
                let applied = self.rev_parse("HEAD")?;
                Ok(CherryPickOutcome::Applied(applied))
            }
            Err(e) => {
                // An empty cherry-pick without --allow-empty exits non-zero
                // and mentions "nothing to commit" on stderr; treat that as
                // Empty rather than a fatal command failure.
                if let VcsError::CommandFailed { stderr, .. } = &e {
                    if stderr.contains("nothing to commit") || stderr.contains("previous cherry-pick is now empty") {
                        self.run(&["cherry-pick", "--skip"]).ok();
                        return Ok(CherryPickOutcome::Empty);
                    }
                }
                Err(e)
            }
        }
    }

    fn branch_delete(&self, name: &str, force: bool) -> Result<(), VcsError> {
        let flag = if force { "-D" } else { "-d" };
        self.run(&["branch", flag, name])?;
        Ok(())
    }

    fn branch_exists(&self, name: &str) -> Result<bool, VcsError> {
        self.run_check(&[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/heads/{name}"),
        ])
    }

    fn diff_name_only(&self, a: &str, b: &str) -> Result<Vec<String>, VcsError> {
        let range = format!("{a}..{b}");
        let out = self.run(&["diff", "--name-only", &range])?;
        Ok(out.lines().map(str::to_string).filter(|l| !l.is_empty()).collect())
    }

    fn trees_match(&self, a: &str, b: &str) -> Result<bool, VcsError> {
        let spec_a = format!("{a}^{{tree}}");
        let spec_b = format!("{b}^{{tree}}");
        let out = self.run(&["rev-parse", &spec_a, &spec_b])?;
        let mut lines = out.lines();
        let tree_a = lines.next().unwrap_or_default().trim();
        let tree_b = lines.next().unwrap_or_default().trim();
        Ok(!tree_a.is_empty() && tree_a == tree_b)
    }

    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<CommitId>, VcsError> {
        let range = format!("{base}..{head}");
        let out = self.run(&["rev-list", "--reverse", &range])?;
        Ok(out
            .lines()
            .filter(|l| !l.is_empty())
            .map(CommitId::new)
            .collect())
    }

    fn push(&self, refspec: &str, opts: &PushOptions) -> Result<(), VcsError> {
        let mut args = vec!["push"];
        if opts.force {
            args.push("--force");
        }
        if opts.set_upstream {
            args.push("--set-upstream");
        }
        args.push(&self.config.remote_name);
        args.push(refspec);
        self.run(&args)?;
        Ok(())
    }

    fn stash_save(&self, message: &str, include_untracked: bool) -> Result<(), VcsError> {
        let mut args = vec!["stash", "push", "-m", message];
        if include_untracked {
            args.push("-u");
        }
        self.run(&args)?;
        Ok(())
    }

    fn stash_pop(&self) -> Result<(), VcsError> {
        self.run(&["stash", "pop"])?;
        Ok(())
    }

    fn identity_configured(&self) -> bool {
        !self.config.author_name.is_empty()
            && !self.config.author_email.is_empty()
            && !self.config.committer_name.is_empty()
            && !self.config.committer_email.is_empty()
    }
}
