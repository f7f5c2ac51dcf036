use std::path::{Path, PathBuf};
use std::process::Command;

use branch_reconciler::{GitCliDriver, VcsConfig};
use tempfile::TempDir;

/// A disposable, deterministic git repository used to drive end-to-end
/// reconcile scenarios.
pub struct TestRepo {
    _temp_dir: TempDir,
    root: PathBuf,
}

/// Environment applied to every git invocation in these tests, so commit
/// hashes and timestamps are reproducible across runs and hosts.
pub fn configure_git_cmd(cmd: &mut Command) {
    cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
    cmd.env("GIT_CONFIG_SYSTEM", "/dev/null");
    cmd.env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z");
    cmd.env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z");
    cmd.env("LC_ALL", "C");
    cmd.env("LANG", "C");
    cmd.env("SOURCE_DATE_EPOCH", "1704067200");
}

impl TestRepo {
    /// Create a repository with a base branch `tests/master` containing a
    /// single file `tracked-file.txt` with content `INIT`.
    pub fn new() -> Self {
        // Lets `RUST_LOG=debug` surface the GitCliDriver's command-level
        // logging when a scenario fails; a second call across test
        // binaries/threads is harmless.
        let _ = env_logger::try_init();

        let temp_dir = TempDir::new().expect("create tempdir");
        let root = temp_dir.path().join("repo");
        std::fs::create_dir(&root).expect("create repo dir");

        let repo = Self {
            _temp_dir: temp_dir,
            root,
        };

        repo.git(&["init", "-b", "tests/master"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);

        repo.write_file("tracked-file.txt", "INIT");
        repo.git(&["add", "-A"]);
        repo.git(&["commit", "-m", "INIT_COMMIT"]);

        // Simulate the remote with a second bare-ish local path the driver
        // fetches from via `origin`.
        let remote_path = repo.root.parent().unwrap().join("remote.git");
        repo.run_in(&remote_path.parent().unwrap().to_path_buf(), &[
            "init",
            "--bare",
            remote_path.to_str().unwrap(),
        ]);
        repo.git(&["remote", "add", "origin", remote_path.to_str().unwrap()]);
        repo.git(&["push", "origin", "tests/master"]);

        repo
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    pub fn driver(&self) -> GitCliDriver {
        GitCliDriver::new(
            self.root.clone(),
            VcsConfig::new("Test User", "test@example.com"),
        )
    }

    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.root.join(name), content).expect("write file");
    }

    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.root.join(name)).expect("read file")
    }

    pub fn git(&self, args: &[&str]) -> String {
        self.run_in(&self.root, args)
    }

    fn run_in(&self, dir: &PathBuf, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(dir);
        configure_git_cmd(&mut cmd);
        let output = cmd.output().expect("run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Push the current local `branch` to `origin`, simulating the caller's
    /// post-reconcile push step.
    pub fn push_branch(&self, branch: &str) {
        self.git(&["push", "origin", &format!("{branch}:{branch}")]);
    }

    /// Commit log (subjects, newest first) on `rev`.
    pub fn log_subjects(&self, rev: &str) -> Vec<String> {
        self.git(&["log", "--format=%s", rev])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn current_branch(&self) -> String {
        self.git(&["branch", "--show-current"])
    }

    pub fn local_branch_exists(&self, name: &str) -> bool {
        Command::new("git")
            .args(["show-ref", "--verify", "--quiet", &format!("refs/heads/{name}")])
            .current_dir(&self.root)
            .status()
            .expect("run git")
            .success()
    }

    /// The content of `path` as recorded on `rev`, without checking it out.
    pub fn show_file(&self, rev: &str, path: &str) -> String {
        self.git(&["show", &format!("{rev}:{path}")])
    }

    /// Whether the working tree (including untracked files) has any
    /// uncommitted change.
    pub fn is_dirty(&self) -> bool {
        !self.git(&["status", "--porcelain"]).is_empty()
    }

    /// Path to the bare repository standing in for the remote, for tests
    /// that need to simulate another collaborator advancing a branch
    /// without going through this checkout.
    pub fn remote_path(&self) -> PathBuf {
        self.root.parent().unwrap().join("remote.git")
    }
}
