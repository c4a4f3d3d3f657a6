//! The repository side of gitbrute: everything it asks of `git`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git_hash::{HashAlgorithm, ObjectId};
use git_object::ObjectType;
use git_utils::subprocess::GitCommand;

/// A repository reached through the `git` executable.
pub struct Repo {
    dir: PathBuf,
}

impl Repo {
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn git(&self) -> GitCommand {
        GitCommand::git().working_dir(&self.dir)
    }

    /// The repository's object hash. Older gits that cannot report one only
    /// know SHA-1.
    pub fn object_format(&self) -> HashAlgorithm {
        match self
            .git()
            .args(["rev-parse", "--show-object-format"])
            .output_string()
        {
            Ok(name) => HashAlgorithm::from_name(&name).unwrap_or_else(|| {
                tracing::debug!(output = %name, "unrecognised object format, assuming sha1");
                HashAlgorithm::Sha1
            }),
            Err(e) => {
                tracing::debug!(error = %e, "cannot query object format, assuming sha1");
                HashAlgorithm::Sha1
            }
        }
    }

    pub fn rev_parse(&self, rev: &str) -> Result<ObjectId> {
        let hex = self
            .git()
            .args(["rev-parse", "--verify", rev])
            .output_string()?;
        ObjectId::from_hex(&hex).with_context(|| format!("rev-parse returned {hex:?}"))
    }

    /// Raw content of `rev`, which must be an object of type `ty`.
    pub fn cat_file(&self, ty: ObjectType, rev: &str) -> Result<Vec<u8>> {
        Ok(self.git().args(["cat-file", ty.as_str(), rev]).output()?)
    }

    /// Store `content` as a new object and return its id.
    pub fn write_object(&self, ty: ObjectType, content: &[u8]) -> Result<ObjectId> {
        let hex = self
            .git()
            .args(["hash-object", "-t", ty.as_str(), "-w", "--stdin"])
            .input(content)
            .output_string()?;
        ObjectId::from_hex(&hex).with_context(|| format!("hash-object returned {hex:?}"))
    }

    /// Point `name` at `oid`, recording `message` in its reflog.
    pub fn update_ref(&self, name: &str, oid: &ObjectId, message: &str) -> Result<()> {
        self.git()
            .args(["update-ref", "-m", message, "--create-reflog", name])
            .arg(oid.to_hex())
            .output()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git(dir: &Path, args: &[&str]) -> String {
        GitCommand::git()
            .args(args)
            .working_dir(dir)
            .env("GIT_AUTHOR_NAME", "Test Author")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_AUTHOR_DATE", "1234567890 +0000")
            .env("GIT_COMMITTER_NAME", "Test Committer")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_DATE", "1234567890 +0000")
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("HOME", dir)
            .output_string()
            .unwrap()
    }

    fn repo_with_commit() -> (tempfile::TempDir, Repo) {
        let dir = tempfile::tempdir().unwrap();
        git(dir.path(), &["init", "-q"]);
        git(dir.path(), &["commit", "-q", "--allow-empty", "-m", "initial"]);
        let repo = Repo::open(dir.path());
        (dir, repo)
    }

    #[test]
    fn reads_head_commit() {
        let (dir, repo) = repo_with_commit();
        let head = repo.rev_parse("HEAD").unwrap();
        assert_eq!(head.to_hex(), git(dir.path(), &["rev-parse", "HEAD"]));

        let content = repo.cat_file(ObjectType::Commit, "HEAD").unwrap();
        assert!(content.starts_with(b"tree "));
        assert_eq!(
            git_hash::hasher::Hasher::hash_object(head.algorithm(), "commit", &content),
            head
        );
    }

    #[test]
    fn object_format_defaults_to_sha1() {
        let (_dir, repo) = repo_with_commit();
        assert_eq!(repo.object_format(), HashAlgorithm::Sha1);
    }

    #[test]
    fn writes_object_and_moves_ref() {
        let (dir, repo) = repo_with_commit();
        let content = repo.cat_file(ObjectType::Commit, "HEAD").unwrap();
        let mut edited = content.clone();
        edited.extend_from_slice(b"edited\n");

        let oid = repo.write_object(ObjectType::Commit, &edited).unwrap();
        repo.update_ref("HEAD", &oid, "test: move HEAD").unwrap();

        assert_eq!(repo.rev_parse("HEAD").unwrap(), oid);
        let reflog = git(dir.path(), &["reflog", "-1", "--format=%gs"]);
        assert_eq!(reflog, "test: move HEAD");
    }

    #[test]
    fn missing_revision_is_an_error() {
        let (_dir, repo) = repo_with_commit();
        assert!(repo.rev_parse("no-such-branch").is_err());
    }
}
