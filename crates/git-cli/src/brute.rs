use std::ffi::OsString;
use std::path::Path;

use anyhow::{bail, Context, Result};
use git_brute::{Search, SearchConfig};
use git_object::{ObjectBuffer, ObjectType};

use crate::repo::Repo;
use crate::Cli;

/// Rewrite HEAD so its id matches `cli.pattern`.
///
/// Nothing is written unless a winner is found, and HEAD only moves once the
/// object database has stored exactly the winning object.
pub fn run(cli: &Cli) -> Result<i32> {
    let repo = Repo::open(cli.change_dir.as_deref().unwrap_or(Path::new(".")));
    let reflog_msg = reflog_message(std::env::args_os());

    let defaults = SearchConfig::default();
    let search = Search::new(SearchConfig {
        pattern: cli.pattern.clone(),
        parallelism: cli.cpus.unwrap_or(defaults.parallelism),
        field_name: cli.nonce_name.clone(),
        alphabet: cli.nonce_chars.clone(),
        algorithm: repo.object_format(),
        ..defaults
    })?;

    let head = repo.rev_parse("HEAD").context("cannot resolve HEAD")?;
    if !cli.force && search.pattern().matches(&head) {
        println!("gitbrute: {head} (already matches)");
        return Ok(0);
    }

    let content = repo
        .cat_file(ObjectType::Commit, "HEAD")
        .context("cannot read the HEAD commit")?;
    let template = ObjectBuffer::new(ObjectType::Commit, &content);

    let winner = search
        .run(&template)
        .context("search for a matching commit failed")?;
    let expected = winner.oid;

    let written = repo
        .write_object(ObjectType::Commit, &winner.into_content())
        .context("hash-object")?;
    if written != expected {
        bail!("hash-object stored {written}, but the search found {expected}");
    }

    repo.update_ref("HEAD", &written, &reflog_msg)
        .context("update-ref")?;

    println!("gitbrute: {written}");
    Ok(0)
}

/// The command line as recorded in the reflog. Arguments that are not
/// valid Unicode are converted lossily.
fn reflog_message(args: impl IntoIterator<Item = OsString>) -> String {
    args.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
