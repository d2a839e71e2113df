//! In-memory filesystem implementation
//!
//! A single ordered map keyed by absolute path simulates the hierarchy.
//! There are no parent/child links: a directory's members are whatever keys
//! sit below it. Consequences worth knowing before changing anything here:
//!
//! - `rm` and `mv` touch exactly one key; descendants stay behind, orphaned.
//! - `cp` of a directory copies the directory entry only.
//! - Parents are never required to exist.
//! - `mv`/`cp` overwrite whatever already sits at the destination key.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use super::node::Node;
use crate::error::{Error, Result, Target};
use crate::logging::LogConfig;
use crate::path::{self, ROOT, resolve_path};

/// Path-keyed table plus the current-directory cursor.
///
/// Every method is all-or-nothing: on error neither the table nor the
/// cursor has changed. The cursor always names an existing directory.
#[derive(Debug, Clone)]
pub struct VirtualFs {
    entries: BTreeMap<String, Node>,
    cwd: String,
    log: LogConfig,
}

/// Result of `ls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Resolved directory that was listed.
    pub target: String,
    /// Keys below the target, relative to the cursor, in table order.
    pub entries: Vec<String>,
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFs {
    /// Create a filesystem holding only the root directory.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(ROOT.to_string(), Node::Directory);

        Self {
            entries,
            cwd: ROOT.to_string(),
            log: LogConfig::default(),
        }
    }

    /// Replace the logging configuration.
    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log
    }

    /// Current directory.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Look up an entry by exact key.
    pub fn get(&self, path: &str) -> Option<&Node> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of entries, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: root is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys in table order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Resolve a token against the cursor.
    pub fn resolve(&self, token: &str) -> String {
        resolve_path(&self.cwd, token)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.entries.get(path).is_some_and(Node::is_dir)
    }

    /// Create an empty directory.
    pub fn mkdir(&mut self, name: &str) -> Result<()> {
        let path = self.resolve(name);
        self.create(path, Node::Directory)
    }

    /// Create an empty file.
    pub fn touch(&mut self, name: &str) -> Result<()> {
        let path = self.resolve(name);
        self.create(path, Node::empty_file())
    }

    fn create(&mut self, path: String, node: Node) -> Result<()> {
        if self.entries.contains_key(&path) {
            return Err(Error::AlreadyExists {
                kind: node.kind(),
                path,
            });
        }
        tracing::debug!(path = %path, kind = %node.kind(), "created entry");
        self.entries.insert(path, node);
        Ok(())
    }

    /// Change the current directory.
    ///
    /// `..` is lexical: it never fails, and climbs past ancestors that were
    /// never created.
    pub fn cd(&mut self, path: &str) -> Result<()> {
        let target = match path {
            ROOT => ROOT.to_string(),
            ".." => self.nearest_directory(path::parent(&self.cwd)),
            _ => {
                let resolved = self.resolve(path);
                if !self.is_dir(&resolved) {
                    return Err(Error::not_found(Target::Directory, resolved));
                }
                resolved
            }
        };
        tracing::debug!(from = %self.cwd, to = %target, "changed directory");
        self.cwd = target;
        Ok(())
    }

    /// List every key below a directory, relative to the cursor.
    ///
    /// Descendants at any depth are listed, not just direct children.
    pub fn ls(&self, path: Option<&str>) -> Result<Listing> {
        let target = match path {
            Some(token) => self.resolve(token),
            None => self.cwd.clone(),
        };
        if !self.is_dir(&target) {
            return Err(Error::not_found(Target::Directory, target));
        }

        let entries = self
            .entries
            .keys()
            .filter(|key| path::is_descendant(key, &target))
            .map(|key| path::relative_to(key, &self.cwd))
            .collect();

        Ok(Listing { target, entries })
    }

    /// Read a file's content.
    pub fn cat(&self, path: &str) -> Result<String> {
        let resolved = self.resolve(path);
        self.file_content(&resolved).map(str::to_string)
    }

    /// All non-overlapping matches of `pattern` in a file, left to right.
    pub fn grep(&self, pattern: &str, path: &str) -> Result<Vec<String>> {
        let resolved = self.resolve(path);
        let content = self.file_content(&resolved)?;
        let regex = Regex::new(pattern)?;

        Ok(regex
            .find_iter(content)
            .map(|m| m.as_str().to_string())
            .collect())
    }

    fn file_content(&self, path: &str) -> Result<&str> {
        match self.entries.get(path) {
            Some(Node::File { content }) => Ok(content.as_str()),
            _ => Err(Error::not_found(Target::File, path)),
        }
    }

    /// Replace a file's content.
    pub fn echo(&mut self, path: &str, text: &str) -> Result<()> {
        let resolved = self.resolve(path);
        match self.entries.get_mut(&resolved) {
            Some(Node::File { content }) => {
                tracing::debug!(
                    path = %resolved,
                    content = %self.log.format_content(text),
                    "wrote file"
                );
                *content = text.to_string();
                Ok(())
            }
            _ => Err(Error::not_found(Target::File, resolved)),
        }
    }

    /// Move an entry into `destination`, keeping its name.
    ///
    /// Returns the new key. An existing entry at that key is replaced.
    pub fn mv(&mut self, source: &str, destination: &str) -> Result<String> {
        let (from, to) = self.relocation("mv", source, destination)?;
        let Some(node) = self.entries.remove(&from) else {
            return Err(Error::not_found(Target::Source, from));
        };

        tracing::debug!(from = %from, to = %to, "moved entry");
        self.entries.insert(to.clone(), node);
        if self.cwd == from {
            self.cwd = to.clone();
        }
        self.repair_cursor();
        Ok(to)
    }

    /// Copy an entry into `destination`, keeping its name.
    ///
    /// Returns the new key. Directory copies do not bring descendants.
    pub fn cp(&mut self, source: &str, destination: &str) -> Result<String> {
        let (from, to) = self.relocation("cp", source, destination)?;
        let Some(node) = self.entries.get(&from).cloned() else {
            return Err(Error::not_found(Target::Source, from));
        };

        tracing::debug!(from = %from, to = %to, "copied entry");
        self.entries.insert(to.clone(), node);
        self.repair_cursor();
        Ok(to)
    }

    fn relocation(
        &self,
        command: &'static str,
        source: &str,
        destination: &str,
    ) -> Result<(String, String)> {
        let from = self.resolve(source);
        if from == ROOT {
            return Err(Error::RootProtected { command });
        }
        let to = path::join(&self.resolve(destination), path::basename(&from));
        Ok((from, to))
    }

    /// Remove exactly one entry.
    pub fn rm(&mut self, path: &str) -> Result<()> {
        let resolved = self.resolve(path);
        if resolved == ROOT {
            return Err(Error::RootProtected { command: "rm" });
        }
        if self.entries.remove(&resolved).is_none() {
            return Err(Error::not_found(Target::Path, resolved));
        }

        tracing::debug!(path = %resolved, "removed entry");
        self.repair_cursor();
        Ok(())
    }

    /// Insert an entry without the already-exists check.
    ///
    /// Used for seeding; the root entry is left alone.
    pub(crate) fn seed(&mut self, path: &str, node: Node) {
        let resolved = resolve_path(ROOT, path);
        if resolved != ROOT {
            self.entries.insert(resolved, node);
        }
    }

    /// Point the cursor at `path`, creating it as a directory if needed.
    pub(crate) fn seed_cwd(&mut self, path: &str) {
        let resolved = resolve_path(ROOT, path);
        if !self.is_dir(&resolved) {
            self.seed(&resolved, Node::Directory);
        }
        self.cwd = resolved;
    }

    /// Walk lexically upward from `start` to the first existing directory.
    fn nearest_directory(&self, start: &str) -> String {
        let mut current = start;
        while current != ROOT && !self.is_dir(current) {
            current = path::parent(current);
        }
        current.to_string()
    }

    fn repair_cursor(&mut self) {
        if !self.is_dir(&self.cwd) {
            let fallback = self.nearest_directory(&self.cwd);
            tracing::debug!(from = %self.cwd, to = %fallback, "cursor entry vanished");
            self.cwd = fallback;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::NodeKind;
    use pretty_assertions::assert_eq;

    fn fs_with(dirs: &[&str], files: &[&str]) -> VirtualFs {
        let mut fs = VirtualFs::new();
        for dir in dirs {
            fs.mkdir(dir).unwrap();
        }
        for file in files {
            fs.touch(file).unwrap();
        }
        fs
    }

    #[test]
    fn test_new_has_root() {
        let fs = VirtualFs::new();
        assert_eq!(fs.cwd(), "/");
        assert_eq!(fs.len(), 1);
        assert_eq!(fs.get("/"), Some(&Node::Directory));
    }

    #[test]
    fn test_mkdir_and_cd() {
        let mut fs = VirtualFs::new();
        fs.mkdir("docs").unwrap();
        fs.cd("docs").unwrap();
        assert_eq!(fs.cwd(), "/docs");

        fs.mkdir("drafts").unwrap();
        assert!(fs.contains("/docs/drafts"));
    }

    #[test]
    fn test_mkdir_twice() {
        let mut fs = VirtualFs::new();
        fs.mkdir("d").unwrap();
        let err = fs.mkdir("d").unwrap_err();
        assert!(matches!(
            err,
            Error::AlreadyExists {
                kind: NodeKind::Directory,
                ..
            }
        ));
        assert_eq!(fs.paths().filter(|p| *p == "/d").count(), 1);
    }

    #[test]
    fn test_mkdir_root_exists() {
        let mut fs = VirtualFs::new();
        assert!(fs.mkdir("/").is_err());
        assert!(fs.mkdir(".").is_err());
    }

    #[test]
    fn test_mkdir_without_parent() {
        let mut fs = VirtualFs::new();
        fs.mkdir("/a/b").unwrap();
        assert!(fs.contains("/a/b"));
        assert!(!fs.contains("/a"));
    }

    #[test]
    fn test_touch_over_directory() {
        let mut fs = fs_with(&["d"], &[]);
        let err = fs.touch("d").unwrap_err();
        assert_eq!(err.to_string(), "File already exists: /d");
        assert_eq!(fs.get("/d"), Some(&Node::Directory));
    }

    #[test]
    fn test_cd_root_and_parent() {
        let mut fs = fs_with(&["a", "a/b"], &[]);
        fs.cd("/a/b").unwrap();
        fs.cd("..").unwrap();
        assert_eq!(fs.cwd(), "/a");
        fs.cd("/").unwrap();
        fs.cd("..").unwrap();
        assert_eq!(fs.cwd(), "/");
    }

    #[test]
    fn test_cd_parent_skips_missing_ancestors() {
        let mut fs = fs_with(&["/x/y/z"], &[]);
        fs.cd("/x/y/z").unwrap();
        fs.cd("..").unwrap();
        assert_eq!(fs.cwd(), "/");
    }

    #[test]
    fn test_cd_not_found() {
        let mut fs = fs_with(&[], &["f"]);
        let err = fs.cd("f").unwrap_err();
        assert_eq!(err.to_string(), "Directory not found: /f");
        assert!(fs.cd("missing").is_err());
        assert_eq!(fs.cwd(), "/");
    }

    #[test]
    fn test_cd_relative_dotdot() {
        let mut fs = fs_with(&["a", "b"], &[]);
        fs.cd("a").unwrap();
        fs.cd("../b").unwrap();
        assert_eq!(fs.cwd(), "/b");
    }

    #[test]
    fn test_ls_lists_descendants_relative_to_cursor() {
        let mut fs = fs_with(&["a", "a/b", "c"], &["a/b/f", "top"]);
        let listing = fs.ls(Some("/a")).unwrap();
        assert_eq!(listing.target, "/a");
        assert_eq!(listing.entries, vec!["a/b", "a/b/f"]);

        fs.cd("c").unwrap();
        let listing = fs.ls(Some("/a")).unwrap();
        assert_eq!(listing.entries, vec!["../a/b", "../a/b/f"]);
    }

    #[test]
    fn test_ls_root_lists_everything() {
        let fs = fs_with(&["a"], &["a/f", "g"]);
        let listing = fs.ls(None).unwrap();
        assert_eq!(listing.entries, vec!["a", "a/f", "g"]);
    }

    #[test]
    fn test_ls_not_a_directory() {
        let fs = fs_with(&[], &["f"]);
        assert!(matches!(
            fs.ls(Some("f")),
            Err(Error::NotFound {
                target: Target::Directory,
                ..
            })
        ));
        assert!(fs.ls(Some("nope")).is_err());
    }

    #[test]
    fn test_echo_and_cat() {
        let mut fs = fs_with(&[], &["f"]);
        fs.echo("f", "hello world").unwrap();
        assert_eq!(fs.cat("f").unwrap(), "hello world");

        fs.echo("f", "replaced").unwrap();
        assert_eq!(fs.cat("/f").unwrap(), "replaced");
    }

    #[test]
    fn test_echo_on_directory() {
        let mut fs = fs_with(&["d"], &[]);
        assert!(fs.echo("d", "x").is_err());
        assert!(fs.echo("missing", "x").is_err());
        assert!(!fs.contains("/missing"));
    }

    #[test]
    fn test_cat_directory() {
        let fs = fs_with(&["d"], &[]);
        let err = fs.cat("d").unwrap_err();
        assert_eq!(err.to_string(), "File not found: /d");
    }

    #[test]
    fn test_grep_matches_in_order() {
        let mut fs = fs_with(&[], &["f"]);
        fs.echo("f", "cat bat rat").unwrap();
        assert_eq!(fs.grep("[cb]at", "f").unwrap(), vec!["cat", "bat"]);
        assert!(fs.grep("zzz", "f").unwrap().is_empty());
    }

    #[test]
    fn test_grep_errors() {
        let mut fs = fs_with(&["d"], &["f"]);
        fs.echo("f", "abc").unwrap();
        assert!(matches!(
            fs.grep("(", "f"),
            Err(Error::InvalidPattern(_))
        ));
        assert!(matches!(fs.grep("a", "d"), Err(Error::NotFound { .. })));
        // Missing file wins over a bad pattern
        assert!(matches!(fs.grep("(", "nope"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_mv_into_directory() {
        let mut fs = fs_with(&["sub"], &["a"]);
        fs.echo("a", "data").unwrap();
        let to = fs.mv("a", "/sub").unwrap();
        assert_eq!(to, "/sub/a");
        assert!(!fs.contains("/a"));
        assert_eq!(fs.cat("/sub/a").unwrap(), "data");
    }

    #[test]
    fn test_mv_overwrites_destination() {
        let mut fs = fs_with(&["sub"], &["a", "sub/a"]);
        fs.echo("a", "new").unwrap();
        fs.echo("sub/a", "old").unwrap();
        fs.mv("a", "sub").unwrap();
        assert_eq!(fs.cat("/sub/a").unwrap(), "new");
    }

    #[test]
    fn test_mv_leaves_descendants() {
        let mut fs = fs_with(&["d", "dest"], &["d/f"]);
        fs.mv("d", "dest").unwrap();
        assert!(fs.contains("/dest/d"));
        assert!(fs.contains("/d/f"));
        assert!(!fs.contains("/dest/d/f"));
    }

    #[test]
    fn test_mv_cursor_follows() {
        let mut fs = fs_with(&["d", "dest"], &[]);
        fs.cd("d").unwrap();
        fs.mv("/d", "/dest").unwrap();
        assert_eq!(fs.cwd(), "/dest/d");
    }

    #[test]
    fn test_mv_missing_source() {
        let mut fs = VirtualFs::new();
        let err = fs.mv("ghost", "/").unwrap_err();
        assert_eq!(err.to_string(), "Source path not found: /ghost");
        assert_eq!(fs.len(), 1);
    }

    #[test]
    fn test_cp_is_independent() {
        let mut fs = fs_with(&["b"], &["a"]);
        fs.echo("a", "original").unwrap();
        let to = fs.cp("a", "b").unwrap();
        assert_eq!(to, "/b/a");

        fs.echo("a", "x").unwrap();
        assert_eq!(fs.cat("/b/a").unwrap(), "original");
        assert_eq!(fs.cat("/a").unwrap(), "x");
    }

    #[test]
    fn test_cp_directory_is_shallow() {
        let mut fs = fs_with(&["d", "e"], &["d/f"]);
        fs.cp("d", "e").unwrap();
        assert_eq!(fs.get("/e/d"), Some(&Node::Directory));
        assert!(!fs.contains("/e/d/f"));
        assert!(fs.contains("/d/f"));
    }

    #[test]
    fn test_root_protected() {
        let mut fs = fs_with(&["d"], &[]);
        assert!(matches!(fs.rm("/"), Err(Error::RootProtected { .. })));
        assert!(matches!(fs.mv("/", "d"), Err(Error::RootProtected { .. })));
        assert!(matches!(fs.cp("/", "d"), Err(Error::RootProtected { .. })));
        assert!(matches!(fs.rm(".."), Err(Error::RootProtected { .. })));
        assert_eq!(fs.get("/"), Some(&Node::Directory));
    }

    #[test]
    fn test_rm_single_entry() {
        let mut fs = fs_with(&["d"], &["d/f"]);
        fs.rm("d").unwrap();
        assert!(!fs.contains("/d"));
        assert!(fs.contains("/d/f"));
    }

    #[test]
    fn test_rm_missing() {
        let mut fs = fs_with(&[], &["f"]);
        let before = fs.len();
        let err = fs.rm("nonexistent").unwrap_err();
        assert_eq!(err.to_string(), "Path not found: /nonexistent");
        assert_eq!(fs.len(), before);
    }

    #[test]
    fn test_rm_cursor_climbs() {
        let mut fs = fs_with(&["a", "a/b"], &[]);
        fs.cd("/a/b").unwrap();
        fs.rm("/a/b").unwrap();
        assert_eq!(fs.cwd(), "/a");
    }

    #[test]
    fn test_cp_file_over_cursor() {
        let mut fs = fs_with(&["d", "d/f"], &["f"]);
        fs.cd("/d/f").unwrap();
        fs.cp("/f", "/d").unwrap();
        assert_eq!(fs.get("/d/f").map(Node::kind), Some(NodeKind::File));
        assert_eq!(fs.cwd(), "/d");
    }

    #[test]
    fn test_seed_cwd_creates_directory() {
        let mut fs = VirtualFs::new();
        fs.seed_cwd("/home/user");
        assert_eq!(fs.cwd(), "/home/user");
        assert_eq!(fs.get("/home/user"), Some(&Node::Directory));
    }
}
