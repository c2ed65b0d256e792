//! Materialized path arithmetic.
//!
//! A directory's `full_path` is the chain of its ancestors' ids, ending in
//! the parent's id. It does **not** include the directory's own id:
//!
//! ```text
//! root R          full_path = ""            (tree.root_path)
//! child C of R    full_path = "/R"
//! child D of C    full_path = "/R/C"
//! file x.txt in D full_path = "/R/C/x.txt"
//! ```
//!
//! Every descendant directory of `X` has a path that equals or starts with
//! `X.full_path + "/" + X.id`, which this module calls the subtree prefix.
//! A file's path is its directory's `full_path` plus the name, so files in
//! sibling directories share a prefix; `directory_id` is what places a file.
//!
//! Everything here is pure; callers persist the results.

use dam_core::{AppError, AppResult};
use dam_core::types::DirectoryId;

use crate::directory::Directory;

/// `full_path` for a new directory created directly under `parent`.
pub fn child_directory_path(parent: &Directory) -> String {
    subtree_prefix(parent)
}

/// `full_path` for a file named `name` placed in `directory`.
pub fn file_path(directory: &Directory, name: &str) -> String {
    format!("{}/{}", directory.full_path, name)
}

/// The prefix every descendant path of `dir` starts with.
pub fn subtree_prefix(dir: &Directory) -> String {
    format!("{}/{}", dir.full_path, dir.id)
}

/// Whether `candidate` is `root` itself or one of its descendants.
pub fn is_within_subtree(candidate: &Directory, root: &Directory) -> bool {
    if candidate.id == root.id {
        return true;
    }
    path_in_subtree(&candidate.full_path, &subtree_prefix(root))
}

/// Whether a stored path lies under a subtree prefix.
///
/// Matches whole segments only, so `/a/b` is not under `/a/bc`.
pub fn path_in_subtree(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Replace a leading `old_prefix` of `path` with `new_prefix`.
///
/// Returns `None` when `path` does not start with `old_prefix`.
pub fn rebase_path(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    path.strip_prefix(old_prefix)
        .map(|rest| format!("{new_prefix}{rest}"))
}

/// Point a file path at a new directory path, keeping the name verbatim.
///
/// `/a/b/report.pdf` rebased onto `/x/y` becomes `/x/y/report.pdf`.
pub fn rebase_file_path(file_path: &str, destination_path: &str) -> String {
    let name = match file_path.rfind('/') {
        Some(idx) => &file_path[idx + 1..],
        None => file_path,
    };
    format!("{destination_path}/{name}")
}

/// A validated description of moving one directory subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeMove {
    /// The directory being moved.
    pub directory_id: DirectoryId,
    /// Its new parent.
    pub new_parent_id: DirectoryId,
    /// The moved directory's current `full_path`.
    pub old_prefix: String,
    /// The path replacing `old_prefix`: the destination's subtree prefix.
    pub new_prefix: String,
    /// Paths equal to or under this are descendants of the moved directory.
    pub descendant_prefix: String,
    /// Change applied to every `level` in the subtree.
    pub level_delta: i32,
}

impl SubtreeMove {
    /// Rewrite a directory or file path from the moved subtree.
    ///
    /// Returns `None` for paths outside the subtree.
    pub fn rewrite(&self, path: &str) -> Option<String> {
        rebase_path(path, &self.old_prefix, &self.new_prefix)
    }
}

/// Plan moving `source` (and its subtree) under `destination`.
///
/// Fails with `InvalidArgument` when `destination` is `source` or lies
/// inside its subtree.
pub fn plan_subtree_move(source: &Directory, destination: &Directory) -> AppResult<SubtreeMove> {
    if is_within_subtree(destination, source) {
        return Err(AppError::invalid_argument(format!(
            "Cannot move directory {} into its own subtree",
            source.id
        )));
    }

    Ok(SubtreeMove {
        directory_id: source.id,
        new_parent_id: destination.id,
        old_prefix: source.full_path.clone(),
        new_prefix: subtree_prefix(destination),
        descendant_prefix: subtree_prefix(source),
        level_delta: destination.level + 1 - source.level,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use dam_core::error::ErrorKind;
    use dam_core::types::UserId;

    use super::*;

    fn dir(parent: Option<&Directory>) -> Directory {
        let now = Utc::now();
        Directory {
            id: DirectoryId::new(),
            name: "d".into(),
            user_id: UserId::new(),
            full_path: parent.map(child_directory_path).unwrap_or_default(),
            parent_directory_id: parent.map(|p| p.id),
            level: parent.map(|p| p.level + 1).unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_child_path_excludes_own_id() {
        let root = dir(None);
        let child = dir(Some(&root));
        let grandchild = dir(Some(&child));

        assert_eq!(child.full_path, format!("/{}", root.id));
        assert_eq!(grandchild.full_path, format!("/{}/{}", root.id, child.id));
        assert!(!grandchild.full_path.contains(&grandchild.id.to_string()));
    }

    #[test]
    fn test_file_path() {
        let root = dir(None);
        let child = dir(Some(&root));
        assert_eq!(
            file_path(&child, "x.txt"),
            format!("/{}/x.txt", root.id)
        );
    }

    #[test]
    fn test_subtree_membership() {
        let root = dir(None);
        let a = dir(Some(&root));
        let b = dir(Some(&root));
        let a_child = dir(Some(&a));

        assert!(is_within_subtree(&a, &a));
        assert!(is_within_subtree(&a_child, &a));
        assert!(!is_within_subtree(&b, &a));
        assert!(!is_within_subtree(&root, &a));
    }

    #[test]
    fn test_path_in_subtree_matches_whole_segments() {
        assert!(path_in_subtree("/a/b", "/a/b"));
        assert!(path_in_subtree("/a/b/c", "/a/b"));
        assert!(!path_in_subtree("/a/bc", "/a/b"));
    }

    #[test]
    fn test_rebase_file_path_keeps_name() {
        assert_eq!(rebase_file_path("/a/b/report.pdf", "/x/y"), "/x/y/report.pdf");
        assert_eq!(rebase_file_path("/a/b/v1.2.tar.gz", ""), "/v1.2.tar.gz");
    }

    #[test]
    fn test_rebase_path() {
        assert_eq!(rebase_path("/a/b/c", "/a/b", "/x").as_deref(), Some("/x/c"));
        assert_eq!(rebase_path("/q/c", "/a/b", "/x"), None);
    }

    #[test]
    fn test_plan_move_between_roots() {
        let r = dir(None);
        let c = dir(Some(&r));
        let c_child = dir(Some(&c));
        let s = dir(None);

        let plan = plan_subtree_move(&c, &s).unwrap();
        assert_eq!(plan.level_delta, 0);
        assert_eq!(plan.rewrite(&c.full_path).unwrap(), format!("/{}", s.id));
        assert_eq!(
            plan.rewrite(&c_child.full_path).unwrap(),
            format!("/{}/{}", s.id, c.id)
        );
    }

    #[test]
    fn test_plan_move_shifts_levels() {
        let r = dir(None);
        let a = dir(Some(&r));
        let deep = dir(Some(&dir(Some(&a))));
        let b = dir(Some(&r));

        let plan = plan_subtree_move(&b, &deep).unwrap();
        assert_eq!(plan.level_delta, deep.level + 1 - b.level);
        assert_eq!(plan.level_delta, 3);
    }

    #[test]
    fn test_plan_rejects_move_into_own_subtree() {
        let r = dir(None);
        let a = dir(Some(&r));
        let a_child = dir(Some(&a));

        let err = plan_subtree_move(&a, &a_child).unwrap_err();
        assert!(err.is(ErrorKind::InvalidArgument));
        assert!(plan_subtree_move(&a, &a).is_err());
    }
}
