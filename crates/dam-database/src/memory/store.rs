//! In-memory store implementing every repository trait.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::{
    ChildOrder, ChildSortField, DirectoryId, FileId, FileVersionId, PageRequest, PageResponse,
    SortDirection, UserId, UserSettingId,
};
use dam_entity::directory::{CreateDirectory, Directory, FileOrFolder};
use dam_entity::file::{CreateFile, CreateFileVersion, File, FileVersion};
use dam_entity::path;
use dam_entity::settings::{CreateUserSetting, UserSetting};

use crate::traits::{
    DirectoryRepository, FileRepository, FileVersionRepository, UserSettingRepository,
};

#[derive(Debug, Default)]
struct InnerState {
    directories: HashMap<DirectoryId, Directory>,
    files: HashMap<FileId, File>,
    versions: Vec<FileVersion>,
    settings: HashMap<UserId, UserSetting>,
}

/// Process-local store behind one Tokio mutex.
///
/// Every mutation holds the lock for its whole duration, and multi-row
/// writes are applied to a copy that replaces the live maps only on
/// success. Suitable for tests and single-process local runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn directory_not_found(id: DirectoryId) -> AppError {
    AppError::not_found(format!("Directory {id} not found"))
}

fn file_not_found(id: FileId) -> AppError {
    AppError::not_found(format!("File {id} not found"))
}

fn compare_children(a: &FileOrFolder, b: &FileOrFolder, order: ChildOrder) -> Ordering {
    let by_field = match order.field {
        ChildSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ChildSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        ChildSortField::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
    };
    let by_field = match order.direction {
        SortDirection::Asc => by_field,
        SortDirection::Desc => by_field.reverse(),
    };
    by_field.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl DirectoryRepository for MemoryStore {
    async fn find_by_id(&self, id: DirectoryId) -> AppResult<Option<Directory>> {
        let state = self.state.lock().await;
        Ok(state.directories.get(&id).cloned())
    }

    async fn list_roots(&self, user_id: UserId) -> AppResult<Vec<Directory>> {
        let state = self.state.lock().await;
        let mut roots: Vec<Directory> = state
            .directories
            .values()
            .filter(|d| d.user_id == user_id && d.is_root())
            .cloned()
            .collect();
        roots.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(roots)
    }

    async fn create(&self, data: &CreateDirectory) -> AppResult<Directory> {
        let mut state = self.state.lock().await;
        if let Some(parent_id) = data.parent_directory_id {
            if !state.directories.contains_key(&parent_id) {
                return Err(directory_not_found(parent_id));
            }
        }
        let directory = new_directory(data);
        state.directories.insert(directory.id, directory.clone());
        Ok(directory)
    }

    async fn rename(&self, id: DirectoryId, name: &str) -> AppResult<Directory> {
        let mut state = self.state.lock().await;
        let directory = state
            .directories
            .get_mut(&id)
            .ok_or_else(|| directory_not_found(id))?;
        directory.name = name.to_string();
        directory.updated_at = Utc::now();
        Ok(directory.clone())
    }

    async fn move_subtrees(
        &self,
        sources: &[DirectoryId],
        destination: DirectoryId,
    ) -> AppResult<Vec<Directory>> {
        let mut state = self.state.lock().await;
        let mut directories = state.directories.clone();
        let mut files = state.files.clone();
        let now = Utc::now();

        for source_id in sources {
            let target = directories
                .get(&destination)
                .ok_or_else(|| directory_not_found(destination))?;
            let source = directories
                .get(source_id)
                .ok_or_else(|| directory_not_found(*source_id))?;
            let plan = path::plan_subtree_move(source, target)?;

            let mut subtree = Vec::new();
            for directory in directories.values_mut() {
                if directory.id != plan.directory_id
                    && !path::path_in_subtree(&directory.full_path, &plan.descendant_prefix)
                {
                    continue;
                }
                if let Some(rewritten) = plan.rewrite(&directory.full_path) {
                    directory.full_path = rewritten;
                }
                directory.level += plan.level_delta;
                if directory.id == plan.directory_id {
                    directory.parent_directory_id = Some(plan.new_parent_id);
                }
                directory.updated_at = now;
                subtree.push(directory.id);
            }

            let mut file_count = 0usize;
            for file in files.values_mut() {
                if !subtree.contains(&file.directory_id) {
                    continue;
                }
                if let Some(rewritten) = plan.rewrite(&file.full_path) {
                    file.full_path = rewritten;
                }
                file.updated_at = now;
                file_count += 1;
            }

            debug!(
                directory_id = %plan.directory_id,
                destination_id = %plan.new_parent_id,
                directories = subtree.len(),
                files = file_count,
                "Rewrote subtree"
            );
        }

        let moved = sources
            .iter()
            .filter_map(|id| directories.get(id).cloned())
            .collect();
        state.directories = directories;
        state.files = files;
        Ok(moved)
    }

    async fn list_children(
        &self,
        id: DirectoryId,
        order: ChildOrder,
        page: PageRequest,
    ) -> AppResult<PageResponse<FileOrFolder>> {
        let state = self.state.lock().await;

        let directories = state
            .directories
            .values()
            .filter(|d| d.parent_directory_id == Some(id))
            .map(|d| FileOrFolder {
                id: d.id.into_uuid(),
                name: d.name.clone(),
                parent_id: id,
                is_directory: true,
                full_path: d.full_path.clone(),
                created_at: d.created_at,
                updated_at: d.updated_at,
            });
        let files = state
            .files
            .values()
            .filter(|f| f.directory_id == id)
            .map(|f| FileOrFolder {
                id: f.id.into_uuid(),
                name: f.name.clone(),
                parent_id: id,
                is_directory: false,
                full_path: f.full_path.clone(),
                created_at: f.created_at,
                updated_at: f.updated_at,
            });

        let mut children: Vec<FileOrFolder> = directories.chain(files).collect();
        children.sort_by(|a, b| compare_children(a, b, order));

        let total = children.len() as u64;
        let items = children
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }
}

fn new_directory(data: &CreateDirectory) -> Directory {
    let now = Utc::now();
    Directory {
        id: DirectoryId::new(),
        name: data.name.clone(),
        user_id: data.user_id,
        full_path: data.full_path.clone(),
        parent_directory_id: data.parent_directory_id,
        level: data.level,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl FileRepository for MemoryStore {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        let state = self.state.lock().await;
        Ok(state.files.get(&id).cloned())
    }

    async fn create_with_first_version(&self, data: &CreateFile) -> AppResult<(File, FileVersion)> {
        let mut state = self.state.lock().await;
        if !state.directories.contains_key(&data.directory_id) {
            return Err(directory_not_found(data.directory_id));
        }

        let now = Utc::now();
        let file_id = FileId::new();
        let version = FileVersion {
            id: FileVersionId::new(),
            file_id,
            version_number: 1,
            size_bytes: data.size_bytes,
            content_type: data.content_type.clone(),
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };
        let file = File {
            id: file_id,
            name: data.name.clone(),
            size_bytes: data.size_bytes,
            content_type: data.content_type.clone(),
            user_id: data.user_id,
            directory_id: data.directory_id,
            full_path: data.full_path.clone(),
            description: None,
            tags: Vec::new(),
            latest_version_id: Some(version.id),
            created_at: now,
            updated_at: now,
        };

        state.files.insert(file.id, file.clone());
        state.versions.push(version.clone());
        Ok((file, version))
    }

    async fn update_metadata(
        &self,
        id: FileId,
        description: Option<&str>,
        tags: &[String],
    ) -> AppResult<File> {
        let mut state = self.state.lock().await;
        let file = state.files.get_mut(&id).ok_or_else(|| file_not_found(id))?;
        file.description = description.map(str::to_string);
        file.tags = tags.to_vec();
        file.updated_at = Utc::now();
        Ok(file.clone())
    }

    async fn move_files(&self, ids: &[FileId], destination: DirectoryId) -> AppResult<Vec<File>> {
        let mut state = self.state.lock().await;
        let target = state
            .directories
            .get(&destination)
            .cloned()
            .ok_or_else(|| directory_not_found(destination))?;
        if let Some(missing) = ids.iter().find(|id| !state.files.contains_key(*id)) {
            return Err(file_not_found(*missing));
        }

        let now = Utc::now();
        let mut moved = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(file) = state.files.get_mut(id) {
                file.full_path = path::rebase_file_path(&file.full_path, &target.full_path);
                file.directory_id = target.id;
                file.updated_at = now;
                moved.push(file.clone());
            }
        }
        Ok(moved)
    }
}

#[async_trait]
impl FileVersionRepository for MemoryStore {
    async fn append(&self, data: &CreateFileVersion) -> AppResult<(File, FileVersion)> {
        let mut state = self.state.lock().await;
        if !state.files.contains_key(&data.file_id) {
            return Err(file_not_found(data.file_id));
        }

        let next = state
            .versions
            .iter()
            .filter(|v| v.file_id == data.file_id)
            .map(|v| v.version_number)
            .max()
            .unwrap_or(0)
            + 1;
        let now = Utc::now();
        let version = FileVersion {
            id: FileVersionId::new(),
            file_id: data.file_id,
            version_number: next,
            size_bytes: data.size_bytes,
            content_type: data.content_type.clone(),
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };
        state.versions.push(version.clone());

        let file = state
            .files
            .get_mut(&data.file_id)
            .ok_or_else(|| file_not_found(data.file_id))?;
        file.latest_version_id = Some(version.id);
        file.size_bytes = version.size_bytes;
        file.content_type = version.content_type.clone();
        file.updated_at = now;
        Ok((file.clone(), version))
    }

    async fn list_for_file(&self, file_id: FileId) -> AppResult<Vec<FileVersion>> {
        let state = self.state.lock().await;
        let mut versions: Vec<FileVersion> = state
            .versions
            .iter()
            .filter(|v| v.file_id == file_id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.version_number.cmp(&b.version_number))
        });
        Ok(versions)
    }
}

#[async_trait]
impl UserSettingRepository for MemoryStore {
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<UserSetting>> {
        let state = self.state.lock().await;
        Ok(state.settings.get(&user_id).cloned())
    }

    async fn create(&self, data: &CreateUserSetting) -> AppResult<UserSetting> {
        let mut state = self.state.lock().await;
        if state.settings.contains_key(&data.user_id) {
            return Err(AppError::conflict(format!(
                "User {} already has storage settings",
                data.user_id
            )));
        }

        let now = Utc::now();
        let setting = UserSetting {
            id: UserSettingId::new(),
            user_id: data.user_id,
            storage_vendor: data.storage_vendor,
            storage_credentials: sqlx::types::Json(data.storage_credentials.clone()),
            storage_informations: sqlx::types::Json(data.storage_informations.clone()),
            created_at: now,
            updated_at: now,
        };
        state.settings.insert(data.user_id, setting.clone());
        Ok(setting)
    }
}

#[cfg(test)]
mod tests {
    use dam_core::error::ErrorKind;

    use super::*;

    fn repos() -> (Arc<dyn DirectoryRepository>, Arc<dyn FileRepository>, Arc<dyn FileVersionRepository>) {
        let store = MemoryStore::new();
        (Arc::new(store.clone()), Arc::new(store.clone()), Arc::new(store))
    }

    async fn root(dirs: &Arc<dyn DirectoryRepository>, user_id: UserId) -> Directory {
        dirs.create(&CreateDirectory {
            name: "root".into(),
            user_id,
            full_path: String::new(),
            parent_directory_id: None,
            level: 0,
        })
        .await
        .unwrap()
    }

    async fn child(dirs: &Arc<dyn DirectoryRepository>, parent: &Directory, name: &str) -> Directory {
        dirs.create(&CreateDirectory {
            name: name.into(),
            user_id: parent.user_id,
            full_path: path::child_directory_path(parent),
            parent_directory_id: Some(parent.id),
            level: parent.level + 1,
        })
        .await
        .unwrap()
    }

    async fn upload(files: &Arc<dyn FileRepository>, dir: &Directory, name: &str) -> File {
        files
            .create_with_first_version(&CreateFile {
                name: name.into(),
                size_bytes: 10,
                content_type: "text/plain".into(),
                user_id: dir.user_id,
                directory_id: dir.id,
                full_path: path::file_path(dir, name),
            })
            .await
            .unwrap()
            .0
    }

    #[tokio::test]
    async fn test_roots_are_listed_per_user() {
        let (dirs, _, _) = repos();
        let user = UserId::new();
        let first = root(&dirs, user).await;
        let second = root(&dirs, user).await;
        root(&dirs, UserId::new()).await;

        let roots = dirs.list_roots(user).await.unwrap();
        let ids: Vec<_> = roots.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.id) && ids.contains(&second.id));
    }

    #[tokio::test]
    async fn test_move_rewrites_subtree_and_leaves_siblings() {
        let (dirs, files, _) = repos();
        let r = root(&dirs, UserId::new()).await;
        let a = child(&dirs, &r, "a").await;
        let a1 = child(&dirs, &a, "a1").await;
        let sibling = child(&dirs, &r, "b").await;
        let sibling_child = child(&dirs, &sibling, "b1").await;
        let dest = child(&dirs, &sibling_child, "dest").await;
        let doc = upload(&files, &a1, "doc.pdf").await;

        let moved = dirs.move_subtrees(&[a.id], dest.id).await.unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].parent_directory_id, Some(dest.id));
        assert_eq!(moved[0].full_path, path::subtree_prefix(&dest));
        assert_eq!(moved[0].level, dest.level + 1);

        let a1_after = dirs.find_by_id(a1.id).await.unwrap().unwrap();
        assert_eq!(a1_after.full_path, path::subtree_prefix(&moved[0]));
        assert_eq!(a1_after.level, moved[0].level + 1);

        let doc_after = files.find_by_id(doc.id).await.unwrap().unwrap();
        assert_eq!(doc_after.directory_id, a1.id);
        assert_eq!(doc_after.full_path, path::file_path(&a1_after, "doc.pdf"));

        let sibling_after = dirs.find_by_id(sibling.id).await.unwrap().unwrap();
        assert_eq!(sibling_after.full_path, sibling.full_path);
        assert_eq!(sibling_after.level, sibling.level);
    }

    #[tokio::test]
    async fn test_failed_move_has_no_effect() {
        let (dirs, _, _) = repos();
        let r = root(&dirs, UserId::new()).await;
        let a = child(&dirs, &r, "a").await;
        let b = child(&dirs, &r, "b").await;

        let err = dirs
            .move_subtrees(&[a.id, DirectoryId::new()], b.id)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));

        let a_after = dirs.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(a_after, a);
    }

    #[tokio::test]
    async fn test_move_rolls_back_when_later_source_enters_own_subtree() {
        let (dirs, files, _) = repos();
        let r = root(&dirs, UserId::new()).await;
        let a = child(&dirs, &r, "a").await;
        let b = child(&dirs, &r, "b").await;
        let b1 = child(&dirs, &b, "b1").await;
        let doc = upload(&files, &a, "doc.pdf").await;

        let err = dirs.move_subtrees(&[a.id, b.id], b1.id).await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidArgument));

        assert_eq!(dirs.find_by_id(a.id).await.unwrap().unwrap(), a);
        assert_eq!(dirs.find_by_id(b.id).await.unwrap().unwrap(), b);
        assert_eq!(files.find_by_id(doc.id).await.unwrap().unwrap().full_path, doc.full_path);
    }

    #[tokio::test]
    async fn test_children_name_order_is_bytewise() {
        let (dirs, files, _) = repos();
        let r = root(&dirs, UserId::new()).await;
        child(&dirs, &r, "alpha").await;
        upload(&files, &r, "Zeta.txt").await;
        child(&dirs, &r, "Beta").await;

        let order: ChildOrder = "name asc".parse().unwrap();
        let page = PageRequest { limit: 10, offset: 0 };
        let listing = dirs.list_children(r.id, order, page).await.unwrap();

        let names: Vec<_> = listing.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Beta", "Zeta.txt", "alpha"]);
    }

    #[tokio::test]
    async fn test_children_union_ordered_by_name() {
        let (dirs, files, _) = repos();
        let r = root(&dirs, UserId::new()).await;
        child(&dirs, &r, "beta").await;
        upload(&files, &r, "alpha.txt").await;
        upload(&files, &r, "gamma.txt").await;

        let order: ChildOrder = "name asc".parse().unwrap();
        let page = PageRequest { limit: 2, offset: 0 };
        let listing = dirs.list_children(r.id, order, page).await.unwrap();

        assert_eq!(listing.total_items, 3);
        assert!(listing.has_more);
        let names: Vec<_> = listing.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["alpha.txt", "beta"]);
        assert!(!listing.items[0].is_directory);
        assert!(listing.items[1].is_directory);
    }

    #[tokio::test]
    async fn test_versions_are_numbered_and_linked() {
        let (dirs, files, versions) = repos();
        let r = root(&dirs, UserId::new()).await;
        let file = upload(&files, &r, "x.bin").await;

        let (updated, v2) = versions
            .append(&CreateFileVersion {
                file_id: file.id,
                user_id: file.user_id,
                size_bytes: 99,
                content_type: "application/octet-stream".into(),
            })
            .await
            .unwrap();
        assert_eq!(v2.version_number, 2);
        assert_eq!(updated.latest_version_id, Some(v2.id));
        assert_eq!(updated.size_bytes, 99);

        let all = versions.list_for_file(file.id).await.unwrap();
        let numbers: Vec<_> = all.iter().map(|v| v.version_number).collect();
        assert_eq!(numbers, [1, 2]);
        assert_eq!(Some(all[0].id), file.latest_version_id);
    }
}
