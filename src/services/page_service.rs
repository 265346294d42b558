use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use log::{debug, info, error};
use crate::errors::StoreError;
use crate::services::Title;
use crate::types::Page;

const PAGE_EXTENSION: &str = "txt";

/// Flat-file page storage, one `{title}.txt` per page.
///
/// There is no locking: concurrent saves of the same title race and the
/// last writer wins.
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
}

impl PageStore {
    /// Create a new page store rooted at `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating PageStore with data directory: {:?}", data_dir);
        Self { data_dir }
    }

    /// Storage key for a title
    pub fn path_for(&self, title: &Title) -> PathBuf {
        self.data_dir.join(format!("{}.{}", title, PAGE_EXTENSION))
    }

    /// Read a page from disk
    pub fn load(&self, title: &Title) -> Result<Page, StoreError> {
        let path = self.path_for(title);
        debug!("Loading page {} from {:?}", title, path);

        let body = fs::read(&path).map_err(|source| {
            debug!("Failed to read page {:?}: {}", path, source);
            StoreError::Load { path: path.clone(), source }
        })?;

        info!("Loaded page {}, {} bytes", title, body.len());
        Ok(Page::new(title.clone(), body))
    }

    /// Write a page to disk, replacing any previous content
    pub fn save(&self, page: &Page) -> Result<(), StoreError> {
        let path = self.path_for(&page.title);
        debug!("Saving page {} to {:?}", page.title, path);

        write_owner_only(&path, &page.body).map_err(|source| {
            error!("Failed to write page {:?}: {}", path, source);
            StoreError::Save { path: path.clone(), source }
        })?;

        info!("Saved page {}, {} bytes", page.title, page.body.len());
        Ok(())
    }
}

fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::services::TitleValidator;

    fn title(raw: &str) -> Title {
        TitleValidator::new().validate(raw).unwrap()
    }

    #[test]
    fn path_is_title_plus_txt() {
        let store = PageStore::new(PathBuf::from("pages"));
        assert_eq!(store.path_for(&title("Alice")), PathBuf::from("pages/Alice.txt"));
    }

    #[test]
    fn save_then_load_returns_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());
        let body: Vec<u8> = vec![0, 159, 146, 150, b'\n', b'<', b'>', 255];

        store.save(&Page::new(title("Binary1"), body.clone())).unwrap();
        let loaded = store.load(&title("Binary1")).unwrap();

        assert_eq!(loaded.title.as_str(), "Binary1");
        assert_eq!(loaded.body, body);
    }

    #[test]
    fn saving_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());
        let page = Page::new(title("Twice"), "same body");

        store.save(&page).unwrap();
        store.save(&page).unwrap();

        assert_eq!(store.load(&title("Twice")).unwrap().body, b"same body");
    }

    #[test]
    fn save_replaces_longer_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());

        store.save(&Page::new(title("Shrink"), "a much longer first version")).unwrap();
        store.save(&Page::new(title("Shrink"), "short")).unwrap();

        assert_eq!(store.load(&title("Shrink")).unwrap().body, b"short");
    }

    #[test]
    fn empty_body_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());

        store.save(&Page::empty(title("Blank"))).unwrap();

        assert!(store.load(&title("Blank")).unwrap().body.is_empty());
    }

    #[test]
    fn missing_page_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());

        match store.load(&title("Nobody")) {
            Err(StoreError::Load { path, .. }) => assert!(path.ends_with("Nobody.txt")),
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn save_into_missing_directory_is_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path().join("does-not-exist"));

        let result = store.save(&Page::new(title("Lost"), "x"));

        assert!(matches!(result, Err(StoreError::Save { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn new_page_file_is_owner_read_write_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());
        store.save(&Page::new(title("Private"), "secret")).unwrap();

        let mode = fs::metadata(store.path_for(&title("Private"))).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    proptest! {
        #[test]
        fn prop_save_load_round_trip(
            raw in "[a-zA-Z0-9]{1,32}",
            body in proptest::collection::vec(any::<u8>(), 0..1024),
        ) {
            let dir = tempfile::tempdir().unwrap();
            let store = PageStore::new(dir.path().to_path_buf());
            let page_title = title(&raw);

            store.save(&Page::new(page_title.clone(), body.clone())).unwrap();
            prop_assert_eq!(store.load(&page_title).unwrap().body, body);
        }
    }
}
