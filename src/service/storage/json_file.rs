use std::{collections::HashMap, io::ErrorKind, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::types::GroupRecord;

type Table = HashMap<String, GroupRecord>;

/// Record store backed by a single JSON file holding every group keyed by
/// its id. The file is read on every access, nothing is cached between
/// requests.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Arc<Mutex<()>>,
}

#[derive(thiserror::Error, Debug)]
pub enum InternalError {
    #[error("failed to access table {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed table {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn read_table(&self) -> Result<Table, InternalError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Table::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Table::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| InternalError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_table(&self, table: &Table) -> Result<(), InternalError> {
        let json = serde_json::to_vec_pretty(table).map_err(|source| InternalError::Json {
            path: self.path.clone(),
            source,
        })?;

        // Write next to the table and rename so readers never see half a file.
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| self.io_error(source))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> InternalError {
        InternalError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl super::Storage for JsonFileStorage {
    type InternalError = InternalError;

    async fn get_group(&self, id: &str) -> Result<Option<GroupRecord>, Self::InternalError> {
        let mut table = self.read_table().await?;

        Ok(table.remove(id))
    }

    async fn save_group(&self, group: &GroupRecord) -> Result<(), Self::InternalError> {
        let _guard = self.write_lock.lock().await;

        let mut table = self.read_table().await?;
        table.insert(group.id.clone(), group.clone());

        self.write_table(&table).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::storage::Storage;

    #[tokio::test]
    async fn missing_file_is_an_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("groups.json"));

        assert_eq!(storage.get_group("natal").await.unwrap(), None);
    }

    #[tokio::test]
    async fn saved_groups_are_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("groups.json"));

        let mut natal = GroupRecord::new("natal", vec!["Ana".into(), "Bruno".into(), "Caio".into()]);
        natal.apply_draw(
            9,
            [("Ana", "Bruno"), ("Bruno", "Caio"), ("Caio", "Ana")]
                .into_iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        );
        let pascoa = GroupRecord::new("pascoa", vec!["Duda".into()]);

        storage.save_group(&natal).await.unwrap();
        storage.save_group(&pascoa).await.unwrap();

        assert_eq!(storage.get_group("natal").await.unwrap(), Some(natal));
        assert_eq!(storage.get_group("pascoa").await.unwrap(), Some(pascoa));
    }

    #[tokio::test]
    async fn reads_records_with_stable_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        tokio::fs::write(
            &path,
            r#"{"natal": {"amigosecreto": "natal", "amigos": ["Ana", "Bruno", "Caio"]}}"#,
        )
        .await
        .unwrap();

        let group = JsonFileStorage::new(&path)
            .get_group("natal")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(group.participants, ["Ana", "Bruno", "Caio"]);
        assert!(!group.is_drawn());
    }

    #[tokio::test]
    async fn malformed_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let err = JsonFileStorage::new(&path).get_group("natal").await.unwrap_err();

        assert!(matches!(err, InternalError::Json { .. }));
    }
}
