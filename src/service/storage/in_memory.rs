use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::types::GroupRecord;

#[derive(Clone, Default)]
pub struct MapStorage {
    groups: Arc<Mutex<HashMap<String, GroupRecord>>>,
}

impl MapStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InternalError {}

#[async_trait]
impl super::Storage for MapStorage {
    type InternalError = InternalError;

    async fn get_group(&self, id: &str) -> Result<Option<GroupRecord>, Self::InternalError> {
        let groups = self.groups.lock().await;

        Ok(groups.get(id).cloned())
    }

    async fn save_group(&self, group: &GroupRecord) -> Result<(), Self::InternalError> {
        let mut groups = self.groups.lock().await;

        groups.insert(group.id.clone(), group.clone());

        Ok(())
    }
}
