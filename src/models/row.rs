//! Argument types for row operations
//!
//! Absent optional fields are left out of the request body.

use super::{Marker, PartitionKey, PrimaryKey, ReadConsistency, UpdateFields};
use serde::Serialize;

/// Arguments for deleting rows by key or by filter
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRowsArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKey>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl DeleteRowsArgs {
    pub fn by_primary_key(primary_key: PrimaryKey) -> Self {
        Self {
            primary_key: Some(primary_key),
            ..Default::default()
        }
    }

    pub fn by_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Default::default()
        }
    }

    pub fn partition_key(mut self, partition_key: PartitionKey) -> Self {
        self.partition_key = Some(partition_key);
        self
    }
}

/// Arguments for a point lookup by primary key
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRowArgs {
    pub primary_key: PrimaryKey,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKey>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projections: Option<Vec<String>>,

    pub retrieve_vector: bool,

    pub read_consistency: ReadConsistency,
}

impl QueryRowArgs {
    pub fn new(primary_key: PrimaryKey) -> Self {
        Self {
            primary_key,
            partition_key: None,
            projections: None,
            retrieve_vector: false,
            read_consistency: ReadConsistency::default(),
        }
    }

    pub fn partition_key(mut self, partition_key: PartitionKey) -> Self {
        self.partition_key = Some(partition_key);
        self
    }

    pub fn projections<I, S>(mut self, projections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projections = Some(projections.into_iter().map(Into::into).collect());
        self
    }

    pub fn retrieve_vector(mut self, retrieve_vector: bool) -> Self {
        self.retrieve_vector = retrieve_vector;
        self
    }

    pub fn read_consistency(mut self, read_consistency: ReadConsistency) -> Self {
        self.read_consistency = read_consistency;
        self
    }
}

/// Arguments for a paginated scan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRowsArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projections: Option<Vec<String>>,

    pub limit: u32,

    pub read_consistency: ReadConsistency,
}

impl Default for SelectRowsArgs {
    fn default() -> Self {
        Self {
            filter: None,
            marker: None,
            projections: None,
            limit: 10,
            read_consistency: ReadConsistency::default(),
        }
    }
}

impl SelectRowsArgs {
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Continue from the `nextMarker` of a previous page
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn projections<I, S>(mut self, projections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projections = Some(projections.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn read_consistency(mut self, read_consistency: ReadConsistency) -> Self {
        self.read_consistency = read_consistency;
        self
    }
}

/// Arguments for updating fields of one row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRowArgs {
    pub primary_key: PrimaryKey,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKey>,

    pub update: UpdateFields,
}

impl UpdateRowArgs {
    pub fn new(primary_key: PrimaryKey, update: UpdateFields) -> Self {
        Self {
            primary_key,
            partition_key: None,
            update,
        }
    }

    pub fn partition_key(mut self, partition_key: PartitionKey) -> Self {
        self.partition_key = Some(partition_key);
        self
    }
}
