use crate::config::database::Connection;
use crate::modules::person::model::Person;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::Collection;
use std::future::{Future, IntoFuture};
use std::time::Duration;
use thiserror::Error;

pub const COLLECTION_NAME: &str = "people";
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("connection is not open")]
    NotConnected,
    #[error("transport failure: {0}")]
    Transport(#[from] mongodb::error::Error),
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
}

pub struct PersonCrud {
    collection: Collection<Person>,
    query_timeout: Duration,
}

impl PersonCrud {
    pub fn new(conn: &Connection, collection: &str) -> Result<Self, QueryError> {
        let db = conn.database().ok_or(QueryError::NotConnected)?;
        Ok(Self {
            collection: db.collection(collection),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, mongodb::error::Error>>,
    ) -> Result<T, QueryError> {
        match tokio::time::timeout(self.query_timeout, op).await {
            Ok(result) => result.map_err(QueryError::from),
            Err(_) => Err(QueryError::Timeout(self.query_timeout)),
        }
    }

    /// Exact, case-sensitive match on `first`, in store order.
    pub async fn find_by_first_name(&self, name: &str) -> Result<Vec<Person>, QueryError> {
        let people = self
            .bounded(async {
                let cursor = self.collection.find(first_equals(name)).await?;
                cursor.try_collect::<Vec<Person>>().await
            })
            .await?;

        tracing::debug!(collection = %self.collection_name(), name, count = people.len(), "Found people");
        Ok(people)
    }

    pub async fn insert(&self, mut person: Person) -> Result<ObjectId, QueryError> {
        let id = *person.id.get_or_insert_with(ObjectId::new);
        self.bounded(self.collection.insert_one(&person).into_future())
            .await?;
        Ok(id)
    }

    pub async fn count_by_first_name(&self, name: &str) -> Result<u64, QueryError> {
        self.bounded(self.collection.count_documents(first_equals(name)).into_future())
            .await
    }

    pub async fn delete_by_first_name(&self, name: &str) -> Result<u64, QueryError> {
        let result = self
            .bounded(self.collection.delete_many(first_equals(name)).into_future())
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn drop_collection(&self) -> Result<(), QueryError> {
        self.bounded(self.collection.drop().into_future()).await
    }
}

/// Whole-value equality on `first`: arrays containing `name` do not match,
/// and a name starting with `$` is compared as a string, not a field path.
fn first_equals(name: &str) -> Document {
    doc! { "$expr": { "$eq": ["$first", { "$literal": name }] } }
}

/// One-shot lookup against an open connection.
pub async fn find_by_first_name(
    conn: &Connection,
    collection: &str,
    name: &str,
) -> Result<Vec<Person>, QueryError> {
    PersonCrud::new(conn, collection)?.find_by_first_name(name).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_whole_value_equality() {
        assert_eq!(
            first_equals("kim"),
            doc! { "$expr": { "$eq": ["$first", { "$literal": "kim" }] } }
        );
    }

    #[test]
    fn test_filter_does_not_treat_name_as_field_path() {
        let filter = first_equals("$first");
        let eq = filter
            .get_document("$expr")
            .unwrap()
            .get_array("$eq")
            .unwrap();
        assert_eq!(eq[1], bson::Bson::Document(doc! { "$literal": "$first" }));
    }

    #[tokio::test]
    async fn test_open_connection_gives_collection() {
        let mut conn = Connection::offline("myapp").await;

        let crud = PersonCrud::new(&conn, COLLECTION_NAME).unwrap();
        assert_eq!(crud.collection_name(), "people");

        conn.close().await;
    }

    #[tokio::test]
    async fn test_closed_connection_is_not_connected() {
        let mut conn = Connection::offline("myapp").await;
        conn.close().await;

        assert!(matches!(
            PersonCrud::new(&conn, COLLECTION_NAME),
            Err(QueryError::NotConnected)
        ));

        let err = find_by_first_name(&conn, COLLECTION_NAME, "kim")
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::NotConnected));
    }

    #[tokio::test]
    async fn test_unreachable_server_times_out_or_fails() {
        let mut conn = Connection::offline("myapp").await;
        let crud = PersonCrud::new(&conn, COLLECTION_NAME)
            .unwrap()
            .with_timeout(Duration::from_millis(200));

        let err = crud.find_by_first_name("kim").await.unwrap_err();
        assert!(matches!(err, QueryError::Timeout(_) | QueryError::Transport(_)));

        conn.close().await;
    }
}
