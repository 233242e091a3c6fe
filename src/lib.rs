use crate::config::database::{self, ConnectOptions};
use crate::config::env::ConfigSnapshot;
use crate::modules::person::crud::PersonCrud;
use crate::modules::person::model::Person;

pub mod config;
pub mod error;
pub mod modules;

pub use error::AppError;

/// Connects, looks up everyone whose `first` equals `name`, and closes the
/// connection again whether or not the lookup succeeded.
pub async fn run_lookup(config: &ConfigSnapshot, name: &str) -> Result<Vec<Person>, AppError> {
    let uri = config.db_uri()?;
    let mut conn = database::connect(uri, &ConnectOptions::from_config(config)).await?;
    tracing::debug!(
        uri = %conn.uri(),
        database = %conn.database_name(),
        collection = %config.collection,
        name,
        "Looking up people"
    );

    let result = match PersonCrud::new(&conn, &config.collection) {
        Ok(crud) => crud.with_timeout(config.query_timeout).find_by_first_name(name).await,
        Err(e) => Err(e),
    };

    conn.close().await;
    Ok(result?)
}
