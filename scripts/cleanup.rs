//! Run with: cargo run --bin cleanup

use anyhow::Context;
use people_lookup::config::database::{self, ConnectOptions};
use people_lookup::config::env;
use people_lookup::modules::person::crud::PersonCrud;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = env::load();
    let uri = config.db_uri()?;

    let mut conn = database::connect(uri, &ConnectOptions::from_config(&config))
        .await
        .context("connecting to the cluster")?;

    let dropped = async {
        PersonCrud::new(&conn, &config.collection)?
            .with_timeout(config.query_timeout)
            .drop_collection()
            .await
    }
    .await;

    conn.close().await;
    dropped.with_context(|| format!("dropping collection {}", config.collection))?;

    println!("✓ Dropped {}.{}", config.database, config.collection);
    Ok(())
}
