//! Run with: cargo run --bin seed

use anyhow::Context;
use people_lookup::config::database::{self, ConnectOptions};
use people_lookup::config::env;
use people_lookup::modules::person::crud::{PersonCrud, QueryError};
use people_lookup::modules::person::model::Person;

fn demo_people() -> Vec<Person> {
    vec![
        Person::new("kim").with_field("last", "Lee").with_field("age", 34),
        Person::new("Alex").with_field("last", "Morgan").with_field("age", 29),
        Person::new("Sam").with_field("last", "Ortiz"),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = env::load();
    let uri = config.db_uri()?;

    let mut conn = database::connect(uri, &ConnectOptions::from_config(&config))
        .await
        .context("connecting to the cluster")?;

    let seeded = async {
        let crud = PersonCrud::new(&conn, &config.collection)?.with_timeout(config.query_timeout);
        for person in demo_people() {
            let first = person.first.clone();
            let id = crud.insert(person).await?;
            println!("✓ Inserted {first} ({})", id.to_hex());
        }
        Ok::<_, QueryError>(())
    }
    .await;

    conn.close().await;
    seeded.with_context(|| format!("seeding collection {}", config.collection))?;

    Ok(())
}
