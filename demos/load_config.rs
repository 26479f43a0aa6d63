// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loads a typed configuration from etcd.
//!
//! This example demonstrates:
//! - Connecting a client to etcd
//! - Registering a schema and storing values for it
//! - Binding the resolved values into an application struct
//!
//! To run this example against a local etcd:
//! ```bash
//! docker run -d -p 2379:2379 quay.io/coreos/etcd:v3.5.9 \
//!     etcd --listen-client-urls http://0.0.0.0:2379 --advertise-client-urls http://0.0.0.0:2379
//! cargo run --example load_config --features etcd
//! ```

use rigel::adapters::EtcdStorage;
use rigel::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Config {
    database_url: String,
    max_retries: i64,
    enable_ssl: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let storage = EtcdStorage::connect(vec!["localhost:2379"])?;
    let rigel = Rigel::builder().storage(storage).build()?;

    rigel.add_schema(
        "exampleSchema",
        1,
        &[
            Field::new("database_url", "string"),
            Field::new("max_retries", "int"),
            Field::new("enable_ssl", "bool"),
        ],
    )?;
    rigel.set_config_value("exampleSchema", 1, "database_url", "postgres://localhost:5432/app")?;
    rigel.set_config_value("exampleSchema", 1, "max_retries", "5")?;
    rigel.set_config_value("exampleSchema", 1, "enable_ssl", "true")?;

    let config: Config = rigel.load_config("exampleSchema", 1, "exampleConfig")?;

    println!("Database URL: {}", config.database_url);
    println!("Max retries:  {}", config.max_retries);
    println!("SSL enabled:  {}", config.enable_ssl);
    Ok(())
}
