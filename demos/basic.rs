//! Basic usage of a namespace x environment logger collection
//!
//! Run with:
//!
//! ```sh
//! DEBUG=app:dev,db:dev cargo run --example basic
//! ```

use hello_debug::debug;
use hello_debug::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    let namespaces = ["app", "api", "db"];
    let environments = ["dev", "prod", "test"];

    let logger = Hello::new(namespaces, environments);

    println!("Enable everything with DEBUG={}", logger.patterns());

    debug!(logger["app"]["dev"], "Starting application in development mode")?;
    debug!(logger["api"]["dev"], "API server initialized")?;
    debug!(logger["db"]["dev"], "Database connection established")?;

    // Silent unless DEBUG includes the prod environment
    debug!(logger["app"]["prod"], "Production app is running")?;
    debug!(logger["db"]["prod"], "Production database connected")?;

    // Force one pair on regardless of DEBUG
    logger["app"]["test"].set_enabled(true)?;
    debug!(logger["app"]["test"], "Running tests...")?;

    let object = json!({
        "id": 123,
        "name": "Test Object",
        "nested": { "property": "value", "items": [1, 2, 3] },
    });
    debug!(
        logger["app"]["dev"],
        "Creating complex object with properties: {}", object
    )?;

    println!("Changing DEBUG after construction still works");
    std::env::set_var("DEBUG", "api:prod");
    debug!(logger["api"]["prod"], "This shows because DEBUG=api:prod is now set")?;

    println!(
        "{} of {} handles were created",
        logger.resolved_count(),
        logger.handles().count()
    );

    Ok(())
}
