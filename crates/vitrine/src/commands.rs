//! CLI command implementations.

use std::sync::Arc;

use color_eyre::eyre::Result;

use vitrine_core::NewProduct;
use vitrine_server::{Server, ServerConfig};
use vitrine_store::{Catalog, SqlCatalog};

/// Start the catalog server.
pub async fn serve(host: String, port: u16, database_url: String) -> Result<()> {
    tracing::info!("Starting Vitrine server...");

    let catalog = SqlCatalog::connect(&database_url).await?;
    // A fresh database should serve an empty listing, not a missing-table error.
    catalog.migrate().await?;

    let addr = format!("{}:{}", host, port).parse()?;
    let config = ServerConfig { addr, cors: true };

    let server = Server::new(config, Arc::new(catalog));
    server.run().await?;

    Ok(())
}

/// Create the database schema.
pub async fn db_migrate(database_url: String) -> Result<()> {
    let catalog = SqlCatalog::connect(&database_url).await?;
    catalog.migrate().await?;

    println!("Schema ensured at {}", database_url);
    Ok(())
}

/// Insert a small set of demo products.
pub async fn db_seed(database_url: String) -> Result<()> {
    let catalog = SqlCatalog::connect(&database_url).await?;
    catalog.migrate().await?;

    let inserted = catalog.seed(demo_products()).await?;

    println!("Inserted {} products into {}", inserted, database_url);
    Ok(())
}

/// Print the catalog contents as a table.
pub async fn products(database_url: String) -> Result<()> {
    let catalog = SqlCatalog::connect(&database_url).await?;
    catalog.migrate().await?;

    let products = catalog.list().await?;

    if products.is_empty() {
        println!("Catalog is empty. Seed it with: vitrine db seed");
        return Ok(());
    }

    println!("{:>6}  {:<24} {:>10}  {}", "ID", "NAME", "PRICE", "DESCRIPTION");
    for product in &products {
        println!(
            "{:>6}  {:<24} {:>10.2}  {}",
            product.id, product.name, product.price, product.description
        );
    }
    println!("\n{} products", products.len());

    Ok(())
}

/// Display version and build info.
pub fn version() {
    println!("vitrine {}", env!("CARGO_PKG_VERSION"));
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
}

fn demo_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Widget", 9.99, "A widget"),
        NewProduct::new("Gadget", 19.50, "A gadget"),
        NewProduct::new("Sprocket", 4.25, "Standard sprocket, pack of one"),
        NewProduct::new("Flange", 12.00, "Mounting flange"),
    ]
}
