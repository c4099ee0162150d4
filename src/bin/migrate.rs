use anyhow::{anyhow, Result};
use sport_slot_bot::config::Config;
use sport_slot_bot::database::connection::DatabaseManager;
use std::env;
use std::io;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    dotenvy::dotenv().ok();
    let database_url = Config::database_url_from_env();

    match command {
        "migrate" | "up" => run_migrations(&database_url).await,
        "check" => check_database(&database_url).await,
        "reset" => reset_database(&database_url).await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

/// Filesystem path of a SQLite URL (`sqlite:path` or `sqlite://path`).
fn sqlite_path(database_url: &str) -> Option<&str> {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
}

async fn run_migrations(database_url: &str) -> Result<()> {
    println!("🔧 Sport Slot Bot - Database Migration Tool");
    println!("===========================================");
    println!("📊 Database URL: {}", mask_url(database_url));

    if let Some(parent) = sqlite_path(database_url).and_then(|p| Path::new(p).parent()) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            println!("📁 Creating directory: {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
    }

    println!("🚀 Running database migrations...");
    let db_manager = DatabaseManager::new(database_url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    if let Err(e) = db_manager.run_migrations().await {
        eprintln!("❌ Migration failed: {e}");
        std::process::exit(1);
    }

    println!("✅ Migrations completed successfully!");
    Ok(())
}

async fn check_database(database_url: &str) -> Result<()> {
    println!("🔍 Checking database connection and schema...");
    println!("📊 Database URL: {}", mask_url(database_url));

    let db_manager = DatabaseManager::new(database_url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match check_tables(&db_manager).await {
        Ok(tables) => {
            println!("✅ Database connection successful!");
            println!("📋 Found tables:");
            for table in &tables {
                println!("  • {table}");
            }
            if tables.iter().any(|t| t == "searches") {
                let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM searches")
                    .fetch_one(&db_manager.pool)
                    .await?;
                println!("🔎 Recorded searches: {count}");
            } else {
                println!("💡 Try running 'migrate up' to create the schema");
            }
        }
        Err(e) => {
            println!("⚠️  Database check failed: {e}");
            println!("💡 Try running 'migrate up' to create the schema");
        }
    }

    Ok(())
}

async fn reset_database(database_url: &str) -> Result<()> {
    println!("⚠️  WARNING: This will delete the whole search history!");
    println!("🤔 Are you sure you want to continue? (yes/no)");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().to_lowercase() != "yes" {
        println!("❌ Reset cancelled.");
        return Ok(());
    }

    let Some(db_path) = sqlite_path(database_url) else {
        return Err(anyhow!("Reset is only supported for SQLite databases"));
    };

    if Path::new(db_path).exists() {
        std::fs::remove_file(db_path)?;
        println!("🗑️  Deleted database file: {db_path}");
    }

    println!("🔄 Recreating database schema...");
    run_migrations(database_url).await?;

    println!("✅ Database reset completed!");
    Ok(())
}

async fn check_tables(db_manager: &DatabaseManager) -> Result<Vec<String>> {
    let tables = sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
    )
    .fetch_all(&db_manager.pool)
    .await?;

    Ok(tables)
}

fn mask_url(url: &str) -> String {
    match sqlite_path(url).and_then(|p| Path::new(p).file_name()) {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("🏐 Sport Slot Bot - Database Migration Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up    Run database migrations (default)");
    println!("    check          Check database connection and schema");
    println!("    reset          Reset database (SQLite only) - DESTRUCTIVE!");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: sqlite:./data/slots.db)");
    println!();
}
