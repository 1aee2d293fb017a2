use sea_orm_migration::prelude::*;
use std::env;

use migration::Migrator;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let command = env::args().nth(1).unwrap_or_else(|| "up".to_string());

    let db = sea_orm::Database::connect(&db_url)
        .await
        .expect("Failed to connect to database");

    match command.as_str() {
        "up" => {
            Migrator::up(&db, None)
                .await
                .expect("Failed to apply migrations");
            println!("Migrations applied");
        }
        "down" => {
            Migrator::down(&db, None)
                .await
                .expect("Failed to roll back migration");
            println!("Last migration rolled back");
        }
        "fresh" => {
            Migrator::fresh(&db)
                .await
                .expect("Failed to re-create schema");
            println!("Schema re-created from scratch");
        }
        "status" => {
            Migrator::status(&db)
                .await
                .expect("Failed to read migration status");
        }
        other => {
            eprintln!("Unknown command: {}. Use: up, down, fresh, or status", other);
            std::process::exit(1);
        }
    }
}
