//! Seed the database with sample customer records.
//!
//! Useful for local development so the list view has something to show.
//! Migrations must have been applied first (`clientele-cli migrate`).

use chrono::NaiveDate;
use tracing::info;

use clientele_core::NewCustomer;
use clientele_server::config::{ConfigError, ServerConfig};
use clientele_server::db::{self, CustomerRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

fn sample_customers() -> Vec<NewCustomer> {
    let customer = |name: &str, (y, m, d): (i32, u32, u32), member_number, interests: &str| {
        NewCustomer {
            name: name.to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date"),
            member_number,
            interests: interests.to_owned(),
        }
    };

    vec![
        customer("Ada Lovelace", (1815, 12, 10), 1001, "mathematics, poetry"),
        customer("Grace Hopper", (1906, 12, 9), 1002, "compilers, navy history"),
        customer("Alan Turing", (1912, 6, 23), 1003, "cryptography, running"),
        customer(
            "Katherine Johnson",
            (1918, 8, 26),
            1004,
            "orbital mechanics, teaching",
        ),
        customer(
            "Margaret Hamilton",
            (1936, 8, 17),
            1005,
            "software engineering, flight systems",
        ),
    ]
}

/// Insert the sample records.
///
/// With `skip_existing`, records whose member number is already present are
/// left alone, so reruns do not create duplicates.
///
/// # Errors
///
/// Returns [`SeedError`] if configuration is invalid or an insert fails.
pub async fn run(skip_existing: bool) -> Result<(), SeedError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    let repo = CustomerRepository::new(&pool);

    let existing: Vec<i64> = if skip_existing {
        repo.list().await?.iter().map(|c| c.member_number).collect()
    } else {
        Vec::new()
    };

    let mut inserted = 0;
    let mut skipped = 0;
    for new in sample_customers() {
        if existing.contains(&new.member_number) {
            skipped += 1;
            continue;
        }
        let customer = repo.create(&new).await?;
        info!(id = %customer.id, name = %customer.name, "Inserted customer");
        inserted += 1;
    }

    info!("Seeding complete! Inserted: {inserted}, skipped: {skipped}");
    Ok(())
}
