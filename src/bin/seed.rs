//! Provisions the initial administrator account. Safe to run more than once.

use std::process::ExitCode;

use rayon::ThreadPoolBuilder;
use rentdesk::{
  seed::{seed_admin, SeedCredentials, SeedError, SeedOutcome},
  shared::{
    config::{Config, ConfigError},
    database::MongoDatabase,
    hash_worker::HashWorker,
    telemetry,
  },
  users::repository::user_repository::MongoUserRepository,
};
use thiserror::Error;

#[derive(Debug, Error)]
enum SeedCommandError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),
  #[error("Thread pool error: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),
  #[error("Database error: {0}")]
  Database(#[from] mongodb::error::Error),
  #[error(transparent)]
  Seed(#[from] SeedError),
}

#[tokio::main]
async fn main() -> ExitCode {
  dotenvy::dotenv().ok();
  telemetry::init();

  match run().await {
    Ok(SeedOutcome::Created { uuid }) => {
      tracing::info!(%uuid, "admin user seeded");
      ExitCode::SUCCESS
    }
    Ok(SeedOutcome::AlreadyExists { .. }) => {
      tracing::info!("admin user already present, nothing to do");
      ExitCode::SUCCESS
    }
    Err(error) => {
      tracing::error!(%error, "seeding failed");
      ExitCode::FAILURE
    }
  }
}

async fn run() -> Result<SeedOutcome, SeedCommandError> {
  let config = Config::from_env()?;
  let thread_pool = ThreadPoolBuilder::new().num_threads(1).build()?;
  let hasher = HashWorker::new(thread_pool, 1, config.bcrypt_cost);
  let credentials = SeedCredentials::from_env();

  let database = MongoDatabase::connect(&config).await?;
  let repository = MongoUserRepository::new(&database);

  let result = async {
    repository.ensure_indexes().await.map_err(SeedError::from)?;
    Ok::<_, SeedCommandError>(
      seed_admin(&repository, &hasher, &credentials).await?,
    )
  }
  .await;

  drop(repository);
  database.disconnect().await;
  result
}
