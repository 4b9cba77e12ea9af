use std::{io, sync::Arc};

use actix_web::{web, App, HttpServer};
use rayon::ThreadPoolBuilder;
use rentdesk::{
  configure,
  shared::{config::Config, hash_worker::HashWorker, telemetry},
  users::repository::user_repository::UserRepository,
  AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> io::Result<()> {
  dotenvy::dotenv().ok();
  telemetry::init();

  let config = Config::from_env()
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
  let thread_pool = ThreadPoolBuilder::new()
    .num_threads(config.hash_threads)
    .build()
    .map_err(io::Error::other)?;
  let hasher = Arc::new(HashWorker::new(
    thread_pool,
    config.hash_threads,
    config.bcrypt_cost,
  ));

  #[cfg(feature = "mongodb")]
  let user_repository = {
    use rentdesk::shared::database::MongoDatabase;
    use rentdesk::users::repository::user_repository::MongoUserRepository;

    let database = MongoDatabase::connect(&config)
      .await
      .map_err(io::Error::other)?;
    let repository = MongoUserRepository::new(&database);
    repository.ensure_indexes().await.map_err(io::Error::other)?;
    repository
  };

  #[cfg(not(feature = "mongodb"))]
  let user_repository = {
    tracing::warn!("built without `mongodb`, users are kept in memory");
    rentdesk::users::repository::user_repository::InMemoryUserRepository::new()
  };

  serve(config, user_repository, hasher).await
}

async fn serve<UR>(
  config: Config,
  user_repository: UR,
  hasher: Arc<HashWorker>,
) -> io::Result<()>
where
  UR: UserRepository + Send + Sync + 'static,
{
  let host = config.host.clone();
  let state = web::Data::new(AppState {
    user_repository,
    config,
    hasher,
  });

  tracing::info!("Listening on http://{}", host);
  HttpServer::new(move || {
    App::new()
      .wrap(TracingLogger::default())
      .configure(|cfg| configure(cfg, state.clone()))
  })
  .bind(host)?
  .run()
  .await
}
