use async_trait::async_trait;
use bcrypt::{hash, verify, BcryptError};
use rayon::ThreadPool;
use std::sync::Arc;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Error, Debug)]
pub enum HashWorkerError {
  #[error("Bcrypt error: {0}")]
  Bcrypt(#[from] BcryptError),
  #[error("Channel send error")]
  Send,
  #[error("Channel receive error")]
  Receive,
}

enum WorkOrder {
  Hash(String, flume::Sender<Result<String, HashWorkerError>>),
  Verify(String, String, flume::Sender<Result<bool, HashWorkerError>>),
}

/// Runs bcrypt on a dedicated thread pool so hashing never stalls the
/// async workers.
pub struct HashWorker {
  sender: flume::Sender<WorkOrder>,
}

impl HashWorker {
  pub fn new(thread_pool: ThreadPool, num_threads: usize, cost: u32) -> Self {
    // Each hash takes a noticeable fraction of a second, so let roughly three
    // rounds of work queue up before callers start waiting on the channel.
    let channels_capacity = num_threads * 3;
    let (tx, rx) = flume::bounded::<WorkOrder>(channels_capacity);
    let rx = Arc::new(rx);

    for _ in 0..num_threads {
      thread_pool.spawn({
        let arc_rx = Arc::clone(&rx);
        move || {
          while let Ok(work_order) = arc_rx.recv() {
            match work_order {
              WorkOrder::Hash(password, response) => {
                let _ = response
                  .send(hash(password, cost).map_err(HashWorkerError::from));
              }
              WorkOrder::Verify(password, hashed_password, response) => {
                let _ = response.send(
                  verify(password, &hashed_password)
                    .map_err(HashWorkerError::from),
                );
              }
            };
          }
        }
      });
    }

    Self { sender: tx }
  }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Hasher: Send + Sync {
  async fn hash_password(
    &self,
    password: &str,
  ) -> Result<String, HashWorkerError>;
  async fn verify_password(
    &self,
    password: &str,
    hash: &str,
  ) -> Result<bool, HashWorkerError>;
}

#[async_trait]
impl Hasher for HashWorker {
  async fn hash_password(
    &self,
    password: &str,
  ) -> Result<String, HashWorkerError> {
    let (response_tx, response_rx) = flume::bounded(1);
    self
      .sender
      .send_async(WorkOrder::Hash(password.to_string(), response_tx))
      .await
      .map_err(|_| HashWorkerError::Send)?;

    response_rx
      .recv_async()
      .await
      .map_err(|_| HashWorkerError::Receive)?
  }

  async fn verify_password(
    &self,
    password: &str,
    hash: &str,
  ) -> Result<bool, HashWorkerError> {
    let (response_tx, response_rx) = flume::bounded(1);
    self
      .sender
      .send_async(WorkOrder::Verify(
        password.to_string(),
        hash.to_string(),
        response_tx,
      ))
      .await
      .map_err(|_| HashWorkerError::Send)?;

    response_rx
      .recv_async()
      .await
      .map_err(|_| HashWorkerError::Receive)?
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use fake::{faker::internet::en::Password, Fake};
  use rayon::ThreadPoolBuilder;

  /// A worker with the cheapest bcrypt cost, for tests.
  pub fn test_hash_worker() -> HashWorker {
    let thread_pool = ThreadPoolBuilder::new()
      .num_threads(2)
      .build()
      .expect("Failed to create thread pool");
    HashWorker::new(thread_pool, 2, 4)
  }

  #[actix_web::test]
  async fn test_hash_and_verify_password() {
    let hash_worker = test_hash_worker();

    let password = Password(12..13).fake::<String>();

    let hashed_password = hash_worker
      .hash_password(&password)
      .await
      .expect("Hashing failed");
    assert_ne!(hashed_password, password);

    let is_valid = hash_worker
      .verify_password(&password, &hashed_password)
      .await
      .expect("Verification failed");
    assert!(is_valid, "The password verification failed");

    let is_invalid = hash_worker
      .verify_password("wrong_password", &hashed_password)
      .await
      .expect("Verification failed for invalid password");
    assert!(!is_invalid, "The password verification should have failed");
  }

  #[actix_web::test]
  async fn test_same_password_gets_distinct_salts() {
    let hash_worker = test_hash_worker();

    let first = hash_worker.hash_password("secret-pass").await.unwrap();
    let second = hash_worker.hash_password("secret-pass").await.unwrap();

    assert_ne!(first, second);
  }

  #[actix_web::test]
  async fn test_verify_rejects_malformed_hash() {
    let hash_worker = test_hash_worker();

    let result = hash_worker.verify_password("secret", "not-a-hash").await;

    assert!(matches!(result, Err(HashWorkerError::Bcrypt(_))));
  }
}
