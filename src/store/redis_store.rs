//! # Redis Document Store
//!
//! Backend over Redis with the JSON module, using a `deadpool-redis`
//! connection pool. Connections authenticate when they are created, so a bad
//! credential fails the checkout instead of the first command.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Connection, Manager, Pool, Runtime};
use redis::IntoConnectionInfo;
use tokio::task::JoinHandle;

use super::backend::DocumentStore;
use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};

const SCAN_BATCH: usize = 500;
const REAP_INTERVAL: Duration = Duration::from_secs(30);

/// Document store backed by a pooled Redis client
pub struct RedisStore {
    pool: Pool,
    timeout: Duration,
    reaper: JoinHandle<()>,
}

impl RedisStore {
    /// Build the pool for `config`.
    ///
    /// No connection is opened here; the first checkout dials and
    /// authenticates. Must be called from inside a tokio runtime.
    pub fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let (host, port) = config.host_port()?;
        let mut info = (host, port).into_connection_info()?;
        info.redis.password = config.password.clone();

        let manager = Manager::new(info)?;
        let timeout = config.timeout();

        let pool = Pool::builder(manager)
            .max_size(config.max_active)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| StoreError::Pool(e.to_string()))?;

        let reaper = spawn_idle_reaper(pool.clone(), config.max_idle);

        tracing::debug!(
            address = %config.address,
            max_idle = config.max_idle,
            max_active = config.max_active,
            timeout_ms = config.timeout_ms,
            "redis pool created"
        );

        Ok(Self {
            pool,
            timeout,
            reaper,
        })
    }

    async fn connection(&self) -> StoreResult<Connection> {
        Ok(self.pool.get().await?)
    }

    /// Run `op` under the operation deadline.
    ///
    /// The connection checked out inside `op` is dropped, and so returned to
    /// the pool, whether `op` finishes, fails or is cut off.
    async fn bounded<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("status", &self.pool.status())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Periodically drop idle connections above `max_idle`.
fn spawn_idle_reaper(pool: Pool, max_idle: usize) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REAP_INTERVAL);
        loop {
            ticker.tick().await;
            if pool.is_closed() {
                break;
            }
            let mut kept = 0usize;
            let _ = pool.retain(|_, _| {
                kept += 1;
                kept <= max_idle
            });
        }
    })
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn set_document(&self, key: &str, path: &str, json: &str) -> StoreResult<String> {
        self.bounded(async {
            let mut conn = self.connection().await?;
            let reply: Option<String> = redis::cmd("JSON.SET")
                .arg(key)
                .arg(path)
                .arg(json)
                .query_async(&mut conn)
                .await?;
            Ok(reply.unwrap_or_default())
        })
        .await
    }

    async fn get_document(&self, key: &str, path: &str) -> StoreResult<Option<String>> {
        self.bounded(async {
            let mut conn = self.connection().await?;
            let reply: Option<String> = redis::cmd("JSON.GET")
                .arg(key)
                .arg(path)
                .query_async(&mut conn)
                .await?;
            Ok(reply)
        })
        .await
    }

    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        self.bounded(async {
            let mut conn = self.connection().await?;
            let mut keys = Vec::new();
            let mut seen = HashSet::new();
            let mut cursor: u64 = 0;

            // SCAN may repeat a key across batches
            loop {
                let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(pattern)
                    .arg("COUNT")
                    .arg(SCAN_BATCH)
                    .query_async(&mut conn)
                    .await?;

                for key in batch {
                    if seen.insert(key.clone()) {
                        keys.push(key);
                    }
                }

                if next == 0 {
                    break;
                }
                cursor = next;
            }

            Ok(keys)
        })
        .await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.bounded(async {
            let mut conn = self.connection().await?;
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }

    fn close(&self) {
        self.pool.close();
        self.reaper.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    type CommandLog = Arc<Mutex<Vec<Vec<String>>>>;

    /// Read one RESP array of bulk strings
    async fn read_command<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<Vec<String>> {
        let mut line = String::new();
        if reader.read_line(&mut line).await.ok()? == 0 {
            return None;
        }
        let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            line.clear();
            reader.read_line(&mut line).await.ok()?;
            let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
            let mut buf = vec![0u8; len + 2];
            reader.read_exact(&mut buf).await.ok()?;
            buf.truncate(len);
            args.push(String::from_utf8(buf).ok()?);
        }
        Some(args)
    }

    fn bulk(value: &str) -> String {
        format!("${}\r\n{}\r\n", value.len(), value)
    }

    fn reply(args: &[String], password: &str) -> String {
        let name = args.first().map(|a| a.to_ascii_uppercase()).unwrap_or_default();
        match name.as_str() {
            "AUTH" if args.last().map(String::as_str) == Some(password) => "+OK\r\n".to_string(),
            "AUTH" => "-WRONGPASS invalid username-password pair\r\n".to_string(),
            "PING" if args.len() > 1 => bulk(&args[1]),
            "PING" => "+PONG\r\n".to_string(),
            "JSON.GET" => "$-1\r\n".to_string(),
            "SCAN" => format!("*2\r\n{}*1\r\n{}", bulk("0"), bulk("query:a")),
            _ => "+OK\r\n".to_string(),
        }
    }

    /// Minimal RESP server requiring `password`, recording every command
    async fn spawn_fake_redis(password: &'static str) -> (SocketAddr, CommandLog) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let log: CommandLog = Arc::default();

        let accept_log = log.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let log = accept_log.clone();
                tokio::spawn(async move {
                    let (read, mut write) = socket.into_split();
                    let mut reader = BufReader::new(read);
                    while let Some(args) = read_command(&mut reader).await {
                        let response = reply(&args, password);
                        log.lock().unwrap().push(args);
                        if write.write_all(response.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                });
            }
        });

        (addr, log)
    }

    fn fake_config(addr: SocketAddr, password: &str) -> StoreConfig {
        let mut config = StoreConfig::with_address(addr.to_string());
        config.password = Some(password.to_string());
        config.timeout_ms = 2000;
        config
    }

    fn logged(log: &CommandLog, name: &str) -> Vec<Vec<String>> {
        log.lock()
            .unwrap()
            .iter()
            .filter(|args| args.first().is_some_and(|a| a.eq_ignore_ascii_case(name)))
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn test_wrong_password_fails_checkout() {
        let (addr, log) = spawn_fake_redis("s3cret").await;
        let store = RedisStore::connect(&fake_config(addr, "wrong")).unwrap();

        let result = store.get_document("query:a", ".").await;
        assert!(result.is_err(), "checkout must fail, got {:?}", result);

        let auths = logged(&log, "AUTH");
        assert!(!auths.is_empty());
        assert!(auths.iter().all(|args| args.last().map(String::as_str) == Some("wrong")));
        assert!(logged(&log, "JSON.GET").is_empty());
        store.close();
    }

    #[tokio::test]
    async fn test_commands_on_authenticated_connection() {
        let (addr, log) = spawn_fake_redis("s3cret").await;
        let store = RedisStore::connect(&fake_config(addr, "s3cret")).unwrap();

        assert_eq!(store.get_document("query:missing", ".").await.unwrap(), None);
        assert_eq!(
            store
                .set_document("query:a", ".", r#"{"name":"a"}"#)
                .await
                .unwrap(),
            "OK"
        );
        assert_eq!(
            store.scan_keys("query:*").await.unwrap(),
            vec!["query:a".to_string()]
        );
        store.ping().await.unwrap();

        assert_eq!(logged(&log, "AUTH")[0].last().map(String::as_str), Some("s3cret"));
        assert_eq!(
            logged(&log, "JSON.GET"),
            vec![vec!["JSON.GET", "query:missing", "."]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()]
        );
        assert_eq!(
            logged(&log, "JSON.SET")[0],
            vec!["JSON.SET", "query:a", ".", r#"{"name":"a"}"#]
        );
        assert_eq!(
            logged(&log, "SCAN")[0],
            vec!["SCAN", "0", "MATCH", "query:*", "COUNT", "500"]
        );
        store.close();
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_address() {
        let config = StoreConfig::with_address("no-port-here");
        let err = RedisStore::connect(&config).unwrap_err();
        assert!(matches!(err, StoreError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_connect_is_lazy() {
        // Nothing listens on port 1; building the pool must still succeed.
        let config = StoreConfig::with_address("127.0.0.1:1");
        let store = RedisStore::connect(&config).unwrap();
        assert_eq!(store.pool.status().size, 0);
        store.close();
    }

    #[tokio::test]
    async fn test_closed_pool_refuses_checkout() {
        let config = StoreConfig::with_address("127.0.0.1:1");
        let store = RedisStore::connect(&config).unwrap();
        store.close();
        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, StoreError::Closed));
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_checkout() {
        let mut config = StoreConfig::with_address("127.0.0.1:1");
        config.timeout_ms = 500;
        let store = RedisStore::connect(&config).unwrap();
        let err = store.get_document("query:any", ".").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Connection(_) | StoreError::Timeout(_) | StoreError::Pool(_)
        ));
        store.close();
    }
}
