//! 数据库写入重试
//!
//! 连接中断、死锁、锁超时时按指数退避自动重试，其余错误立即返回

use sea_orm::DbErr;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// 重试配置
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }
}

/// 判断数据库错误是否可重试
pub fn is_retryable_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime_err) | DbErr::Query(runtime_err) => {
            is_retryable_runtime_error(runtime_err)
        }
        _ => false,
    }
}

fn is_retryable_runtime_error(err: &sea_orm::error::RuntimeErr) -> bool {
    use sea_orm::error::RuntimeErr;

    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            use std::ops::Deref;
            if let Some(db_err) = sqlx_err.deref().as_database_error()
                && let Some(code) = db_err.code()
            {
                return matches!(
                    code.as_ref(),
                    // MySQL 死锁 / 锁超时
                    "1213" | "1205" |
                    // PostgreSQL 序列化失败 / 死锁
                    "40001" | "40P01" |
                    // SQLite BUSY / LOCKED
                    "5" | "6"
                );
            }
            is_retryable_message(&sqlx_err.to_string().to_lowercase())
        }
        RuntimeErr::Internal(msg) => is_retryable_message(&msg.to_lowercase()),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn is_retryable_message(err_str: &str) -> bool {
    const PATTERNS: &[&str] = &[
        "deadlock",
        "lock wait timeout",
        "database is locked",
        "serialization failure",
    ];
    PATTERNS.iter().any(|p| err_str.contains(p))
}

/// 指数退避重试执行器
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "Operation '{}' succeeded after {} retries",
                        operation_name, attempt
                    );
                }
                return Ok(result);
            }
            Err(e) if is_retryable_error(&e) && attempt < config.max_retries => {
                attempt += 1;
                let delay = calculate_backoff(attempt, config.base_delay_ms, config.max_delay_ms);
                warn!(
                    "Operation '{}' failed (attempt {}/{}): {}; retrying in {} ms",
                    operation_name,
                    attempt,
                    config.max_retries + 1,
                    e,
                    delay
                );
                sleep(Duration::from_millis(delay)).await;
            }
            Err(e) => {
                debug!("Operation '{}' gave up: {}", operation_name, e);
                return Err(e);
            }
        }
    }
}

/// 退避时间：base * 2^(attempt-1)，上限 max，再加 0-25% 抖动
fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> u64 {
    let exp_delay = base_ms.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
    let capped = exp_delay.min(max_ms);
    let jitter = rand::random_range(0..=capped / 4);
    capped.saturating_add(jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay_ms: 5,
            max_delay_ms: 20,
        }
    }

    #[test]
    fn test_connection_errors_are_retryable() {
        let err = DbErr::ConnectionAcquire(sea_orm::error::ConnAcquireErr::Timeout);
        assert!(is_retryable_error(&err));

        let err = DbErr::Conn(sea_orm::error::RuntimeErr::Internal(
            "connection reset".to_string(),
        ));
        assert!(is_retryable_error(&err));
    }

    #[test]
    fn test_lock_errors_are_retryable() {
        let err = DbErr::Exec(sea_orm::error::RuntimeErr::Internal(
            "database is locked".to_string(),
        ));
        assert!(is_retryable_error(&err));

        let err = DbErr::Query(sea_orm::error::RuntimeErr::Internal(
            "Deadlock found when trying to get lock".to_string(),
        ));
        assert!(is_retryable_error(&err));
    }

    #[test]
    fn test_constraint_errors_are_not_retryable() {
        let err = DbErr::Exec(sea_orm::error::RuntimeErr::Internal(
            "UNIQUE constraint failed: leads.id".to_string(),
        ));
        assert!(!is_retryable_error(&err));
        assert!(!is_retryable_error(&DbErr::RecordNotInserted));
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let first = calculate_backoff(1, 100, 2000);
        assert!((100..=125).contains(&first));

        let third = calculate_backoff(3, 100, 2000);
        assert!((400..=500).contains(&third));

        let capped = calculate_backoff(12, 100, 2000);
        assert!((2000..=2500).contains(&capped));
    }

    #[test]
    fn test_retry_config_from_database_config() {
        let db = DatabaseConfig {
            retry_count: 7,
            retry_base_delay_ms: 11,
            retry_max_delay_ms: 99,
            ..Default::default()
        };
        let config = RetryConfig::from(&db);
        assert_eq!(config.max_retries, 7);
        assert_eq!(config.base_delay_ms, 11);
        assert_eq!(config.max_delay_ms, 99);
    }

    #[tokio::test]
    async fn test_with_retry_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);

        let result = with_retry("insert_lead", fast_config(3), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(DbErr::ConnectionAcquire(
                        sea_orm::error::ConnAcquireErr::Timeout,
                    ))
                } else {
                    Ok("saved")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "saved");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);

        let result = with_retry("insert_lead", fast_config(2), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err::<(), _>(DbErr::ConnectionAcquire(
                    sea_orm::error::ConnAcquireErr::Timeout,
                ))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_does_not_retry_permanent_errors() {
        let calls = AtomicU32::new(0);

        let result = with_retry("insert_lead", fast_config(5), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(DbErr::RecordNotInserted) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
