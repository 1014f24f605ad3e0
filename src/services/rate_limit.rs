//! 固定窗口限流器
//!
//! 每个客户端 IP 一个窗口，窗口内超过 `max_requests` 次的请求被拒绝。
//! 被拒绝的请求同样计数。状态只在进程内，重启即清空。

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::config::LeadConfig;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }

    /// Retry-After 头的秒数（向上取整，至少 1）
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            RateDecision::Allowed { .. } => None,
            RateDecision::Limited { retry_after } => {
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                Some(secs.max(1))
            }
        }
    }
}

pub struct FixedWindowLimiter {
    windows: DashMap<String, Window>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn from_config(config: &LeadConfig) -> Self {
        Self::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        )
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            entry.started = now;
            entry.count = 0;
        }
        entry.count = entry.count.saturating_add(1);

        if entry.count > self.max_requests {
            let retry_after = self
                .window
                .saturating_sub(now.saturating_duration_since(entry.started));
            RateDecision::Limited { retry_after }
        } else {
            RateDecision::Allowed {
                remaining: self.max_requests - entry.count,
            }
        }
    }

    /// 删除已过期的窗口，返回删除数量
    pub fn evict_expired_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < self.window);
        before.saturating_sub(self.windows.len())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// 后台清理任务，每个窗口周期执行一次
    pub fn spawn_cleanup(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(limiter.window.max(Duration::from_secs(1)));
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = limiter.evict_expired_at(Instant::now());
                if evicted > 0 {
                    debug!(
                        "Rate limiter evicted {} expired windows ({} active)",
                        evicted,
                        limiter.len()
                    );
                }
            }
        })
    }
}
