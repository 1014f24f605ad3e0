use async_trait::async_trait;

use super::{FormEvent, Lead};
use crate::errors::Result;

/// 线索写入目标
///
/// HTTP 层只依赖这个 trait，SeaOrmStorage 是生产实现
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// 写入一条线索，失败时请求返回 500
    async fn insert_lead(&self, lead: &Lead) -> Result<()>;

    /// 记录表单事件
    async fn record_form_event(&self, event: &FormEvent) -> Result<()>;

    /// 已保存线索数量（健康检查用）
    async fn count_leads(&self) -> Result<u64>;
}
