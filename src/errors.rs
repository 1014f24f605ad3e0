use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum NestleadError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    Content(String),
    RateLimited(String),
}

impl NestleadError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            NestleadError::DatabaseConfig(_) => "E001",
            NestleadError::DatabaseConnection(_) => "E002",
            NestleadError::DatabaseOperation(_) => "E003",
            NestleadError::FileOperation(_) => "E004",
            NestleadError::Validation(_) => "E005",
            NestleadError::NotFound(_) => "E006",
            NestleadError::Serialization(_) => "E007",
            NestleadError::Content(_) => "E008",
            NestleadError::RateLimited(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            NestleadError::DatabaseConfig(_) => "Database Configuration Error",
            NestleadError::DatabaseConnection(_) => "Database Connection Error",
            NestleadError::DatabaseOperation(_) => "Database Operation Error",
            NestleadError::FileOperation(_) => "File Operation Error",
            NestleadError::Validation(_) => "Validation Error",
            NestleadError::NotFound(_) => "Resource Not Found",
            NestleadError::Serialization(_) => "Serialization Error",
            NestleadError::Content(_) => "Content Error",
            NestleadError::RateLimited(_) => "Rate Limit Exceeded",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            NestleadError::DatabaseConfig(msg)
            | NestleadError::DatabaseConnection(msg)
            | NestleadError::DatabaseOperation(msg)
            | NestleadError::FileOperation(msg)
            | NestleadError::Validation(msg)
            | NestleadError::NotFound(msg)
            | NestleadError::Serialization(msg)
            | NestleadError::Content(msg)
            | NestleadError::RateLimited(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    ///
    /// 客户端只会看到 400 / 404 / 429 / 500 四类
    pub fn http_status(&self) -> StatusCode {
        match self {
            NestleadError::Validation(_) => StatusCode::BAD_REQUEST,
            NestleadError::NotFound(_) => StatusCode::NOT_FOUND,
            NestleadError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for NestleadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for NestleadError {}

// 便捷的构造函数
impl NestleadError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        NestleadError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        NestleadError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        NestleadError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        NestleadError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        NestleadError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        NestleadError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        NestleadError::Serialization(msg.into())
    }

    pub fn content<T: Into<String>>(msg: T) -> Self {
        NestleadError::Content(msg.into())
    }

    pub fn rate_limited<T: Into<String>>(msg: T) -> Self {
        NestleadError::RateLimited(msg.into())
    }
}

impl From<sea_orm::DbErr> for NestleadError {
    fn from(err: sea_orm::DbErr) -> Self {
        NestleadError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for NestleadError {
    fn from(err: std::io::Error) -> Self {
        NestleadError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for NestleadError {
    fn from(err: serde_json::Error) -> Self {
        NestleadError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NestleadError>;
