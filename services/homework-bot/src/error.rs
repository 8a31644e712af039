//! Error types for the homework bot
//!
//! Display texts end up in chat messages, so they are written in Russian.

/// Errors that can occur in the homework bot
#[derive(Debug, thiserror::Error)]
pub enum HomeworkBotError {
    #[error("Ошибка конфигурации: {0}")]
    Config(String),

    #[error("{0}")]
    Transport(String),

    #[error("Эндпоинт {url} недоступен. Код ответа API {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("{0}")]
    Shape(String),

    #[error("Недокументированный статус ДЗ {0}")]
    UnknownStatus(String),

    #[error("Сообщение не отправлено в Telegram: {0}")]
    Delivery(String),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, HomeworkBotError>;
