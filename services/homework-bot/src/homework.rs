//! Response validation and status formatting for homework records

use serde_json::Value;

use crate::status::HomeworkStatus;
use crate::HomeworkBotError;

/// Key holding the list of homework records in an API response
pub const HOMEWORKS_KEY: &str = "homeworks";

/// A single homework record borrowed from an API response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeworkRecord<'a> {
    pub homework_name: &'a str,
    pub status: &'a str,
}

impl<'a> HomeworkRecord<'a> {
    /// Extract the fields the bot needs, ignoring any others
    pub fn from_value(record: &'a Value) -> crate::Result<Self> {
        let fields = record.as_object().ok_or_else(|| {
            HomeworkBotError::Shape("Запись о домашней работе не является словарём".to_string())
        })?;
        let text_field = move |key: &str| {
            fields.get(key).and_then(Value::as_str).ok_or_else(|| {
                HomeworkBotError::Shape(format!("В ответе API нет ключа {}", key))
            })
        };

        Ok(Self {
            homework_name: text_field("homework_name")?,
            status: text_field("status")?,
        })
    }
}

/// Check the payload shape and return its homework records unchanged
pub fn validate(response: &Value) -> crate::Result<&[Value]> {
    let fields = response.as_object().ok_or_else(|| {
        HomeworkBotError::Shape("Ответ API не является словарём".to_string())
    })?;
    let homeworks = fields.get(HOMEWORKS_KEY).ok_or_else(|| {
        HomeworkBotError::Shape(format!("В ответе API нет ключа {}", HOMEWORKS_KEY))
    })?;
    let records = homeworks.as_array().ok_or_else(|| {
        HomeworkBotError::Shape(format!(
            "Значение ключа {} не является списком",
            HOMEWORKS_KEY
        ))
    })?;
    Ok(records.as_slice())
}

/// Render the chat message for one homework record
pub fn format_status(record: &Value) -> crate::Result<String> {
    let record = HomeworkRecord::from_value(record)?;
    let status: HomeworkStatus = record.status.parse()?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.homework_name,
        status.verdict()
    ))
}
