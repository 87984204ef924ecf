use axum::http::StatusCode;
use thiserror::Error;

pub const LOAD_FAILED_MESSAGE: &str = "급식정보를 불러오는 중 오류가 발생했습니다.";
pub const PICK_DATE_MESSAGE: &str = "날짜를 선택해주세요.";

/// Failure of a single meal query. Every variant is terminal for that query.
#[derive(Debug, Error)]
pub enum MealError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("xml parse error: {0}")]
    Parse(String),
}

impl From<quick_xml::Error> for MealError {
    fn from(e: quick_xml::Error) -> Self {
        MealError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for MealError {
    fn from(e: reqwest::Error) -> Self {
        MealError::Transport(e.to_string())
    }
}

impl MealError {
    pub fn status(&self) -> StatusCode {
        match self {
            MealError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            MealError::Transport(_) | MealError::Parse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Transport and parse failures look the same to the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            MealError::InvalidDate(_) => PICK_DATE_MESSAGE,
            MealError::Transport(_) | MealError::Parse(_) => LOAD_FAILED_MESSAGE,
        }
    }
}
