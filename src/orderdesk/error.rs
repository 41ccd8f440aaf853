use crate::model::OrderKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderDeskError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderKey),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Form error: {0}")]
    Form(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, OrderDeskError>;
