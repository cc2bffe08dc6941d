use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown role '{0}', expected one of: admin, corporate, individual")]
    UnknownRole(String),
    #[error("unknown category '{0}', expected one of: All, Frontend, Backend, Mobile, Database")]
    UnknownCategory(String),
}
