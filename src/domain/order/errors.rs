// ============================================================================
// Order Request Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("user_id and book_id are required")]
    MissingRequiredFields,

    #[error("No data provided")]
    NoData,

    #[error("No valid fields to update")]
    NoValidFields,

    #[error("Invalid field value: {0}")]
    InvalidField(String),
}
