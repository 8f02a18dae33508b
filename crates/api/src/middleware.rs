/// Request body extraction that accepts JSON or urlencoded forms
pub mod extract;
/// Mapping of scheduling errors to HTTP responses
pub mod error_handling;
/// One-shot status messages carried on redirects
pub mod flash;
