pub mod document_signing;
pub mod session_transport;
pub mod task_visibility;
