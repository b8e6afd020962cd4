//! Contact messages left by visitors, with the staff inbox over them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{ContactMessage, MessageFilters, MessageId, NewMessage};
pub use repository::ContactRepository;
pub use router::{admin_contact_router, contact_router};
pub use service::{ContactDesk, ContactError};
