pub mod content;
pub mod predicates;
pub mod upload;

pub use content::ContentValidator;
pub use predicates::{is_valid_date, is_valid_id_checksum};
pub use upload::UploadValidator;
