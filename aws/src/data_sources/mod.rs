pub mod kendra;

pub use kendra::ThesaurusDataSource;
