pub mod data_source_thesaurus;

pub use data_source_thesaurus::ThesaurusDataSource;
