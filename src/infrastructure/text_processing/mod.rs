mod chunk_assembler;
mod composite_file_loader;
mod docx_adapter;
mod pdf_adapter;
mod plain_chunker;
mod plain_text_adapter;
mod recursive_character_splitter;
mod section_chunker;
mod section_grouper;
mod structural_tagger;
mod text_sanitizer;
mod text_splitter_factory;

pub use chunk_assembler::{ChunkAssembler, PageIndex, SectionFragment, clean_fragment};
pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::{DocxAdapter, paragraphs_from_xml};
pub use pdf_adapter::PdfAdapter;
pub use plain_chunker::PlainChunker;
pub use plain_text_adapter::PlainTextAdapter;
pub use recursive_character_splitter::{DEFAULT_SEPARATORS, Fragment, RecursiveCharacterSplitter};
pub use section_chunker::SectionChunker;
pub use section_grouper::SectionGrouper;
pub use structural_tagger::{DEFAULT_SECTION_NAMES, StructuralTagger};
pub use text_sanitizer::sanitize_extracted_text;
pub use text_splitter_factory::TextSplitterFactory;
