mod chunk;
mod document;
mod embedding;
mod message_role;
mod question;
mod section;
mod shipment;

pub use chunk::{
    Chunk, ChunkMetadata, ChunkType, DEFAULT_SECTION_NAME, STRUCTURED_DATA_CHUNK_ID,
};
pub use document::{ContentType, Document, DocumentId, file_extension};
pub use embedding::Embedding;
pub use message_role::MessageRole;
pub use question::{ChatTurn, QaQuery, SourcedAnswer};
pub use section::{
    SECTION_MARKER_PREFIX, SectionGroup, SectionGroupRule, default_section_group_rules,
    first_section_marker, parse_section_marker,
};
pub use shipment::{
    CarrierInfo, CommodityItem, DriverInfo, ExtractionResponse, Location, RateInfo, ShipmentData,
};
