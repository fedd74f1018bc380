pub mod album;
mod common;
mod html;
pub mod track;

pub use album::KhinsiderAlbumLE;
use once_cell::sync::Lazy;
use ripvgm_extractor_api::{AnyExtractor, NewExtractor};
pub use track::KhinsiderTrackRE;

pub static EXTRACTORS: Lazy<Vec<AnyExtractor>> = Lazy::new(|| {
    vec![
        AnyExtractor::Recording(Box::new(KhinsiderTrackRE::new())),
        AnyExtractor::List(Box::new(KhinsiderAlbumLE::new())),
    ]
});
