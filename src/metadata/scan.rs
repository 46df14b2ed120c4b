use tracing::debug;

use super::tag::{HandlerMetadata, MetadataTag, RouteDescriptor};
use crate::handler::RouteHandler;

/// Route intent and metadata read from one handler
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Every tag declared on the handler, in declaration order
    pub metadata: HandlerMetadata,
}

impl ScanResult {
    /// Lazily yields one descriptor per route attribute that carries a pattern
    pub fn descriptors(&self) -> impl Iterator<Item = RouteDescriptor> + '_ {
        route_descriptors(&self.metadata)
    }
}

/// Read a handler's declared metadata without touching the handler
///
/// Never fails: a handler without route attributes yields an empty
/// descriptor sequence and the caller decides whether that is an error.
pub fn scan<H: RouteHandler + ?Sized>(handler: &H) -> ScanResult {
    let metadata = handler.metadata();
    debug!(
        handler_name = %handler.name(),
        metadata_count = metadata.len(),
        route_attributes = metadata.iter().filter(|t| t.as_route().is_some()).count(),
        tag_kinds = ?metadata.iter().map(MetadataTag::kind).collect::<Vec<_>>(),
        "Scanned handler metadata"
    );
    ScanResult { metadata }
}

/// Descriptors for the route attributes in `metadata`, skipping absent patterns
pub fn route_descriptors(metadata: &HandlerMetadata) -> impl Iterator<Item = RouteDescriptor> + '_ {
    metadata
        .iter()
        .filter_map(|tag| tag.as_route())
        .filter_map(RouteDescriptor::from_attribute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::RouteAttribute;

    #[test]
    fn test_descriptors_preserve_declaration_order() {
        let metadata = HandlerMetadata::new(vec![
            RouteAttribute::new("/b").into(),
            MetadataTag::AllowAnonymous,
            RouteAttribute::new("/a").into(),
        ]);
        let patterns: Vec<String> = route_descriptors(&metadata).map(|d| d.pattern).collect();
        assert_eq!(patterns, vec!["/b", "/a"]);
    }

    #[test]
    fn test_attributes_without_pattern_are_skipped() {
        let metadata = HandlerMetadata::new(vec![
            RouteAttribute::without_pattern().with_name("ghost").into(),
            RouteAttribute::new("/real").into(),
        ]);
        let descriptors: Vec<_> = route_descriptors(&metadata).collect();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].pattern, "/real");
    }

    #[test]
    fn test_no_route_attributes_yields_empty_sequence() {
        let metadata = HandlerMetadata::new(vec![MetadataTag::Description("docs".into())]);
        assert_eq!(route_descriptors(&metadata).count(), 0);
    }
}
