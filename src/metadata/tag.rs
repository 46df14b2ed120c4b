use http::Method;
use serde_json::Value;
use std::sync::Arc;

/// Route intent declared on a handler
///
/// Exposes the three facets the scanner queries: the pattern (which may be
/// absent), an optional route name and an optional match order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteAttribute {
    pattern: Option<String>,
    name: Option<String>,
    order: Option<i32>,
}

impl RouteAttribute {
    /// Route attribute for `pattern` with no name and no explicit order
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            name: None,
            order: None,
        }
    }

    /// Route attribute that carries a name/order but no pattern
    ///
    /// Such attributes are skipped by the scanner and never produce an endpoint.
    #[must_use]
    pub fn without_pattern() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    #[inline]
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn order(&self) -> Option<i32> {
        self.order
    }
}

/// One scanned route intent with a guaranteed pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub pattern: String,
    pub name: Option<String>,
    pub order: Option<i32>,
}

impl RouteDescriptor {
    /// Default match order when a descriptor does not set one
    pub const DEFAULT_ORDER: i32 = 0;

    /// Descriptor for `attr`, or `None` when the attribute has no pattern
    #[must_use]
    pub fn from_attribute(attr: &RouteAttribute) -> Option<Self> {
        Some(RouteDescriptor {
            pattern: attr.pattern.clone()?,
            name: attr.name.clone(),
            order: attr.order,
        })
    }

    /// Explicit name, falling back to the pattern
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.pattern)
    }

    /// Explicit order, falling back to [`Self::DEFAULT_ORDER`]
    ///
    /// An explicit `Some(0)` resolves identically to `None`.
    #[must_use]
    pub fn match_order(&self) -> i32 {
        self.order.unwrap_or(Self::DEFAULT_ORDER)
    }
}

/// Metadata attached to a handler and propagated to its endpoints
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataTag {
    /// Declared route intent; also propagated like any other tag
    Route(RouteAttribute),
    /// Restricts matching to the listed HTTP methods
    HttpMethods(Vec<Method>),
    /// Requires an authorization policy (`None` means the default policy)
    Authorization { policy: Option<String> },
    /// Opts the endpoint out of authorization
    AllowAnonymous,
    /// Grouping tags, e.g. for documentation
    Tags(Vec<String>),
    Description(String),
    /// Anything the core does not know about
    Extension { key: String, value: Value },
}

impl MetadataTag {
    /// Route attribute facet, if this tag declares route intent
    #[inline]
    #[must_use]
    pub fn as_route(&self) -> Option<&RouteAttribute> {
        match self {
            MetadataTag::Route(attr) => Some(attr),
            _ => None,
        }
    }

    /// Stable kind label used in logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MetadataTag::Route(_) => "route",
            MetadataTag::HttpMethods(_) => "http_methods",
            MetadataTag::Authorization { .. } => "authorization",
            MetadataTag::AllowAnonymous => "allow_anonymous",
            MetadataTag::Tags(_) => "tags",
            MetadataTag::Description(_) => "description",
            MetadataTag::Extension { .. } => "extension",
        }
    }
}

impl From<RouteAttribute> for MetadataTag {
    fn from(attr: RouteAttribute) -> Self {
        MetadataTag::Route(attr)
    }
}

/// Ordered, immutable metadata declared on a handler
///
/// Shared by reference between the scanner and every deferred configuration
/// step of one registration call. Endpoints never hold it directly: each one
/// copies the tags into its own [`EndpointMetadata`].
#[derive(Debug, Clone)]
pub struct HandlerMetadata(Arc<[MetadataTag]>);

impl HandlerMetadata {
    #[must_use]
    pub fn new(tags: Vec<MetadataTag>) -> Self {
        Self(Arc::from(tags))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataTag> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when both values share the same backing allocation
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for HandlerMetadata {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a HandlerMetadata {
    type Item = &'a MetadataTag;
    type IntoIter = std::slice::Iter<'a, MetadataTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Metadata owned by a single endpoint
///
/// Lookups that expect at most one value of a kind use "last write wins", so
/// a tag added by a later convention overrides one propagated from the handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointMetadata(Vec<MetadataTag>);

impl EndpointMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, tag: MetadataTag) {
        self.0.push(tag);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataTag> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, tag: &MetadataTag) -> bool {
        self.0.contains(tag)
    }

    /// Methods this endpoint is restricted to, if any
    #[must_use]
    pub fn http_methods(&self) -> Option<&[Method]> {
        self.0.iter().rev().find_map(|tag| match tag {
            MetadataTag::HttpMethods(methods) => Some(methods.as_slice()),
            _ => None,
        })
    }

    /// Authorization requirement after applying `AllowAnonymous`
    ///
    /// Returns `None` when the endpoint is open, `Some(policy)` otherwise.
    #[must_use]
    pub fn authorization_policy(&self) -> Option<Option<&str>> {
        for tag in self.0.iter().rev() {
            match tag {
                MetadataTag::AllowAnonymous => return None,
                MetadataTag::Authorization { policy } => return Some(policy.as_deref()),
                _ => {}
            }
        }
        None
    }

    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.0.iter().rev().find_map(|tag| match tag {
            MetadataTag::Extension { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }
}

impl Extend<MetadataTag> for EndpointMetadata {
    fn extend<T: IntoIterator<Item = MetadataTag>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a EndpointMetadata {
    type Item = &'a MetadataTag;
    type IntoIter = std::slice::Iter<'a, MetadataTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
