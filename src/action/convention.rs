use std::sync::Arc;

use crate::router::{Convention, ConventionBuilder, EndpointConventionBuilder};

/// Composite handle over every endpoint produced by one handler registration
///
/// The member set is fixed when registration finishes; conventions added
/// here are forwarded to each member in registration order.
#[derive(Debug, Clone)]
pub struct ActionConventionBuilder {
    builders: Vec<EndpointConventionBuilder>,
}

impl ActionConventionBuilder {
    pub(crate) fn new(builders: Vec<EndpointConventionBuilder>) -> Self {
        Self { builders }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EndpointConventionBuilder> {
        self.builders.iter()
    }

    /// Patterns of the member endpoints, in registration order
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        self.builders.iter().map(EndpointConventionBuilder::pattern).collect()
    }
}

impl ConventionBuilder for ActionConventionBuilder {
    fn add_convention(&self, convention: Convention) {
        for builder in &self.builders {
            builder.add_convention(Arc::clone(&convention));
        }
    }
}

impl<'a> IntoIterator for &'a ActionConventionBuilder {
    type Item = &'a EndpointConventionBuilder;
    type IntoIter = std::slice::Iter<'a, EndpointConventionBuilder>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
