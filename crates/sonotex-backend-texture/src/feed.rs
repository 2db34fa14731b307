//! Descriptor feed for grid traversal.

use sonotex_spec::SoundDescriptor;

/// Descriptor handed to a cell, and whether the feed had run dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedItem {
    Supplied(SoundDescriptor),
    /// The feed was exhausted; the default descriptor is used.
    Defaulted(SoundDescriptor),
}

impl FeedItem {
    pub fn descriptor(&self) -> SoundDescriptor {
        match *self {
            FeedItem::Supplied(d) | FeedItem::Defaulted(d) => d,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, FeedItem::Defaulted(_))
    }
}

/// Ordered descriptor source that never runs out.
///
/// Once the underlying iterator is exhausted, every further request yields
/// [`SoundDescriptor::default`]. The first such request is logged.
#[derive(Debug)]
pub struct DescriptorFeed<I> {
    inner: I,
    supplied: usize,
    defaulted: usize,
}

impl<I: Iterator<Item = SoundDescriptor>> DescriptorFeed<I> {
    pub fn new<T>(descriptors: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: descriptors.into_iter(),
            supplied: 0,
            defaulted: 0,
        }
    }

    /// Next descriptor, or the default once the feed is exhausted.
    pub fn next_or_default(&mut self) -> FeedItem {
        if self.defaulted == 0 {
            if let Some(descriptor) = self.inner.next() {
                self.supplied += 1;
                return FeedItem::Supplied(descriptor);
            }
            log::warn!(
                "descriptor feed exhausted after {} rows; remaining cells use defaults",
                self.supplied
            );
        }
        self.defaulted += 1;
        FeedItem::Defaulted(SoundDescriptor::default())
    }

    /// Descriptors taken from the underlying source.
    pub fn supplied(&self) -> usize {
        self.supplied
    }

    /// Requests answered with the default descriptor.
    pub fn defaulted(&self) -> usize {
        self.defaulted
    }

    /// Descriptors left unconsumed, draining the source.
    pub fn remaining(self) -> usize {
        self.inner.count()
    }
}
