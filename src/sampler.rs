use crate::index::{MediaIndex, MediaItem};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use rand::{Rng, seq::index::sample as sample_indices};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    /// Accepted for forward compatibility, has no effect on sampling.
    pub offset: usize,
    pub limit: usize,
}

impl SampleRequest {
    pub fn new(limit: usize) -> Self {
        Self { offset: 0, limit }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleResult {
    videos: Vec<String>,
}

impl SampleResult {
    pub fn paths(&self) -> &[String] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Characters that would otherwise end or alter a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn public_path(route: &str, item: &MediaItem) -> String {
    format!("/{route}/{}", utf8_percent_encode(item.name(), PATH_SEGMENT))
}

/// Draws `min(limit, index.len())` distinct items in random order.
pub fn sample_items<'a, R: Rng + ?Sized>(
    index: &'a MediaIndex,
    limit: usize,
    rng: &mut R,
) -> Vec<&'a MediaItem> {
    if index.is_empty() {
        return vec![];
    }

    let items = index.items();

    sample_indices(rng, items.len(), limit.min(items.len()))
        .into_iter()
        .map(|position| &items[position])
        .collect()
}

pub fn sample<R: Rng + ?Sized>(
    index: &MediaIndex,
    request: SampleRequest,
    route: &str,
    rng: &mut R,
) -> SampleResult {
    let videos = sample_items(index, request.limit, rng)
        .into_iter()
        .map(|item| public_path(route, item))
        .collect();

    SampleResult { videos }
}
