//! Channel feed access
//!
//! - `model`: casts and pages as delivered by the API
//! - `client`: the [`FeedSource`] seam and its HTTP implementation
//! - `pager`: cursor-following pagination with a page cap

pub mod client;
pub mod model;
pub mod pager;

pub use client::{FeedRequest, FeedSource, NeynarClient};
pub use model::{Embed, FeedRecord, PageResult};
pub use pager::ChannelPager;

#[cfg(test)]
mod tests;
