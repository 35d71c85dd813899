//! Feed records as returned by the channel feed endpoint
//!
//! Nested containers are optional here so that a missing one surfaces as a
//! typed [`RecordError`](crate::error::RecordError) during flattening instead
//! of failing the whole page at deserialization time.

use serde::{Deserialize, Deserializer};
use tracing::debug;

/// One cast from the feed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedRecord {
    #[serde(default)]
    pub hash: String,
    pub author: Option<Author>,
    pub thread_hash: Option<String>,
    pub parent_hash: Option<String>,
    pub parent_url: Option<String>,
    pub root_parent_url: Option<String>,
    pub parent_author: Option<ParentAuthor>,
    pub text: Option<String>,
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "deserialize_embeds")]
    pub embeds: Option<Vec<Embed>>,
    pub reactions: Option<Reactions>,
    pub replies: Option<Replies>,
}

/// Author profile attached to a cast
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub fid: Option<u64>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub pfp_url: Option<String>,
    pub custody_address: Option<String>,
    pub profile: Option<Profile>,
    pub follower_count: Option<u64>,
    pub following_count: Option<u64>,
    pub verifications: Option<Vec<String>>,
    pub verified_addresses: Option<VerifiedAddresses>,
    pub power_badge: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub bio: Option<Bio>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bio {
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerifiedAddresses {
    #[serde(default)]
    pub eth_addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParentAuthor {
    pub fid: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reactions {
    pub likes_count: Option<u64>,
    pub recasts_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Replies {
    pub count: Option<u64>,
}

/// An attachment on a cast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    /// External URL
    Url { url: String },
    /// Reference to another cast
    Cast { hash: String },
}

/// Embed shape on the wire; classified into [`Embed`] right after decoding
#[derive(Debug, Deserialize)]
struct RawEmbed {
    url: Option<String>,
    cast: Option<RawCastRef>,
}

#[derive(Debug, Deserialize)]
struct RawCastRef {
    hash: Option<String>,
}

impl Embed {
    /// Classify a wire embed. A URL wins over a cast reference; anything
    /// carrying neither is not an embed we export.
    fn classify(raw: RawEmbed) -> Option<Self> {
        if let Some(url) = raw.url {
            return Some(Embed::Url { url });
        }
        raw.cast
            .and_then(|cast| cast.hash)
            .map(|hash| Embed::Cast { hash })
    }
}

fn deserialize_embeds<'de, D>(deserializer: D) -> Result<Option<Vec<Embed>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<RawEmbed>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|embeds| {
        let total = embeds.len();
        let classified: Vec<Embed> = embeds.into_iter().filter_map(Embed::classify).collect();
        if classified.len() < total {
            debug!(
                "Dropped {} embed(s) with neither url nor cast reference",
                total - classified.len()
            );
        }
        classified
    }))
}

/// One page of the feed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageResult {
    #[serde(default)]
    pub casts: Vec<FeedRecord>,
    pub next: Option<NextPage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NextPage {
    pub cursor: Option<String>,
}

impl PageResult {
    /// Continuation token for the following page, if any
    ///
    /// An empty cursor counts as absent.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next
            .as_ref()
            .and_then(|next| next.cursor.as_deref())
            .filter(|cursor| !cursor.is_empty())
    }
}
