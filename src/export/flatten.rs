//! Flattening of casts into fixed-width rows

use crate::error::{RecordError, Result};
use crate::feed::{Embed, FeedRecord};

use super::encoder::Cell;

/// Number of columns in an exported row
pub const COLUMN_COUNT: usize = 23;

/// Column names, in row order
pub const HEADERS: [&str; COLUMN_COUNT] = [
    "author.fid",
    "author.username",
    "author.displayName",
    "author.pfpUrl",
    "author.custodyAddress",
    "author.bioText",
    "author.followerCount",
    "author.followingCount",
    "author.verifications",
    "author.verifiedEthAddresses",
    "author.powerBadge",
    "thread_hash",
    "parent_hash",
    "parent_url",
    "root_parent_url",
    "parent_author.fid",
    "text",
    "timestamp",
    "url_embeds",
    "cast_embeds",
    "likes_count",
    "recasts_count",
    "replies_count",
];

/// One flattened cast
pub type Row = [Cell; COLUMN_COUNT];

/// Flatten one cast into a row matching [`HEADERS`]
///
/// # Errors
/// Returns [`RecordError::MissingField`] when a nested container the export
/// reads from (author, profile, bio, verifications, verified addresses,
/// parent author, embeds, reactions, replies) is absent.
pub fn flatten(record: &FeedRecord) -> Result<Row> {
    let missing = |field: &'static str| RecordError::MissingField {
        hash: record.hash.clone(),
        field,
    };

    let author = record.author.as_ref().ok_or_else(|| missing("author"))?;
    let bio = author
        .profile
        .as_ref()
        .ok_or_else(|| missing("author.profile"))?
        .bio
        .as_ref()
        .ok_or_else(|| missing("author.profile.bio"))?;
    let verifications = author
        .verifications
        .as_ref()
        .ok_or_else(|| missing("author.verifications"))?;
    let verified = author
        .verified_addresses
        .as_ref()
        .ok_or_else(|| missing("author.verified_addresses"))?;
    let parent_author = record
        .parent_author
        .as_ref()
        .ok_or_else(|| missing("parent_author"))?;
    let embeds = record.embeds.as_ref().ok_or_else(|| missing("embeds"))?;
    let reactions = record.reactions.as_ref().ok_or_else(|| missing("reactions"))?;
    let replies = record.replies.as_ref().ok_or_else(|| missing("replies"))?;

    let (url_embeds, cast_embeds) = split_embeds(embeds);

    Ok([
        author.fid.into(),
        author.username.clone().into(),
        author.display_name.clone().into(),
        author.pfp_url.clone().into(),
        author.custody_address.clone().into(),
        bio.text.clone().into(),
        author.follower_count.into(),
        author.following_count.into(),
        verifications.join(",").into(),
        verified.eth_addresses.join(",").into(),
        author.power_badge.into(),
        record.thread_hash.clone().into(),
        record.parent_hash.clone().into(),
        record.parent_url.clone().into(),
        record.root_parent_url.clone().into(),
        parent_author.fid.into(),
        record.text.clone().into(),
        record.timestamp.clone().into(),
        url_embeds.into(),
        cast_embeds.into(),
        reactions.likes_count.into(),
        reactions.recasts_count.into(),
        replies.count.into(),
    ])
}

/// Split embeds into comma-joined URL targets and cast hashes
fn split_embeds(embeds: &[Embed]) -> (String, String) {
    let mut urls = Vec::new();
    let mut casts = Vec::new();
    for embed in embeds {
        match embed {
            Embed::Url { url } => urls.push(url.as_str()),
            Embed::Cast { hash } => casts.push(hash.as_str()),
        }
    }
    (urls.join(","), casts.join(","))
}
