//! Shared cast fixtures for export tests

use serde_json::{Value, json};

use crate::feed::FeedRecord;

/// A fully populated cast in the shape the feed API returns
pub(crate) fn sample_cast() -> Value {
    json!({
        "hash": "0xcast",
        "thread_hash": "0xthread",
        "parent_hash": null,
        "parent_url": "chain://eip155:1/erc721:0xabc",
        "root_parent_url": "chain://eip155:1/erc721:0xabc",
        "parent_author": { "fid": null },
        "author": {
            "fid": 194,
            "username": "rish",
            "display_name": "rish",
            "pfp_url": "https://i.imgur.com/x.png",
            "custody_address": "0x1234",
            "profile": { "bio": { "text": "building \"things\", daily" } },
            "follower_count": 1200,
            "following_count": 300,
            "verifications": ["0xaaa", "0xbbb"],
            "verified_addresses": { "eth_addresses": ["0xaaa"], "sol_addresses": [] },
            "power_badge": true
        },
        "text": "gm, farcaster",
        "timestamp": "2024-11-05T12:00:00.000Z",
        "embeds": [
            { "url": "https://example.com/one" },
            { "cast_id": { "fid": 2, "hash": "0xref1" }, "cast": { "hash": "0xref1" } },
            { "url": "https://example.com/two" },
            { "cast": { "hash": "0xref2" } }
        ],
        "reactions": { "likes_count": 10, "recasts_count": 2 },
        "replies": { "count": 4 }
    })
}

/// [`sample_cast`] with its hash and text replaced
pub(crate) fn cast_with(hash: &str, text: &str) -> FeedRecord {
    let mut value = sample_cast();
    value["hash"] = json!(hash);
    value["text"] = json!(text);
    serde_json::from_value(value).expect("fixture deserializes")
}
