//! Payload types shared by several endpoint groups

use crate::facets::{MediaUserList, ReleaseStatus, ReleaseType};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Paging block of list responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Zero-based page index
    pub page: u64,
    /// Items per page
    pub per_page: u64,
    /// Total matching items
    pub total_items: u64,
    /// Total number of pages
    pub total_pages: u64,
}

/// Value a provider knows an entity by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderValue {
    /// Provider key, e.g. `myanimelist`
    pub name: String,
    /// Label for display
    pub display_name: String,
    /// Provider-side id
    pub value: String,
}

/// The signed-in user's data for one media entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUser {
    /// False when the user never touched this entry
    pub has_data: bool,
    /// Watchlist membership; the backend sends `""` for none
    #[serde(default, deserialize_with = "empty_list_as_none")]
    pub list: Option<MediaUserList>,
    /// Personal score
    pub score: Option<i64>,
    /// Last watched/read part
    pub current_part: Option<i64>,
    /// Times revisited
    pub revisit_count: Option<i64>,
    /// Currently on a revisit
    pub is_revisiting: bool,
}

/// Release schedule attached to a media entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRelease {
    /// Confirmed or guessed
    pub release_type: ReleaseType,
    /// First airing date
    pub start_date: String,
    /// Parts the schedule will produce
    pub num_expected_parts: i64,
    /// Index of the first scheduled part
    pub part_offset: i64,
    /// Days between parts
    pub interval_days: i64,
    /// Extra delay applied to the schedule
    pub delay_days: i64,
    /// Schedule progress
    pub status: ReleaseStatus,
    /// Latest released part
    pub current_part: i64,
    /// Next airing timestamp
    pub next_airing: Option<String>,
}

/// One part (episode, chapter) of a media entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPart {
    /// Position within the media
    pub index: i64,
    /// Owning media
    pub media_id: String,
    /// Display name
    pub name: String,
}

/// Payload of the id-only creation responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    /// Id of the new entity
    pub id: String,
}

fn empty_list_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<MediaUserList>, D::Error> {
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_user_without_list() {
        let user: MediaUser = serde_json::from_str(
            r#"{"hasData": false, "list": null, "score": null,
                "currentPart": null, "revisitCount": null, "isRevisiting": false}"#,
        )
        .unwrap();
        assert!(!user.has_data);
        assert!(user.list.is_none());

        let user: MediaUser = serde_json::from_str(
            r#"{"hasData": true, "list": "", "isRevisiting": false}"#,
        )
        .unwrap();
        assert!(user.list.is_none());

        let bad = serde_json::from_str::<MediaUser>(
            r#"{"hasData": true, "list": "watching", "isRevisiting": false}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_page_field_names() {
        let page: Page = serde_json::from_str(
            r#"{"page": 0, "perPage": 50, "totalItems": 120, "totalPages": 3}"#,
        )
        .unwrap();
        assert_eq!(page.per_page, 50);
        assert_eq!(page.total_pages, 3);
    }
}
