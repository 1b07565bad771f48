//! Categorical vocabularies shared by DTOs and listing filters
//!
//! Every facet is a closed set of kebab-case strings. Values outside the set
//! fail deserialization, which makes them a schema mismatch in a response
//! and an [`ApiError::InvalidFilter`](crate::error::ApiError::InvalidFilter)
//! in page parameters.

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+ }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err($crate::error::ApiError::invalid_filter(format!(
                        "unknown {} value `{other}`",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

pub(crate) use string_enum;

string_enum! {
    /// Kind of media entry
    MediaType {
        Unknown => "unknown",
        Tv => "tv",
        Movie => "movie",
        AnimeSeason => "anime-season",
        AnimeMovie => "anime-movie",
        Game => "game",
        Manga => "manga",
        Comic => "comic",
    }
}

string_enum! {
    /// Airing/publication status
    MediaStatus {
        Unknown => "unknown",
        Ongoing => "ongoing",
        Completed => "completed",
        Upcoming => "upcoming",
    }
}

string_enum! {
    /// Content rating
    MediaRating {
        Unknown => "unknown",
        AllAges => "all-ages",
        Pg => "pg",
        Pg13 => "pg-13",
        R17 => "r-17",
        RMildNudity => "r-mild-nudity",
        RHentai => "r-hentai",
    }
}

string_enum! {
    /// Watchlist a user has put a media entry on
    MediaUserList {
        InProgress => "in-progress",
        Completed => "completed",
        OnHold => "on-hold",
        Dropped => "dropped",
        Backlog => "backlog",
    }
}

string_enum! {
    /// Kind of collection
    CollectionType {
        Unknown => "unknown",
        Series => "series",
        Anime => "anime",
    }
}

string_enum! {
    /// Kind of show
    ShowType {
        Unknown => "unknown",
        TvSeries => "tv-series",
        Anime => "anime",
    }
}

string_enum! {
    /// Whether a release schedule is confirmed by a provider
    ReleaseType {
        Confirmed => "confirmed",
        NotConfirmed => "not-confirmed",
    }
}

string_enum! {
    /// Progress of a release schedule
    ReleaseStatus {
        Unknown => "unknown",
        Waiting => "waiting",
        Running => "running",
        Completed => "completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_wire_names() {
        assert_eq!(MediaType::AnimeSeason.as_str(), "anime-season");
        assert_eq!(MediaRating::Pg13.to_string(), "pg-13");
        assert_eq!(
            serde_json::to_string(&MediaUserList::OnHold).unwrap(),
            "\"on-hold\""
        );
    }

    #[test]
    fn test_parse_every_value() {
        for value in MediaType::ALL {
            assert_eq!(value.as_str().parse::<MediaType>().unwrap(), *value);
        }
        for value in ShowType::ALL {
            assert_eq!(value.as_str().parse::<ShowType>().unwrap(), *value);
        }
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let err = "documentary".parse::<MediaType>().unwrap_err();
        assert!(matches!(err, ApiError::InvalidFilter(_)));
        assert!(serde_json::from_str::<MediaStatus>("\"paused\"").is_err());
    }
}
