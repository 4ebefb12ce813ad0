//! Profile extraction.
//!
//! The profile is assembled from three independent regions of the page. Each
//! region produces a [`ProfileUpdate`]; updates are folded into a [`User`] in
//! the order the regions were visited.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{attr, child_attr, child_text, join_url};
use crate::constants::PROTECTED_TIMELINE_TEXT;
use crate::models::User;

pub static HEADER_CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProfileHeaderCard").unwrap());
pub static PROFILE_NAV: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProfileNav").unwrap());
pub static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

static LOCATION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProfileHeaderCard-locationText.u-dir").unwrap());
static AVATAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProfileAvatar-image").unwrap());
static BANNER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProfileCanopy-headerBg img").unwrap());
static BIO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProfileHeaderCard-bio").unwrap());
static NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProfileHeaderCard-nameLink").unwrap());
static SCREEN_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProfileHeaderCard-screenname").unwrap());
static WEBSITE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ProfileHeaderCard-url").unwrap());
static PROTECTED_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ProtectedTimeline-heading").unwrap());

/// Fields read from the profile header card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCard {
    pub avatar: String,
    pub banner: String,
    pub biography: String,
    pub location: String,
    pub name: String,
    pub username: String,
    pub website: String,
}

/// A partial profile produced by one region of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUpdate {
    Header(HeaderCard),
    Id(String),
    /// The timeline is hidden; avatar and banner are re-read from the whole page.
    Protected { avatar: String, banner: String },
    Public,
}

impl ProfileUpdate {
    pub fn apply(self, user: &mut User) {
        match self {
            Self::Header(card) => {
                user.avatar = card.avatar;
                user.banner = card.banner;
                user.biography = card.biography;
                user.location = card.location;
                user.name = card.name;
                user.username = card.username;
                user.website = card.website;
            }
            Self::Id(id) => user.id = id,
            Self::Protected { avatar, banner } => {
                user.private = true;
                user.avatar = avatar;
                user.banner = banner;
            }
            Self::Public => user.private = false,
        }
    }
}

#[must_use]
pub fn extract_header(card: ElementRef<'_>) -> ProfileUpdate {
    ProfileUpdate::Header(HeaderCard {
        avatar: child_attr(card, &AVATAR, "src"),
        banner: child_attr(card, &BANNER, "src"),
        biography: child_text(card, &BIO),
        location: card
            .select(&LOCATION)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
        name: child_text(card, &NAME),
        username: child_text(card, &SCREEN_NAME),
        website: child_text(card, &WEBSITE),
    })
}

#[must_use]
pub fn extract_id(nav: ElementRef<'_>) -> ProfileUpdate {
    ProfileUpdate::Id(attr(nav, "data-user-id"))
}

#[must_use]
pub fn extract_visibility(body: ElementRef<'_>) -> ProfileUpdate {
    if child_text(body, &PROTECTED_HEADING) == PROTECTED_TIMELINE_TEXT {
        ProfileUpdate::Protected {
            avatar: child_attr(body, &AVATAR, "src"),
            banner: child_attr(body, &BANNER, "src"),
        }
    } else {
        ProfileUpdate::Public
    }
}

/// Fold updates into a profile for `handle`. The profile URL is always
/// synthesized from `base_url` rather than read from the page.
#[must_use]
pub fn build_user<I>(handle: &str, base_url: &str, updates: I) -> User
where
    I: IntoIterator<Item = ProfileUpdate>,
{
    let mut user = User {
        url: join_url(base_url, handle),
        ..User::default()
    };
    for update in updates {
        update.apply(&mut user);
    }
    user
}

/// Extract a profile from an already-parsed page.
#[must_use]
pub fn extract_profile(document: &Html, handle: &str, base_url: &str) -> User {
    let header = document.select(&HEADER_CARD).map(extract_header);
    let nav = document.select(&PROFILE_NAV).map(extract_id);
    let body = document.select(&BODY).map(extract_visibility);

    build_user(handle, base_url, header.chain(nav).chain(body))
}
